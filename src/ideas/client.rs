use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Default issue tracker backing the idea board.
pub const DEFAULT_REPO: &str = "mikaelbr/open-source-ideas";

#[derive(Clone, Debug, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Comment {
    pub user: Author,
    #[serde(default)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Author {
    pub login: String,
}

/// Read-only client for a repository's issues. Unauthenticated, no
/// pagination, no retry: a failed request returns `None` and the caller's
/// loading indicator simply stays up.
#[derive(Clone, Debug)]
pub struct IdeaClient {
    repo: String,
}

impl IdeaClient {
    pub fn new(repo: &str) -> Self {
        Self {
            repo: repo.to_string(),
        }
    }

    fn issues_url(&self) -> String {
        format!("https://api.github.com/repos/{}/issues", self.repo)
    }

    pub fn list(&self) -> Option<Vec<Issue>> {
        fetch_json(&self.issues_url())
    }

    pub fn issue(&self, number: u64) -> Option<Issue> {
        fetch_json(&format!("{}/{number}", self.issues_url()))
    }

    pub fn comments(&self, number: u64) -> Option<Vec<Comment>> {
        fetch_json(&format!("{}/{number}/comments", self.issues_url()))
    }
}

#[cfg(feature = "network")]
fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Option<T> {
    // GitHub rejects requests without a User-Agent.
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("clozer/", env!("CARGO_PKG_VERSION")))
        .build()
        .ok()?;
    let response = client.get(url).send().ok()?;
    if !response.status().is_success() {
        tracing::debug!(%url, status = %response.status(), "issue fetch failed");
        return None;
    }
    response.json().ok()
}

#[cfg(not(feature = "network"))]
fn fetch_json<T: serde::de::DeserializeOwned>(_url: &str) -> Option<T> {
    None
}
