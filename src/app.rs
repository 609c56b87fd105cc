use std::sync::mpsc;
use std::thread;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_embed::Embed;

use crate::config::Config;
use crate::event::{AppEvent, FetchEvent};
use crate::ideas::client::{Comment, IdeaClient, Issue};
use crate::session::exercise::Exercise;
use crate::store::json_store::JsonStore;
use crate::store::schema::Preferences;
use crate::ui::components::menu::Menu;
use crate::ui::text_editor::TextEditor;
use crate::ui::theme::Theme;

#[derive(Embed)]
#[folder = "assets/samples/"]
struct SampleTexts;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Compose,
    Exercise,
    Ideas,
    IdeaDetail,
    Preferences,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line status message shown above the footer. Error notices carry the
/// blocking validation failures; info notices carry scores and confirmations.
#[derive(Clone, Debug)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: NoticeKind::Error,
        }
    }
}

/// State of the idea detail screen. The issue and its comments arrive from
/// two independent fetches; the screen counts as loading until both have
/// landed, in either order.
pub struct IdeaDetailState {
    pub number: u64,
    pub issue: Option<Issue>,
    pub comments: Option<Vec<Comment>>,
    pub scroll: u16,
}

impl IdeaDetailState {
    pub fn new(number: u64) -> Self {
        Self {
            number,
            issue: None,
            comments: None,
            scroll: 0,
        }
    }

    pub fn loading(&self) -> bool {
        self.issue.is_none() || self.comments.is_none()
    }
}

pub struct App {
    pub screen: AppScreen,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub store: Option<JsonStore>,
    pub preferences: Preferences,
    pub panel_collapsed: bool,
    pub editor: TextEditor,
    pub exercise: Option<Exercise>,
    pub notice: Option<Notice>,
    pub ideas: Vec<Issue>,
    pub ideas_loading: bool,
    pub ideas_selected: usize,
    pub detail: Option<IdeaDetailState>,
    pub prefs_selected: usize,
    pub should_quit: bool,
    client: IdeaClient,
    rng: SmallRng,
}

impl App {
    pub fn new() -> Self {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        let store = JsonStore::new().ok();
        let (preferences, panel_collapsed) = match &store {
            Some(s) => (s.load_preferences(), s.load_panel_collapsed()),
            None => (Preferences::default(), false),
        };

        let client = IdeaClient::new(&config.ideas_repo);

        Self {
            screen: AppScreen::Menu,
            config,
            theme,
            menu,
            store,
            preferences,
            panel_collapsed,
            editor: TextEditor::new(""),
            exercise: None,
            notice: None,
            ideas: Vec::new(),
            ideas_loading: false,
            ideas_selected: 0,
            detail: None,
            prefs_selected: 0,
            should_quit: false,
            client,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn set_ideas_repo(&mut self, repo: &str) {
        self.config.ideas_repo = repo.to_string();
        self.client = IdeaClient::new(repo);
    }

    pub fn go_to_menu(&mut self) {
        self.screen = AppScreen::Menu;
        self.notice = None;
    }

    pub fn go_to_compose(&mut self) {
        self.screen = AppScreen::Compose;
        self.notice = None;
    }

    pub fn go_to_preferences(&mut self) {
        self.screen = AppScreen::Preferences;
        self.prefs_selected = 0;
        self.notice = None;
    }

    /// Load one of the bundled sample texts into the compose buffer.
    pub fn load_sample(&mut self) {
        let names: Vec<_> = SampleTexts::iter().collect();
        if names.is_empty() {
            return;
        }
        let idx = self.rng.gen_range(0..names.len());
        if let Some(file) = SampleTexts::get(&names[idx]) {
            if let Ok(content) = std::str::from_utf8(file.data.as_ref()) {
                self.editor.set_text(content.trim_end());
                self.notice = Some(Notice::info("Sample text loaded"));
            }
        }
    }

    /// Build a fresh exercise from the compose buffer. Validation failures
    /// become a blocking notice and leave all state untouched.
    pub fn generate(&mut self) {
        match Exercise::from_text(self.editor.value(), &self.preferences) {
            Ok(exercise) => {
                self.exercise = Some(exercise);
                self.screen = AppScreen::Exercise;
                self.notice = None;
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.to_string()));
            }
        }
    }

    /// Discard the session and the compose buffer.
    pub fn reset(&mut self) {
        self.editor.clear();
        self.exercise = None;
        self.notice = None;
        self.screen = AppScreen::Compose;
    }

    /// Leave the exercise screen; the session does not survive navigation.
    pub fn leave_exercise(&mut self) {
        self.exercise = None;
        self.notice = None;
        self.screen = AppScreen::Compose;
    }

    pub fn compute_score(&mut self) {
        if let Some(exercise) = &self.exercise {
            let score = exercise.score();
            self.notice = Some(Notice::info(format!(
                "Score: {}/{} ({}%)",
                score.correct,
                score.total,
                score.percent()
            )));
        }
    }

    pub fn reveal_answers(&mut self) {
        if let Some(exercise) = &mut self.exercise {
            exercise.reveal_all();
            self.notice = Some(Notice::info("Answers revealed"));
        }
    }

    pub fn toggle_panel(&mut self) {
        self.panel_collapsed = !self.panel_collapsed;
        if let Some(store) = &self.store {
            store.save_panel_collapsed(self.panel_collapsed);
        }
    }

    pub fn save_preferences(&mut self) {
        if let Some(store) = &self.store {
            store.save_preferences(&self.preferences);
        }
    }

    /// Enter the idea board and kick off the list fetch. A failed fetch
    /// sends nothing back, leaving the progress notice up.
    pub fn open_ideas(&mut self, tx: &mpsc::Sender<AppEvent>) {
        self.screen = AppScreen::Ideas;
        self.notice = None;
        if !self.ideas.is_empty() {
            return;
        }
        self.ideas_loading = true;
        let client = self.client.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            if let Some(issues) = client.list() {
                let _ = tx.send(AppEvent::Fetch(FetchEvent::IdeasListed(issues)));
            }
        });
    }

    /// Open the selected idea: two concurrent fetches, one for the issue and
    /// one for its comments, each reporting completion independently.
    pub fn open_selected_idea(&mut self, tx: &mpsc::Sender<AppEvent>) {
        let Some(issue) = self.ideas.get(self.ideas_selected) else {
            return;
        };
        let number = issue.number;
        self.detail = Some(IdeaDetailState::new(number));
        self.screen = AppScreen::IdeaDetail;

        let client = self.client.clone();
        let issue_tx = tx.clone();
        thread::spawn(move || {
            if let Some(issue) = client.issue(number) {
                let _ = issue_tx.send(AppEvent::Fetch(FetchEvent::IssueLoaded(Box::new(issue))));
            }
        });

        let client = self.client.clone();
        let comments_tx = tx.clone();
        thread::spawn(move || {
            if let Some(comments) = client.comments(number) {
                let _ = comments_tx.send(AppEvent::Fetch(FetchEvent::CommentsLoaded(
                    number, comments,
                )));
            }
        });
    }

    /// Apply a fetch completion. Results for an idea the user has already
    /// navigated away from are dropped.
    pub fn on_fetch(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::IdeasListed(issues) => {
                self.ideas = issues;
                self.ideas_loading = false;
                self.ideas_selected = 0;
            }
            FetchEvent::IssueLoaded(issue) => {
                if let Some(detail) = self.detail.as_mut() {
                    if detail.number == issue.number {
                        detail.issue = Some(*issue);
                    }
                }
            }
            FetchEvent::CommentsLoaded(number, comments) => {
                if let Some(detail) = self.detail.as_mut() {
                    if detail.number == number {
                        detail.comments = Some(comments);
                    }
                }
            }
        }
    }

    pub fn ideas_select_next(&mut self) {
        if !self.ideas.is_empty() {
            self.ideas_selected = (self.ideas_selected + 1).min(self.ideas.len() - 1);
        }
    }

    pub fn ideas_select_prev(&mut self) {
        self.ideas_selected = self.ideas_selected.saturating_sub(1);
    }

    pub fn prefs_cycle(&mut self, forward: bool) {
        match self.prefs_selected {
            0 => {
                let v = self.preferences.start_sentence;
                self.preferences.start_sentence = if forward {
                    v.saturating_add(1).min(99)
                } else {
                    v.saturating_sub(1).max(1)
                };
            }
            1 => {
                let v = self.preferences.skip_words_shorter_than;
                self.preferences.skip_words_shorter_than = if forward {
                    v.saturating_add(1).min(99)
                } else {
                    v.saturating_sub(1)
                };
            }
            2 => {
                self.preferences.capitalize_hints = !self.preferences.capitalize_hints;
            }
            _ => {}
        }
    }
}
