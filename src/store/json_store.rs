use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::store::schema::Preferences;

/// Durable key-value storage backed by one JSON file per key under the
/// platform data directory. Reads are best-effort: a missing, unreadable, or
/// corrupt file degrades to the default value with a diagnostic log line,
/// never an error. Writes go through a tmp-file rename so a crash mid-save
/// cannot leave a half-written key behind.
pub struct JsonStore {
    base_dir: PathBuf,
}

const PREFERENCES_KEY: &str = "preferences.json";
const PANEL_COLLAPSED_KEY: &str = "panel_collapsed.json";

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("clozer");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    #[allow(dead_code)] // Used by integration tests
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(key = name, %err, "discarding corrupt stored value");
                T::default()
            }),
            Err(err) => {
                warn!(key = name, %err, "failed to read stored value");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Stored preferences merged over defaults. Never fails.
    pub fn load_preferences(&self) -> Preferences {
        let mut prefs: Preferences = self.load(PREFERENCES_KEY);
        prefs.normalize();
        prefs
    }

    /// Persist preferences; a write failure is logged and swallowed.
    pub fn save_preferences(&self, prefs: &Preferences) {
        if let Err(err) = self.save(PREFERENCES_KEY, prefs) {
            warn!(%err, "failed to save preferences");
        }
    }

    /// Collapsed state of the options panel, stored under its own key.
    pub fn load_panel_collapsed(&self) -> bool {
        self.load(PANEL_COLLAPSED_KEY)
    }

    pub fn save_panel_collapsed(&self, collapsed: bool) {
        if let Err(err) = self.save(PANEL_COLLAPSED_KEY, &collapsed) {
            warn!(%err, "failed to save panel state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_preferences_load_as_defaults() {
        let (_dir, store) = store();
        assert_eq!(store.load_preferences(), Preferences::default());
    }

    #[test]
    fn test_preferences_roundtrip() {
        let (_dir, store) = store();
        let prefs = Preferences {
            start_sentence: 3,
            skip_words_shorter_than: 5,
            capitalize_hints: false,
        };
        store.save_preferences(&prefs);
        assert_eq!(store.load_preferences(), prefs);
    }

    #[test]
    fn test_corrupt_preferences_load_as_defaults() {
        let (dir, store) = store();
        fs::write(dir.path().join("preferences.json"), "{not json").unwrap();
        assert_eq!(store.load_preferences(), Preferences::default());
    }

    #[test]
    fn test_zero_start_sentence_is_normalized_on_load() {
        let (dir, store) = store();
        fs::write(
            dir.path().join("preferences.json"),
            r#"{"start_sentence": 0}"#,
        )
        .unwrap();
        assert_eq!(store.load_preferences().start_sentence, 1);
    }

    #[test]
    fn test_panel_flag_defaults_to_false() {
        let (_dir, store) = store();
        assert!(!store.load_panel_collapsed());
    }

    #[test]
    fn test_panel_flag_roundtrip() {
        let (_dir, store) = store();
        store.save_panel_collapsed(true);
        assert!(store.load_panel_collapsed());
        store.save_panel_collapsed(false);
        assert!(!store.load_panel_collapsed());
    }

    #[test]
    fn test_corrupt_panel_flag_loads_as_default() {
        let (dir, store) = store();
        fs::write(dir.path().join("panel_collapsed.json"), "maybe").unwrap();
        assert!(!store.load_panel_collapsed());
    }
}
