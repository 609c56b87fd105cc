use serde::{Deserialize, Serialize};

/// User preferences for gap generation. Every field has a serde default so a
/// partially-written or older preferences file merges over the defaults
/// instead of failing to load.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// 1-based index of the first sentence eligible for gapping.
    #[serde(default = "default_start_sentence")]
    pub start_sentence: u32,
    /// Words with fewer characters than this are left intact.
    #[serde(default = "default_skip_words_shorter_than")]
    pub skip_words_shorter_than: u32,
    /// Keep the original casing of the hidden suffix; otherwise lowercase it.
    #[serde(default = "default_capitalize_hints")]
    pub capitalize_hints: bool,
}

fn default_start_sentence() -> u32 {
    1
}
fn default_skip_words_shorter_than() -> u32 {
    3
}
fn default_capitalize_hints() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            start_sentence: default_start_sentence(),
            skip_words_shorter_than: default_skip_words_shorter_than(),
            capitalize_hints: default_capitalize_hints(),
        }
    }
}

impl Preferences {
    /// Restore the 1-based invariant on values loaded from disk.
    pub fn normalize(&mut self) {
        if self.start_sentence == 0 {
            self.start_sentence = 1;
        }
    }
}
