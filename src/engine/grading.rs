use icu_casemap::CaseMapper;
use icu_normalizer::ComposingNormalizer;

use crate::engine::gapper::GapRecord;

/// Classification of the current input of a single gap. `Empty` is neither
/// correct nor incorrect; an untouched gap carries no marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnswerStatus {
    #[default]
    Empty,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.correct as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Canonical form for comparison: NFC so composed and decomposed accents
/// agree, then full case folding. Accents survive the fold, so the
/// comparison stays accent-sensitive.
fn canonical(text: &str) -> String {
    let normalized = ComposingNormalizer::new_nfc().normalize(text);
    CaseMapper::new().fold_string(&normalized).to_string()
}

/// Case-insensitive, accent-sensitive equality.
pub fn answers_match(expected: &str, typed: &str) -> bool {
    canonical(expected) == canonical(typed)
}

/// Classify `value` against the gap's expected answer. Trimmed empty input is
/// `Empty`. Side-effect free; safe to run on every input change.
pub fn check_answer(record: &GapRecord, value: &str) -> AnswerStatus {
    let typed = value.trim();
    if typed.is_empty() {
        AnswerStatus::Empty
    } else if answers_match(&record.missing, typed) {
        AnswerStatus::Correct
    } else {
        AnswerStatus::Incorrect
    }
}

/// Reveal one more character of the expected answer, capped at its full
/// length. Returns the revealed prefix to be written into the gap's input.
pub fn hint(record: &mut GapRecord) -> String {
    if record.revealed < record.missing_len() {
        record.revealed += 1;
    }
    record.missing.chars().take(record.revealed).collect()
}

/// Grade every gap with the same comparison as `check_answer`. `total`
/// always equals the number of gaps passed in.
pub fn score<'a, I>(pairs: I) -> Score
where
    I: IntoIterator<Item = (&'a GapRecord, &'a str)>,
{
    let mut correct = 0;
    let mut total = 0;
    for (record, value) in pairs {
        total += 1;
        if check_answer(record, value) == AnswerStatus::Correct {
            correct += 1;
        }
    }
    Score { correct, total }
}
