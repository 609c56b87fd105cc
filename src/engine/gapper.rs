use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::engine::tokenizer;
use crate::store::schema::Preferences;

/// Minimum trimmed input length before generation is attempted.
pub const MIN_TEXT_CHARS: usize = 20;

/// Leading run of letters/combining marks, then everything else (punctuation,
/// digits). Tokens with no leading letters are never gapped.
static WORD_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\p{L}\p{M}]+)(.*)$").expect("valid word regex"));

/// One element of the rendered exercise, in source order. The full sequence
/// losslessly reconstructs the input text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Text {
        content: String,
    },
    Gap {
        id: String,
        prefix: String,
        missing: String,
        trailing: String,
    },
}

/// Answer-side state for one gap. `prefix` and `missing` mirror the Gap token
/// with the same id. `revealed` is only ever advanced by the hint operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GapRecord {
    pub id: String,
    pub prefix: String,
    pub missing: String,
    pub revealed: usize,
}

impl GapRecord {
    pub fn missing_len(&self) -> usize {
        self.missing.chars().count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedTest {
    pub tokens: Vec<Token>,
    pub gaps: Vec<GapRecord>,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("paste a text containing at least two sentences")]
    TextTooShort,
    #[error("not enough words to create gaps; try a longer text or adjust the settings")]
    NoGaps,
}

/// Build a C-Test from `text`: every qualifying word loses its second half to
/// a gap, everything else passes through verbatim.
pub fn generate(text: &str, prefs: &Preferences) -> Result<GeneratedTest, GenerateError> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(GenerateError::TextTooShort);
    }

    let first_gapped_sentence = prefs.start_sentence.saturating_sub(1) as usize;
    let mut tokens = Vec::new();
    let mut gaps = Vec::new();
    let mut gap_id = 0usize;

    for (sentence_idx, sentence) in tokenizer::split_sentences(text).into_iter().enumerate() {
        for part in tokenizer::split_tokens(sentence) {
            let word_match = if sentence_idx < first_gapped_sentence {
                None
            } else {
                WORD_SPLIT.captures(part)
            };

            let Some(caps) = word_match else {
                tokens.push(Token::Text {
                    content: part.to_string(),
                });
                continue;
            };

            let word = caps.get(1).map_or("", |m| m.as_str());
            let trailing = caps.get(2).map_or("", |m| m.as_str());
            let word_len = word.chars().count();

            // Single-letter words would yield an empty answer; leave them
            // intact along with anything below the length threshold.
            if word_len < 2 || (word_len as u32) < prefs.skip_words_shorter_than {
                tokens.push(Token::Text {
                    content: part.to_string(),
                });
                continue;
            }

            let cut = word_len.div_ceil(2);
            let prefix: String = word.chars().take(cut).collect();
            let missing_raw: String = word.chars().skip(cut).collect();
            let missing = if prefs.capitalize_hints {
                missing_raw
            } else {
                missing_raw.to_lowercase()
            };

            gap_id += 1;
            let id = format!("gap-{gap_id}");
            tokens.push(Token::Gap {
                id: id.clone(),
                prefix: prefix.clone(),
                missing: missing.clone(),
                trailing: trailing.to_string(),
            });
            gaps.push(GapRecord {
                id,
                prefix,
                missing,
                revealed: 0,
            });
        }
    }

    if gaps.is_empty() {
        return Err(GenerateError::NoGaps);
    }

    Ok(GeneratedTest { tokens, gaps })
}
