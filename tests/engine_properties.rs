use std::fs;

use clozer::engine::gapper::{self, GapRecord, Token};
use clozer::engine::grading::{self, AnswerStatus};
use clozer::engine::tokenizer;
use clozer::ideas::markdown;
use clozer::session::exercise::Exercise;
use clozer::store::json_store::JsonStore;
use clozer::store::schema::Preferences;

const SAMPLE: &str = "Learning a new language requires exposure.";

fn reconstruct(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Token::Text { content } => content.clone(),
            Token::Gap {
                prefix,
                missing,
                trailing,
                ..
            } => format!("{prefix}{missing}{trailing}"),
        })
        .collect()
}

#[test]
fn tokenizer_round_trip_reproduces_input_exactly() {
    let inputs = [
        SAMPLE,
        "No terminator in this one",
        "...ellipsis first. Then words!",
        "Mixed   whitespace\tand\nnewlines. Still lossless?  Yes!",
        "Überraschung! Die Füße sind kalt. C'est la vie.",
        "",
    ];
    for input in inputs {
        let rejoined: String = tokenizer::split_sentences(input)
            .iter()
            .flat_map(|s| tokenizer::split_tokens(s))
            .collect();
        assert_eq!(rejoined, input, "round trip failed for {input:?}");
    }
}

#[test]
fn gap_prefix_and_missing_rebuild_the_word_at_the_half_cut() {
    let prefs = Preferences::default();
    let test = gapper::generate(
        "Sentences contain various words, short and longer ones. Final thoughts arrive!",
        &prefs,
    )
    .unwrap();
    for gap in &test.gaps {
        let word_len = gap.prefix.chars().count() + gap.missing.chars().count();
        let cut = word_len.div_ceil(2);
        assert_eq!(gap.prefix.chars().count(), cut, "bad cut for {}", gap.id);
    }
    // With capitalize_hints on, the token stream reconstructs the input.
    assert_eq!(
        reconstruct(&test.tokens),
        "Sentences contain various words, short and longer ones. Final thoughts arrive!"
    );
}

#[test]
fn no_gaps_before_the_start_sentence() {
    let prefs = Preferences {
        start_sentence: 3,
        ..Preferences::default()
    };
    let text = "Alpha bravo charlie. Delta echo foxtrot. Golf hotel india.";
    let test = gapper::generate(text, &prefs).unwrap();
    let first_two = ["Alpha", "bravo", "charlie", "Delta", "echo", "foxtrot"];
    for gap in &test.gaps {
        let word = format!("{}{}", gap.prefix, gap.missing);
        assert!(
            !first_two.contains(&word.as_str()),
            "gap {word:?} appeared before the start sentence"
        );
    }
    assert_eq!(test.gaps.len(), 3);
}

#[test]
fn no_gap_shorter_than_the_word_threshold() {
    for threshold in [0u32, 3, 5, 8] {
        let prefs = Preferences {
            skip_words_shorter_than: threshold,
            ..Preferences::default()
        };
        if let Ok(test) = gapper::generate(SAMPLE, &prefs) {
            for gap in &test.gaps {
                let word_len = gap.prefix.chars().count() + gap.missing.chars().count();
                assert!(
                    word_len as u32 >= threshold,
                    "word of length {word_len} gapped under threshold {threshold}"
                );
            }
        }
    }
}

#[test]
fn worked_example_gaps_match_the_expected_splits() {
    let test = gapper::generate(SAMPLE, &Preferences::default()).unwrap();
    let pairs: Vec<(&str, &str)> = test
        .gaps
        .iter()
        .map(|g| (g.prefix.as_str(), g.missing.as_str()))
        .collect();
    assert_eq!(pairs, vec![
        ("Lear", "ning"),
        ("ne", "w"),
        ("lan", "guage"),
        ("requ", "ires"),
        ("expo", "sure"),
    ]);
}

#[test]
fn hint_is_monotonic_and_idempotent_at_the_ceiling() {
    let mut record = GapRecord {
        id: "gap-1".to_string(),
        prefix: "Lear".to_string(),
        missing: "ning".to_string(),
        revealed: 0,
    };
    let revealed: Vec<String> = (0..4).map(|_| grading::hint(&mut record)).collect();
    assert_eq!(revealed, vec!["n", "ni", "nin", "ning"]);
    for _ in 0..3 {
        assert_eq!(grading::hint(&mut record), "ning");
        assert_eq!(record.revealed, 4);
    }
}

#[test]
fn score_total_always_equals_gap_count() {
    let mut exercise = Exercise::from_text(SAMPLE, &Preferences::default()).unwrap();
    assert_eq!(exercise.score().total, exercise.gap_count());

    exercise.slots[0].value = "ning".to_string();
    exercise.slots[1].value = "W".to_string(); // case-insensitive match
    exercise.slots[2].value = "wrong".to_string();
    let score = exercise.score();
    assert_eq!(score.total, 5);
    assert_eq!(score.correct, 2);
}

#[test]
fn check_answer_is_case_insensitive_but_accent_sensitive() {
    let record = GapRecord {
        id: "gap-1".to_string(),
        prefix: "".to_string(),
        missing: "Sure".to_string(),
        revealed: 0,
    };
    assert_eq!(grading::check_answer(&record, "sure"), AnswerStatus::Correct);

    let record = GapRecord {
        id: "gap-2".to_string(),
        prefix: "".to_string(),
        missing: "sure".to_string(),
        revealed: 0,
    };
    assert_eq!(
        grading::check_answer(&record, "süre"),
        AnswerStatus::Incorrect
    );
}

#[test]
fn gaps_are_addressable_by_id() {
    let exercise = Exercise::from_text(SAMPLE, &Preferences::default()).unwrap();
    let slot = exercise.slot_by_id("gap-2").unwrap();
    assert_eq!(slot.record.prefix, "ne");
    assert_eq!(slot.record.missing, "w");
    assert!(exercise.slot_by_id("gap-99").is_none());
}

#[test]
fn reveal_all_marks_every_gap_correct() {
    let mut exercise = Exercise::from_text(SAMPLE, &Preferences::default()).unwrap();
    exercise.reveal_all();
    let score = exercise.score();
    assert_eq!(score.correct, score.total);
}

#[test]
fn store_recovers_from_corruption_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();

    // Fresh store: defaults
    assert_eq!(store.load_preferences(), Preferences::default());
    assert!(!store.load_panel_collapsed());

    // Round trip
    let prefs = Preferences {
        start_sentence: 2,
        skip_words_shorter_than: 4,
        capitalize_hints: false,
    };
    store.save_preferences(&prefs);
    store.save_panel_collapsed(true);
    assert_eq!(store.load_preferences(), prefs);
    assert!(store.load_panel_collapsed());

    // Corruption falls back to defaults without failing
    fs::write(dir.path().join("preferences.json"), "][ not json").unwrap();
    assert_eq!(store.load_preferences(), Preferences::default());
}

#[test]
fn partial_preferences_file_merges_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    fs::write(
        dir.path().join("preferences.json"),
        r#"{"capitalize_hints": false}"#,
    )
    .unwrap();
    let prefs = store.load_preferences();
    assert!(!prefs.capitalize_hints);
    assert_eq!(prefs.start_sentence, 1);
    assert_eq!(prefs.skip_words_shorter_than, 3);
}

#[test]
fn strip_markdown_flattens_an_issue_body() {
    let body = "# Project description\n\nBuild a **collaborative** [editor](https://example.com).\n\n```js\nconsole.log('hi');\n```\n\n> It should be `fast`.\n";
    let stripped = markdown::strip_markdown(body);
    assert!(stripped.contains("Project description"));
    assert!(stripped.contains("Build a collaborative editor."));
    assert!(stripped.contains("It should be fast."));
    assert!(!stripped.contains('#'));
    assert!(!stripped.contains('*'));
    assert!(!stripped.contains('`'));
    assert!(!stripped.contains('['));
}
