use criterion::{Criterion, black_box, criterion_group, criterion_main};

use clozer::engine::gapper;
use clozer::engine::tokenizer;
use clozer::store::schema::Preferences;

fn make_text(paragraphs: usize) -> String {
    let paragraph = "Learning a new language requires exposure to meaningful content. \
        The second half of words is removed to assess language proficiency. \
        Typically the learner fills each gap and receives immediate feedback!";
    let mut text = String::with_capacity(paragraph.len() * paragraphs);
    for _ in 0..paragraphs {
        text.push_str(paragraph);
        text.push('\n');
    }
    text
}

fn bench_split_sentences(c: &mut Criterion) {
    let text = make_text(100);

    c.bench_function("split_sentences (100 paragraphs)", |b| {
        b.iter(|| tokenizer::split_sentences(black_box(&text)))
    });
}

fn bench_generate(c: &mut Criterion) {
    let text = make_text(100);
    let prefs = Preferences::default();

    c.bench_function("generate (100 paragraphs)", |b| {
        b.iter(|| gapper::generate(black_box(&text), black_box(&prefs)))
    });
}

fn bench_generate_from_sentence_ten(c: &mut Criterion) {
    let text = make_text(100);
    let prefs = Preferences {
        start_sentence: 10,
        ..Preferences::default()
    };

    c.bench_function("generate starting at sentence 10", |b| {
        b.iter(|| gapper::generate(black_box(&text), black_box(&prefs)))
    });
}

criterion_group!(
    benches,
    bench_split_sentences,
    bench_generate,
    bench_generate_from_sentence_ten
);
criterion_main!(benches);
