use criterion::{Criterion, criterion_group, criterion_main};
use homebrew_prep::tokenizer::{TokenizerConfig, VocabularyTokenizer};
use std::fs;
use std::hint::black_box;
use std::path::Path;

const EMBEDDING_VOCAB: &[&str] = &[
    "the", "a", "an", "of", "at", "you", "your", "to", "and", "on", "in", "is", "it", "its",
    "level", "learn", "cantrip", "deals", "damage", "hit", "range", "fire", "light", "star",
    "fireball", "ember", "bolt", "soul", "cinder", "resistance", "attack", "roll", "target",
    "takes", "extra", "creature", "each", "line", "beam", "wide", "long", "cloud", "falls",
    "casting", "time", "action", "ash", "court", "sorcery", "sorcerer", "spells", "lance",
];

pub fn criterion_benchmark(c: &mut Criterion) {
    let sample_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("benches/sample_homebrew.md");
    let sample = fs::read_to_string(sample_path).expect("can read sample document");
    let corpus: Vec<String> = (0..20).map(|_| sample.clone()).collect();

    c.bench_function("fit", |b| {
        b.iter(|| {
            let mut tokenizer = VocabularyTokenizer::new(
                EMBEDDING_VOCAB.iter().copied(),
                TokenizerConfig::default(),
            );
            tokenizer.fit(black_box(corpus.clone()));
            tokenizer
        })
    });

    let mut tokenizer =
        VocabularyTokenizer::new(EMBEDDING_VOCAB.iter().copied(), TokenizerConfig::default());
    tokenizer.fit(corpus);
    c.bench_function("tokenize", |b| {
        b.iter(|| tokenizer.tokenize(black_box(&sample)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
