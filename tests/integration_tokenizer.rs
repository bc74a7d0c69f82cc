#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

// Integration tests for fitting a vocabulary on disk and tokenizing with it

use std::fs;
use tempfile::TempDir;

use homebrew_prep::commands::{TokenizedDocument, fit_vocabulary, read_corpus, tokenize_documents};
use homebrew_prep::config::Config;
use homebrew_prep::tokenizer::{Corpus, Vocabulary};

fn create_test_setup() -> anyhow::Result<(Config, TempDir)> {
    let temp_dir = TempDir::new()?;
    let corpus = temp_dir.path().join("corpus");
    fs::create_dir_all(&corpus)?;

    fs::write(corpus.join("1.txt"), "fire fire fire fire fire fireball")?;
    fs::write(corpus.join("2.txt"), "ball ball ball ball ball")?;
    fs::write(temp_dir.path().join("embedding.txt"), "the\n\nGoblin\n")?;

    let config = Config {
        base_dir: temp_dir.path().join("config"),
        ..Config::default()
    };
    Ok((config, temp_dir))
}

#[test]
fn corpus_formats() {
    let temp_dir = TempDir::new().expect("should create TempDir successfully");

    let text = temp_dir.path().join("corpus.txt");
    fs::write(&text, "one big text").expect("can write corpus");
    assert_eq!(
        read_corpus(&text).expect("text corpus should load"),
        Corpus::Text("one big text".to_string())
    );

    let array = temp_dir.path().join("corpus.json");
    fs::write(&array, r#"["first", "second"]"#).expect("can write corpus");
    assert_eq!(
        read_corpus(&array).expect("json corpus should load"),
        Corpus::Documents(vec!["first".to_string(), "second".to_string()])
    );

    let number = temp_dir.path().join("number.json");
    fs::write(&number, "42").expect("can write corpus");
    assert!(read_corpus(&number).is_err());
}

#[test]
fn fit_then_tokenize() {
    let (config, temp_dir) = create_test_setup().expect("can create test setup");

    let vocabulary_path = fit_vocabulary(
        &config,
        &temp_dir.path().join("corpus"),
        &temp_dir.path().join("embedding.txt"),
        None,
    )
    .expect("should fit vocabulary successfully");
    assert_eq!(vocabulary_path, config.vocabulary_path());

    let vocabulary = Vocabulary::load(&vocabulary_path).expect("vocabulary should load");
    assert!(vocabulary.in_vocab("goblin"));
    assert!(vocabulary.common_vocab().contains("fire"));
    assert!(vocabulary.common_vocab().contains("ball"));

    let input = temp_dir.path().join("documents");
    fs::create_dir_all(&input).expect("can create input dir");
    fs::write(input.join("3.txt"), "the fireball").expect("can write document");
    fs::write(input.join("4.txt"), "the wyvern").expect("can write document");
    let output = temp_dir.path().join("tokens.jsonl");

    let count = tokenize_documents(&config, &input, None, Some(output.as_path()))
        .expect("should tokenize successfully");
    assert_eq!(count, 2);

    let lines: Vec<TokenizedDocument> = fs::read_to_string(&output)
        .expect("output should be readable")
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be json"))
        .collect();
    assert_eq!(
        lines,
        vec![
            TokenizedDocument {
                id: 3,
                tokens: vec!["the".to_string(), "fire".to_string(), "ball".to_string()],
            },
            TokenizedDocument {
                id: 4,
                tokens: vec!["the".to_string(), "<NOUN>".to_string()],
            },
        ]
    );

    // Resolved unknowns are kept for the next run
    let vocabulary = Vocabulary::load(&vocabulary_path).expect("vocabulary should load");
    assert_eq!(
        vocabulary.mapping("wyvern"),
        Some(["<NOUN>".to_string()].as_slice())
    );
}

#[test]
fn tokenize_requires_a_fitted_vocabulary() {
    let (config, temp_dir) = create_test_setup().expect("can create test setup");
    let result = tokenize_documents(&config, &temp_dir.path().join("corpus"), None, None);
    assert!(result.is_err());
}
