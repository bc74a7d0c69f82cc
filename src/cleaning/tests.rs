use super::*;

fn cleaner(config: CleaningConfig) -> DocumentCleaner {
    DocumentCleaner::new(Arc::new(PatternCatalog::default()), config)
}

fn without_consistency() -> CleaningConfig {
    CleaningConfig {
        normalize_consistency: false,
        ..CleaningConfig::default()
    }
}

fn broken_css() -> String {
    let mut text = String::from("# Title\nBroken {\n");
    for _ in 0..10 {
        text.push_str("A line of prose\n");
    }
    text
}

#[test]
fn default_config() {
    let config = CleaningConfig::default();
    assert_eq!(config.css_warn_limit, 7);
    assert!((config.credit_threshold - 0.4).abs() < f64::EPSILON);
    assert!(config.relocate_credits);
    assert!(config.normalize_consistency);
    assert_eq!(config.jobs, 4);
}

#[test]
fn pipeline_relocates_hidden_credits() {
    let text = "<p>Intro</p>\n#Spells\nFireball burns.\n___\nCredits\nArt by Jane\n\n## Items\nA sword.";
    let cleaned = cleaner(without_consistency())
        .clean_text(text)
        .expect("document should clean successfully");
    assert_eq!(
        cleaned,
        "Intro\n# Spells\nFireball burns.\n\n## Items\nA sword.\n\n# Credits\nArt by Jane"
    );
}

#[test]
fn rules_are_removed_when_relocation_is_off() {
    let config = CleaningConfig {
        relocate_credits: false,
        ..without_consistency()
    };
    let cleaned = cleaner(config)
        .clean_text("# Spells\nFireball burns.\n___\nCredits\nArt by Jane")
        .expect("document should clean successfully");
    assert_eq!(cleaned, "# Spells\nFireball burns.\n\nCredits\nArt by Jane");
}

#[test]
fn statblock_column_headers_are_dropped() {
    let cleaned = cleaner(without_consistency())
        .clean_text("# Goblin\nNum\nHP 7")
        .expect("document should clean successfully");
    assert_eq!(cleaned, "# Goblin\nHP 7");
}

#[test]
fn consistency_runs_last() {
    let cleaned = cleaner(CleaningConfig::default())
        .clean_text("# Goblin\nIt deals 1d6 dmg")
        .expect("document should clean successfully");
    assert_eq!(cleaned, "# Goblin\nIt deals 1 6 sided die damage");
}

#[test]
fn cleaned_text_is_computed_once() {
    let cleaner = cleaner(without_consistency());
    let mut document = Document::new(7, "#Title\nBody  text");
    assert!(!document.is_cleaned());

    let first = cleaner
        .clean(&mut document)
        .expect("document should clean successfully")
        .to_string();
    assert_eq!(first, "# Title\nBody text");
    assert!(document.is_cleaned());

    document.raw_text = String::from("something else entirely");
    let second = cleaner
        .clean(&mut document)
        .expect("cached text should be returned");
    assert_eq!(second, first);
    assert_eq!(document.cleaned_text(), Some(first.as_str()));
}

#[test]
fn batch_collects_failures() {
    let cleaner = cleaner(without_consistency());
    let documents = vec![
        Document::new(1, "# One\nFirst body"),
        Document::new(2, broken_css()),
        Document::new(3, "# Three\nThird body"),
    ];

    let report = cleaner.clean_batch(documents);

    let cleaned_ids: Vec<u64> = report.cleaned.iter().map(|d| d.id).collect();
    assert_eq!(cleaned_ids, vec![1, 3]);
    assert!(report.cleaned.iter().all(Document::is_cleaned));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, 2);
    assert!(matches!(
        report.failures[0].error,
        PrepError::CssDetection { .. }
    ));
}

#[test]
fn headerless_credit_documents_fail() {
    let result = cleaner(without_consistency()).clean_text("Just text\n___\nCredits\nArt by Jane");
    assert!(matches!(result, Err(PrepError::NoHeaders)));
}

#[test]
fn oversized_document_fails_alone_in_a_batch() {
    let cleaner = cleaner(CleaningConfig::default());
    let huge = format!(
        "# Goblin\n{}",
        "The goblin chief swings his rusty axe at the paladin and misses badly. ".repeat(20_000)
    );
    assert!(huge.len() > 1_000_000);
    let documents = vec![
        Document::new(1, "# Goblin\nIt deals 1d6 dmg"),
        Document::new(2, huge),
    ];

    let report = cleaner.clean_batch(documents);

    let cleaned_ids: Vec<u64> = report.cleaned.iter().map(|d| d.id).collect();
    assert_eq!(cleaned_ids, vec![1]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, 2);
    assert!(matches!(report.failures[0].error, PrepError::Regex(_)));
}
