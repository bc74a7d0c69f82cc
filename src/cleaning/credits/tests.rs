use super::*;
use crate::catalog::{CatalogSource, NuisanceCredit};

fn catalog() -> PatternCatalog {
    PatternCatalog::default()
}

#[test]
fn credits_heading_with_empty_body() {
    let catalog = catalog();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    let verdict = classifier
        .classify("Credits", "")
        .expect("classification should succeed");
    assert!(verdict.is_credit);
    assert!(!verdict.hard_drop);
    assert!((verdict.heading_filtered - 1.0).abs() < f64::EPSILON);
    assert_eq!(verdict.content_filtered, None);
}

#[test]
fn ordinary_section_is_not_credit() {
    let catalog = catalog();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    let verdict = classifier
        .classify(
            "Introduction",
            "The village of Thornwall sits at the edge of a forest.",
        )
        .expect("classification should succeed");
    assert!(!verdict.is_credit);
    assert_eq!(verdict.content_filtered, Some(0.0));
}

#[test]
fn hard_drop_heading_is_credit() {
    let catalog = catalog();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    let verdict = classifier
        .classify("Support me on Patreon", "Every dollar helps.")
        .expect("classification should succeed");
    assert!(verdict.is_credit);
    assert!(verdict.hard_drop);
    assert_eq!(verdict.content_filtered, None);
}

#[test]
fn body_evidence_decides_plain_heading() {
    let catalog = catalog();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    let verdict = classifier
        .classify(
            "The End",
            "Art by Jane Doe\nThanks to my playtesters\nCopyright 2021 Someone",
        )
        .expect("classification should succeed");
    assert!(verdict.is_credit);
    assert!(verdict.content_filtered.is_some_and(|share| share > 0.4));
}

#[test]
fn splitter_truncates_body() {
    let catalog = catalog();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    assert!(
        classifier
            .is_credit(
                "Farewell",
                "Good luck, adventurers!\nSupported By\nAlice\nBob\nCarol"
            )
            .expect("classification should succeed")
    );
}

#[test]
fn heading_prefix_is_ignored_in_body() {
    let catalog = catalog();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    let verdict = classifier
        .classify("Goblins", "Goblins\nGoblins live in caves.")
        .expect("classification should succeed");
    assert!(!verdict.is_credit);
}

#[test]
fn threshold_is_configurable() {
    let catalog = catalog();
    let lenient = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    let strict = CreditClassifier::new(&catalog, 0.9);
    assert!(
        lenient
            .is_credit("Credits and Lore", "")
            .expect("classification should succeed")
    );
    assert!(
        !strict
            .is_credit("Credits and Lore", "")
            .expect("classification should succeed")
    );
    assert!((strict.threshold() - 0.9).abs() < f64::EPSILON);
}

#[test]
fn partition_separates_credit_sections() {
    let catalog = catalog();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    let text = "# Goblin King\nThe goblin king rules the caves.\n\n## Credits\nArt by Jane Doe";
    let partition = classifier
        .partition_sections(text)
        .expect("partition should succeed");
    assert_eq!(partition.num_sections, 2);
    assert_eq!(partition.num_credit_sections, 1);
    assert_eq!(
        partition.main_text,
        "# Goblin King\nThe goblin king rules the caves."
    );
    assert_eq!(partition.credit_text, "## Credits\nArt by Jane Doe");
}

#[test]
fn nuisance_rules_move_credit_to_the_end() {
    let mut source = CatalogSource::builtin();
    source.nuisance_credits.push(NuisanceCredit {
        pattern: "art by [a-z]+ on deviantart".to_string(),
        append: "## Credits\\nArt from deviantart".to_string(),
    });
    let catalog = PatternCatalog::compile(&source).expect("catalog should compile");

    let text = "# Map\nA map. Art by bob on DeviantArt\nMore.";
    assert_eq!(
        rewrite_nuisance_credits(text, &catalog).expect("rules should apply"),
        "# Map\nA map. \n\nMore.\n___\n## Credits\nArt from deviantart"
    );
}

#[test]
fn nuisance_rules_without_match_leave_text() {
    let catalog = catalog();
    assert_eq!(
        rewrite_nuisance_credits("# Title\nBody", &catalog).expect("rules should apply"),
        "# Title\nBody"
    );
}
