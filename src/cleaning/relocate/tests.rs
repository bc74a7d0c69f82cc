use super::*;
use crate::PrepError;
use crate::cleaning::credits::DEFAULT_CREDIT_THRESHOLD;

fn relocate(text: &str) -> Result<String> {
    let catalog = PatternCatalog::default();
    let classifier = CreditClassifier::new(&catalog, DEFAULT_CREDIT_THRESHOLD);
    relocate_credits(text, &classifier)
}

#[test]
fn credit_block_moves_after_all_sections() {
    let text = "# Spells\nFireball burns.\n___\nCredits\nArt by Jane\n\n## Items\nA sword.";
    let relocated = relocate(text).expect("document has headers");
    assert_eq!(
        relocated,
        "# Spells\nFireball burns.\n\n## Items\nA sword.\n\n# Credits\nArt by Jane"
    );

    let credit_pos = relocated.find("# Credits").expect("credit header exists");
    let items_pos = relocated.find("## Items").expect("items header exists");
    assert!(credit_pos > items_pos);
}

#[test]
fn heading_markup_is_cleaned() {
    let text = "## Spells\nFireball.\n___\n**Credits**\nArt by Jane";
    assert_eq!(
        relocate(text).expect("document has headers"),
        "## Spells\nFireball.\n\n## Credits\nArt by Jane"
    );
}

#[test]
fn credit_sections_stay_in_place() {
    let text = "# Credits\nArt by X\n___\nThanks to Y";
    assert_eq!(relocate(text).expect("document has headers"), text);
}

#[test]
fn content_after_rules_is_left_alone() {
    let text = "# Lore\nOld tales.\n___\nThe river runs red.";
    assert_eq!(relocate(text).expect("document has headers"), text);
}

#[test]
fn documents_without_headers_fail() {
    let result = relocate("Just text\n___\nCredits\nArt by Jane");
    assert!(matches!(result, Err(PrepError::NoHeaders)));
}

#[test]
fn relocation_gate() {
    let catalog = PatternCatalog::default();
    let gate = |text: &str| needs_relocation(text, &catalog).expect("gate should be checked");
    assert!(!gate("# Title\nCredits"));
    assert!(!gate("# Title\n___\nThe river runs red."));
    assert!(gate("# Title\n___\nCredits"));
}

#[test]
fn excise_requires_a_rule() {
    assert_eq!(
        excise_after_rule("abc___def", "def").as_deref(),
        Some("abc")
    );
    assert_eq!(excise_after_rule("abc__def", "def"), None);
}
