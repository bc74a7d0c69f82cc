use super::*;

fn tag(text: &str) -> Vec<&'static str> {
    let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    HeuristicTagger
        .tag(&tokens)
        .iter()
        .map(PosTag::as_str)
        .collect()
}

#[test]
fn one_tag_per_token() {
    let tokens: Vec<String> = ["the", "wyvern", "flies", "."]
        .iter()
        .map(|t| t.to_string())
        .collect();
    assert_eq!(HeuristicTagger.tag(&tokens).len(), tokens.len());
    assert!(HeuristicTagger.tag(&[]).is_empty());
}

#[test]
fn closed_classes() {
    assert_eq!(
        tag("the wyvern and its rider in a cave"),
        vec!["DET", "NOUN", "CONJ", "PRON", "NOUN", "ADP", "DET", "NOUN"]
    );
}

#[test]
fn numbers_and_punctuation() {
    assert_eq!(tag("twenty-one 3.5 , !"), vec!["NUM", "NUM", "PUNCT", "PUNCT"]);
    assert_eq!(tag("x2"), vec!["X"]);
}

#[test]
fn suffixes_and_context() {
    assert_eq!(tag("quickly"), vec!["ADV"]);
    assert_eq!(tag("venomous"), vec!["ADJ"]);
    assert_eq!(tag("they attacked"), vec!["PRON", "VERB"]);
    assert_eq!(tag("the burning"), vec!["DET", "NOUN"]);
    assert_eq!(tag("you must flee"), vec!["PRON", "VERB", "VERB"]);
    assert_eq!(tag("to smite"), vec!["PRT", "VERB"]);
}

#[test]
fn placeholders() {
    assert_eq!(PosTag::Noun.placeholder(), "<NOUN>");
    assert_eq!(PosTag::Punct.to_string(), "PUNCT");
}
