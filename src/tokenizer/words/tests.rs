use super::*;

fn tokens(text: &str) -> Vec<String> {
    word_tokenize(text)
}

#[test]
fn punctuation_is_separated() {
    assert_eq!(
        tokens("the goblin, hungry, attacks!"),
        vec!["the", "goblin", ",", "hungry", ",", "attacks", "!"]
    );
    assert_eq!(
        tokens("(see page one) \"quoted\""),
        vec!["(", "see", "page", "one", ")", "\"", "quoted", "\""]
    );
}

#[test]
fn sentence_periods_are_split() {
    assert_eq!(
        tokens("it ends. then again."),
        vec!["it", "ends", ".", "then", "again", "."]
    );
}

#[test]
fn dotted_abbreviations_stay_whole() {
    assert_eq!(tokens("tools e.g. rope"), vec!["tools", "e.g.", "rope"]);
    assert_eq!(tokens("wait..."), vec!["wait", "..."]);
}

#[test]
fn clitics_are_split() {
    assert_eq!(tokens("don't stop"), vec!["do", "n't", "stop"]);
    assert_eq!(tokens("it's the dm's turn."), vec!["it", "'s", "the", "dm", "'s", "turn", "."]);
    assert_eq!(tokens("the players' dice"), vec!["the", "players", "'", "dice"]);
    assert_eq!(tokens("you cannot"), vec!["you", "can", "not"]);
}

#[test]
fn hyphens_and_numbers_stay_whole() {
    assert_eq!(tokens("a co-op game"), vec!["a", "co-op", "game"]);
    assert_eq!(tokens("1,000 gold, 2.5 lbs"), vec!["1,000", "gold", ",", "2.5", "lbs"]);
}

#[test]
fn empty_text_has_no_tokens() {
    assert!(tokens("  \n ").is_empty());
}

#[test]
fn large_text_is_tokenized() {
    let text = "The goblin chief swings his rusty axe, and misses badly. ".repeat(20_000);
    assert!(text.len() > 1_000_000);
    let tokens = tokens(&text);
    assert_eq!(tokens.len(), 12 * 20_000);
    assert_eq!(&tokens[..3], ["The", "goblin", "chief"]);
}
