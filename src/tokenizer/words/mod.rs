// Word tokenization
// Treebank-style splitting: punctuation and brackets become their own tokens,
// clitics are split off ("don't" -> "do", "n't"), hyphenated and dotted words
// stay whole.

#[cfg(test)]
mod tests;

use fancy_regex::Regex;
use std::sync::LazyLock;

const CLITICS: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'m", "'d", "'"];

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("regex is valid")
}

// Plain patterns only: without lookaround or backreferences matching runs on
// the linear engine and cannot hit a backtracking limit
static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (re(r#"""#), r#" " "#),
        (re(r"\.\.\."), " ... "),
        // Commas and colons, except inside numbers
        (re(r"([:,])([^0-9])"), " $1 $2"),
        (re(r"([:,])$"), " $1 "),
        (re(r"[;@#$%&?!]"), " $0 "),
        (re(r"[\]\[(){}<>]"), " $0 "),
        (re(r"--"), " -- "),
        (re(r"(?i)\b(can)(not)\b"), " $1 $2 "),
        (re(r"(?i)\b(gon)(na)\b"), " $1 $2 "),
        (re(r"(?i)\b(got)(ta)\b"), " $1 $2 "),
        (re(r"(?i)\b(wan)(na)\b"), " $1 $2 "),
    ]
});

/// Split a trailing period off a word unless the word is a dotted
/// abbreviation ("e.g.", "u.s.")
fn split_period(token: &str) -> Vec<&str> {
    match token.strip_suffix('.') {
        Some(stem) if !stem.is_empty() && !stem.contains('.') => vec![stem, "."],
        _ => vec![token],
    }
}

fn split_clitic(token: &str) -> Vec<&str> {
    CLITICS
        .iter()
        .find_map(|clitic| {
            let split_at = token.len().checked_sub(clitic.len())?;
            let (stem, tail) = (token.get(..split_at)?, token.get(split_at..)?);
            if !tail.eq_ignore_ascii_case(clitic) || stem.is_empty() || stem.ends_with('\'') {
                return None;
            }
            Some(vec![stem, tail])
        })
        .unwrap_or_else(|| vec![token])
}

/// Split text into word and punctuation tokens
#[inline]
pub fn word_tokenize(text: &str) -> Vec<String> {
    let spaced = RULES.iter().fold(text.to_string(), |acc, (regex, replacement)| {
        regex.replace_all(&acc, *replacement).to_string()
    });

    spaced
        .split_whitespace()
        .flat_map(split_period)
        .flat_map(split_clitic)
        .map(str::to_string)
        .collect()
}
