// Numeric literals to words
// Cardinals, decimals, comma-grouped thousands and ordinal suffixes are spelled
// out in British-style English ("one hundred and one", "twenty-first").


use fancy_regex::{Captures, Regex};
use std::sync::LazyLock;

const ONES: &[&str] = &[
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
];
const TENS: &[&str] = &[
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];
const SCALE: &[&str] = &[
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
];
const DIGITS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

// Linear-time pattern, safe on documents of any size
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[0-9]+,+)*[0-9]+(?:\.[0-9]+|st|nd|rd|th)?").expect("regex is valid")
});

fn under_hundred(n: u64) -> String {
    let n = n as usize;
    if n < 20 {
        return ONES.get(n).copied().unwrap_or_default().to_string();
    }
    let tens = TENS.get(n / 10).copied().unwrap_or_default();
    match ONES.get(n % 10).copied().unwrap_or_default() {
        "" => tens.to_string(),
        ones => format!("{}-{}", tens, ones),
    }
}

fn under_thousand(n: u64) -> String {
    let hundreds = n / 100;
    let rest = n % 100;
    match (hundreds, rest) {
        (0, rest) => under_hundred(rest),
        (hundreds, 0) => format!("{} hundred", under_hundred(hundreds)),
        (hundreds, rest) => format!("{} hundred and {}", under_hundred(hundreds), under_hundred(rest)),
    }
}

/// Spell out a non-negative integer
#[inline]
pub fn number_to_words(n: u64) -> String {
    if n == 0 {
        return "zero".to_string();
    }

    let mut chunks = Vec::new();
    let mut remaining = n;
    while remaining > 0 {
        chunks.push(remaining % 1000);
        remaining /= 1000;
    }

    let mut parts = Vec::new();
    for (scale, &chunk) in chunks.iter().enumerate().rev() {
        if chunk == 0 {
            continue;
        }
        let words = under_thousand(chunk);
        let scale_word = SCALE.get(scale).copied().unwrap_or_default();
        if scale_word.is_empty() {
            // "one thousand and five"
            if n >= 1000 && chunk < 100 {
                parts.push(format!("and {}", words));
            } else {
                parts.push(words);
            }
        } else {
            parts.push(format!("{} {}", words, scale_word));
        }
    }
    parts.join(" ")
}

/// Spell out an ordinal ("twenty-first", "one hundredth")
#[inline]
pub fn ordinal_to_words(n: u64) -> String {
    let words = number_to_words(n);
    let split_at = words.rfind(['-', ' ']).map(|i| i + 1).unwrap_or(0);
    let (prefix, last) = words.split_at(split_at);

    let last = match last {
        "one" => "first".to_string(),
        "two" => "second".to_string(),
        "three" => "third".to_string(),
        "five" => "fifth".to_string(),
        "eight" => "eighth".to_string(),
        "nine" => "ninth".to_string(),
        "twelve" => "twelfth".to_string(),
        other if other.ends_with('y') => format!("{}ieth", other.trim_end_matches('y')),
        other => format!("{}th", other),
    };
    format!("{}{}", prefix, last)
}

fn digits_to_words(digits: &str) -> String {
    digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| DIGITS.get(d as usize).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn integer_to_words(digits: &str) -> String {
    match digits.parse::<u64>() {
        Ok(n) => number_to_words(n),
        // Too large to read as a quantity
        Err(_) => digits_to_words(digits),
    }
}

fn literal_to_words(literal: &str) -> String {
    let literal = literal.replace(',', "").to_lowercase();

    if let Some(digits) = ORDINAL_SUFFIXES
        .iter()
        .find_map(|suffix| literal.strip_suffix(*suffix))
    {
        return match digits.parse::<u64>() {
            Ok(n) => ordinal_to_words(n),
            Err(_) => digits_to_words(digits),
        };
    }

    match literal.split_once('.') {
        Some((whole, fraction)) => format!(
            "{} point {}",
            integer_to_words(whole),
            digits_to_words(fraction)
        ),
        None => integer_to_words(&literal),
    }
}

/// Replace every numeric literal in `text` with its spelled-out form
#[inline]
pub fn convert_numbers(text: &str) -> String {
    NUMBER
        .replace_all(text, |caps: &Captures| literal_to_words(&caps[0]))
        .to_string()
}
