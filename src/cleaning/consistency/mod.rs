// Consistency normalization
// A fixed chain of rewrites that makes hand-typed homebrew prose uniform:
// abbreviations spelled out, units and dice written as words, symbols and
// punctuation spaced predictably, odd characters dropped.


use fancy_regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::Result;
use crate::catalog::{PatternCatalog, TryRegex};
use crate::cleaning::markup::normalize_whitespace;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("regex is valid")
}

static EXCESSIVE_REPEATS: LazyLock<Regex> = LazyLock::new(|| re(r"([^#_0-9])\1\1+"));
static ELLIPSIS: LazyLock<Regex> = LazyLock::new(|| re(r"\.\.+"));

static SLANG: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (re(r"(?i)(?<![^\s])w/(?!o)(?![A-Za-z])"), "with "),
        (re(r"(?i)(?<![^\s])w/o(?![A-Za-z])"), "without"),
        (re(r"(?i)(?<![^\s])a\.?k\.?a\.?(?![A-Za-z])"), "also known as "),
        (re(r"(?i)(?<![^\s])i\.?e\.?(?![A-Za-z])"), "ie "),
        (re(r"(?i)(?<![^\s])e\.?g\.?(?![A-Za-z])"), "eg "),
        (re(r"(?i)(?<![^\s])ex[.:](?![A-Za-z])"), "for example "),
    ]
});

static GLUED_KNOWN: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?<=[^\s-])(?<!un)known"));

static COMPONENTS: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)(?<![A-Za-z])([vsm]((, ?)|( ?/ ?))?){2,3}(?![A-Za-z])"));

static LETTER_LIST: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?<![^\s])[A-Z]\)"));
static EMPTY_PARENS: LazyLock<Regex> = LazyLock::new(|| re(r"\(\s*\)"));

static FEET: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?<![A-Za-z])( ?-? ?)ft\.?(?![A-Za-z])"));
static METERS: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?<=[0-9])( ?-? ?)m\.?(?![A-Za-z])"));
static POUNDS: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)(?<![A-Za-z])( ?-? ?)lbs?\.?(?![A-Za-z])"));

static LVL: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?<![A-Za-z])lvl?(?![A-Za-z])"));
static GLUED_LEVEL: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?<=[^\s])level"));

static DMG: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        re(
            r"(?i)(acid|bludgeoning|cold|fire|force|lightning|necrotic|piercing|poison|psychic|radiant|slashing|thunder|[0-9]) ?dmg",
        ),
        re(r"(?i)dmg (resistance|from|to|by)"),
        re(r"(?i)(take|resist|deal|roll) dmg"),
    ]
});

static SYMBOL_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| re(r"[^ |/+=÷×*]?[|/+=÷×*][^ |/+=÷×*]?"));
static REDDIT_USER: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)/ ?u/ ?"));
static REDDIT_SUB: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)/ ?r/ ?"));

static STRENGTH: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)([0-9])(str)"));

static VERSION: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)(?<![A-Za-z])v(er)?\.? ?([0-9])"));
static DICE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?<![A-Za-z])([0-9]*)[dD]([0-9]+)[sS]?(?![A-Za-z])"));

static DIGIT_LETTER: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)([0-9])(?!st|nd|rd|th)([A-Za-z])"));
static LETTER_DIGIT: LazyLock<Regex> = LazyLock::new(|| re(r"([A-Za-z])([0-9])"));

static PERIOD: LazyLock<Regex> = LazyLock::new(|| re(r"\.(?=[^\s0-9.])"));
static CLAUSE_PUNCT: LazyLock<Regex> = LazyLock::new(|| re(r"([,!?])(?=[^\s0-9,!?])"));

static SYMBOL_RUNS: LazyLock<Regex> = LazyLock::new(|| re(r"\+{2,}|-{2,}|/{2,}|\|{2,}|\.{2,}|:{2,}"));

static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"[^0-9A-Za-zŽžÀ-ÿ!@#$%&|/+=÷×*\[\];:_'()",./?><\s-]"#)
});

fn replace(regex: &Regex, text: &str, replacement: &str) -> Result<String> {
    Ok(regex.try_replace_all(text, replacement)?.into_owned())
}

fn fix_excessive_repeats(text: &str) -> Result<String> {
    let text = replace(&EXCESSIVE_REPEATS, text, "$1")?;
    replace(&ELLIPSIS, &text, ".")
}

fn fix_slang(text: &str) -> Result<String> {
    SLANG
        .iter()
        .try_fold(text.to_string(), |acc, (regex, expansion)| {
            replace(regex, &acc, expansion)
        })
}

fn fix_jargon(text: &str, catalog: &PatternCatalog) -> Result<String> {
    catalog
        .jargon()
        .iter()
        .try_fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

fn fix_known(text: &str) -> Result<String> {
    Ok(GLUED_KNOWN
        .try_replace_all(text, |caps: &Captures| format!(" {}", &caps[0]))?
        .into_owned())
}

/// Spell out spell components (`V, S, M`) on lines that list them
fn fix_components(text: &str) -> Result<String> {
    let mut lines = Vec::new();
    for line in text.split('\n') {
        let lower = line.to_lowercase();
        if !lower.contains("components:") && !lower.contains("vsm") {
            lines.push(line.to_string());
            continue;
        }
        let spelled = COMPONENTS.try_replace_all(line, |caps: &Captures| {
            caps[0]
                .to_lowercase()
                .chars()
                .map(|c| match c {
                    'v' => "Verbal".to_string(),
                    's' => "Somatic".to_string(),
                    'm' => "Material".to_string(),
                    other => other.to_string(),
                })
                .collect::<String>()
        })?;
        lines.push(spelled.into_owned());
    }
    Ok(lines.join("\n"))
}

fn remove_letter_lists(text: &str) -> Result<String> {
    let text = replace(&LETTER_LIST, text, " ")?;
    replace(&EMPTY_PARENS, &text, " ")
}

fn fix_units(text: &str) -> Result<String> {
    let text = replace(&FEET, text, " foot ")?;
    let text = replace(&METERS, &text, " meters ")?;
    replace(&POUNDS, &text, " pounds ")
}

fn fix_level(text: &str) -> Result<String> {
    if !text.to_lowercase().contains("lv") && !text.contains("level") {
        return Ok(text.to_string());
    }
    let text = replace(&LVL, text, "level ")?;
    let text = text.replace("-level", " level");
    replace(&GLUED_LEVEL, &text, " level")
}

fn fix_damage(text: &str) -> Result<String> {
    if !text.to_lowercase().contains("dmg") {
        return Ok(text.to_string());
    }
    DMG.iter().try_fold(text.to_string(), |acc, regex| {
        Ok(regex
            .try_replace_all(&acc, |caps: &Captures| {
                caps[0].to_lowercase().replace("dmg", " damage ")
            })?
            .into_owned())
    })
}

fn pad_symbols(text: &str) -> Result<String> {
    let text = SYMBOL_PHRASE
        .try_replace_all(text, |caps: &Captures| {
            caps[0]
                .chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        })?
        .into_owned();
    let text = replace(&REDDIT_USER, &text, "/u/")?;
    replace(&REDDIT_SUB, &text, "/r/")
}

fn fix_strength(text: &str) -> Result<String> {
    replace(&STRENGTH, text, "$1 $2")
}

fn fix_version_and_dice(text: &str) -> Result<String> {
    let text = replace(&VERSION, text, "version $2")?;
    let text = DICE.try_replace_all(&text, |caps: &Captures| {
        let quantity = &caps[1];
        let sides = &caps[2];
        if quantity.is_empty() {
            return format!("{} sided die", sides);
        }
        let noun = match quantity.parse::<u64>() {
            Ok(0 | 1) => "die",
            _ => "dice",
        };
        format!("{} {} sided {}", quantity, sides, noun)
    })?;
    Ok(text.into_owned())
}

/// Separate letters from numbers they are glued to, except ordinal suffixes
fn space_numbers_and_letters(text: &str) -> Result<String> {
    let text = replace(&DIGIT_LETTER, text, "$1 $2")?;
    replace(&LETTER_DIGIT, &text, "$1 $2")
}

fn fix_punctuation(text: &str) -> Result<String> {
    let text = replace(&PERIOD, text, ". ")?;
    replace(&CLAUSE_PUNCT, &text, "$1 ")
}

fn reduce_symbol_runs(text: &str) -> Result<String> {
    Ok(SYMBOL_RUNS
        .try_replace_all(text, |caps: &Captures| {
            caps[0].chars().next().map(String::from).unwrap_or_default()
        })?
        .into_owned())
}

/// Run the full normalization chain over a document.
///
/// Fails with [`crate::PrepError::Regex`] when a lookaround pattern exceeds
/// its backtracking limit, which happens on very large single documents.
#[inline]
pub fn make_consistent(text: &str, catalog: &PatternCatalog) -> Result<String> {
    let text = fix_excessive_repeats(text)?;
    let text = fix_slang(&text)?;
    let text = fix_jargon(&text, catalog)?;
    let text = fix_known(&text)?;
    let text = text.replace('&', " and ");
    let text = fix_components(&text)?;
    let text = remove_letter_lists(&text)?;
    let text = fix_units(&text)?;
    let text = fix_level(&text)?;
    let text = fix_damage(&text)?;
    let text = pad_symbols(&text)?;
    let text = fix_strength(&text)?;
    let text = fix_version_and_dice(&text)?;
    let text = space_numbers_and_letters(&text)?;
    let text = fix_punctuation(&text)?;
    let text = reduce_symbol_runs(&text)?;
    let text = normalize_whitespace(&text)?;
    replace(&DISALLOWED, &text, "")
}
