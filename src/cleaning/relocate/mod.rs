// Credit relocation
// Authors often tuck credits under a horizontal rule at the end of a section
// instead of giving them a heading. This moves such trailing credit blocks to
// the end of the document under a proper header.

#[cfg(test)]
mod tests;

use fancy_regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::Result;
use crate::catalog::{PatternCatalog, TryRegex};
use crate::cleaning::credits::CreditClassifier;
use crate::cleaning::markdown::min_header_level;

static HEADER_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n#+\s*").expect("regex is valid"));

static RULE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{3,}").expect("regex is valid"));

/// Whether a document could hold credits hidden behind a horizontal rule
#[inline]
pub fn needs_relocation(text: &str, catalog: &PatternCatalog) -> Result<bool> {
    Ok(text.contains("___") && catalog.any_credit_pattern(text)?)
}

fn split_regex<'t>(regex: &Regex, text: &'t str) -> Result<Vec<&'t str>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in regex.try_find_all(text)? {
        pieces.push(text.get(last..m.start()).unwrap_or_default());
        last = m.end();
    }
    pieces.push(text.get(last..).unwrap_or_default());
    Ok(pieces)
}

/// Remove the first occurrence of `segment` that directly follows a rule of
/// three or more underscores, along with the rule
fn excise_after_rule(text: &str, segment: &str) -> Option<String> {
    text.match_indices(segment).find_map(|(start, _)| {
        let head = text.get(..start)?;
        let rule_start = head.trim_end_matches('_').len();
        if start - rule_start < 3 {
            return None;
        }
        let tail = text.get(start + segment.len()..)?;
        Some(format!("{}{}", text.get(..rule_start)?, tail))
    })
}

fn clean_heading(heading: &str) -> &str {
    heading
        .trim_matches('*')
        .trim_start_matches(['>', '-', ' '])
}

fn relocate_section(
    text: String,
    section: &str,
    level: usize,
    classifier: &CreditClassifier<'_>,
) -> Result<String> {
    let segments = split_regex(&RULE_SPLIT, section)?;
    let Some((first, rest)) = segments.split_first() else {
        return Ok(text);
    };

    let first_line = first.split('\n').next().unwrap_or_default();
    if classifier.is_credit(first_line, first)? {
        // The whole section is credits already; it stays where it is
        return Ok(text);
    }

    let mut text = text;
    for segment in rest {
        let trimmed = segment.trim_start();
        let heading = trimmed.split('\n').next().unwrap_or_default();
        if !classifier.is_credit(heading, trimmed)? {
            continue;
        }
        let Some(excised) = excise_after_rule(&text, segment) else {
            continue;
        };

        let body = trimmed.strip_prefix(heading).unwrap_or(trimmed).trim();
        let heading = clean_heading(heading);
        debug!("Relocating credit block '{}'", heading);
        text = format!(
            "{}\n\n{} {}\n{}",
            excised.trim_end(),
            "#".repeat(level),
            heading,
            body
        );
    }

    Ok(text)
}

/// Move credit blocks hidden behind horizontal rules to the end of the
/// document, each under a header at the document's shallowest depth.
///
/// Fails with [`crate::PrepError::NoHeaders`] if the document has no headers.
#[inline]
pub fn relocate_credits(text: &str, classifier: &CreditClassifier<'_>) -> Result<String> {
    let level = min_header_level(text)?;
    let original = format!("\n{}", text);

    let sections: Vec<&str> = split_regex(&HEADER_SPLIT, &original)?
        .into_iter()
        .filter(|section| section.contains("___"))
        .collect();

    let mut relocated = original.clone();
    for section in &sections {
        relocated = relocate_section(relocated, section, level, classifier)?;
    }

    if relocated != original {
        info!("Relocated credit blocks to the end of the document");
    }

    Ok(relocated.trim_start().to_string())
}
