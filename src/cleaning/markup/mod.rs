// Markup noise
// HTML, page-layout directives, renderer metadata and whitespace clean-up.


use fancy_regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::debug;

use crate::Result;
use crate::catalog::{PatternCatalog, TryRegex};
use crate::cleaning::css::strip_css;
use crate::cleaning::markdown::fix_markdown;

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("regex is valid"));
static TRAILING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("regex is valid"));
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("regex is valid"));

/// Trim the document, squeeze blank-line runs to one blank line, drop
/// trailing spaces and squeeze space runs
#[inline]
pub fn normalize_whitespace(text: &str) -> Result<String> {
    let text = BLANK_LINES.try_replace_all(text.trim(), "\n\n")?;
    let text = TRAILING_SPACE.try_replace_all(&text, "\n")?;
    Ok(SPACE_RUNS.try_replace_all(&text, " ")?.into_owned())
}

/// Keep only the text content of anything that looks like HTML
#[inline]
pub fn strip_html(text: &str, catalog: &PatternCatalog) -> Result<String> {
    if !catalog.has_html_tag(text)? {
        return Ok(text.to_string());
    }
    let document = Html::parse_document(text);
    let content: String = document.root_element().text().collect();
    // The parser leaves behind fragments it could not pair up
    catalog.strip_html_tags(&content)
}

#[inline]
pub fn strip_formatters(text: &str, catalog: &PatternCatalog) -> String {
    text.split('\n')
        .map(|line| {
            catalog
                .formatters()
                .iter()
                .fold(line.to_string(), |acc, formatter| acc.replace(formatter.as_str(), ""))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Remove renderer front matter: fenced blocks holding metadata keys,
/// leftover fence markers and the platform's injected header
#[inline]
pub fn strip_metadata(text: &str, catalog: &PatternCatalog) -> Result<String> {
    let lines: Vec<&str> = text.split('\n').collect();
    let fence_lines: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.contains("```"))
        .map(|(i, _)| i)
        .collect();

    let mut blocks = Vec::new();
    for pair in fence_lines.chunks_exact(2) {
        let block = lines
            .get(pair[0]..=pair[1])
            .map(|block| block.join("\n"))
            .unwrap_or_default();
        if catalog
            .metadata_keywords()
            .iter()
            .any(|keyword| block.contains(keyword.as_str()))
        {
            blocks.push(block);
        }
    }

    let mut text = text.to_string();
    for block in &blocks {
        text = text.replace(block.as_str(), "");
    }
    debug!("Removed {} metadata blocks", blocks.len());

    let text = text.replace("```", "");
    catalog.strip_platform_boilerplate(&text)
}

/// Strip markup noise from a raw document.
///
/// Order matters: encoding repair first so tag and CSS patterns see real
/// characters, CSS after HTML so stylesheet text freed from `<style>` is
/// caught, whitespace last.
#[inline]
pub fn strip_markup_noise(
    text: &str,
    catalog: &PatternCatalog,
    css_warn_limit: usize,
) -> Result<String> {
    let text = catalog.fix_encoding(text);
    let text = strip_html(&text, catalog)?;
    let text = strip_formatters(&text, catalog);
    let text = strip_css(&text, catalog, css_warn_limit)?;
    let text = strip_metadata(&text, catalog)?;
    let text = fix_markdown(&text)?;
    normalize_whitespace(&text)
}
