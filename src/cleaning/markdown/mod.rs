// Markdown helpers
// Structural fixes for hand-written markdown plus heading-based sectioning.


use fancy_regex::Regex;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::catalog::TryRegex;
use crate::{PrepError, Result};

static MISSPACED_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#+[^\s#]").expect("regex is valid"));

static HEADER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n#+ ").expect("regex is valid"));

/// A heading and the markdown beneath it, up to the next heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: String,
    /// 1-6 for headed sections, 0 for text before the first heading
    pub header_level: u8,
}

const LEADING_MARKERS: &[char] = &['>', '-', ' '];

/// Strip blockquote and list markers (and surrounding whitespace) from every line
fn strip_leading_markers(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.trim()
                .trim_start_matches(LEADING_MARKERS)
                .trim_start()
                .trim_start_matches(LEADING_MARKERS)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `#Title` is not a heading to a markdown parser; make it `# Title`
fn fix_misspaced_headers(text: &str) -> Result<String> {
    let lines = text
        .split('\n')
        .map(|line| {
            // Anchored at line start, so at most one match per line
            MISSPACED_HEADER.try_replace_all(line, |caps: &fancy_regex::Captures| {
                let matched = &caps[0];
                let mut chars = matched.chars();
                let last = chars.next_back().unwrap_or_default();
                format!("{} {}", chars.as_str(), last)
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

fn remove_empty_headers(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.contains('#') || !line.replace('#', "").trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Repair the markdown mistakes that stop headings from being recognised.
///
/// Leading `>` and `-` markers are removed from every line, so list items and
/// block quotes lose theirs too.
#[inline]
pub fn fix_markdown(text: &str) -> Result<String> {
    let text = strip_leading_markers(text);
    let text = fix_misspaced_headers(&text)?;
    Ok(remove_empty_headers(&text))
}

/// Depth of the shallowest `#` header in the document.
///
/// Fails with [`PrepError::NoHeaders`] when there is none.
#[inline]
pub fn min_header_level(text: &str) -> Result<usize> {
    let text = format!("\n{}", text);
    HEADER_MARKER
        .try_find_all(&text)?
        .iter()
        .map(|m| m.as_str().len() - 2)
        .min()
        .ok_or(PrepError::NoHeaders)
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Split a document into its headed sections
#[inline]
pub fn sections(markdown: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut heading = String::new();
    let mut level = 0u8;
    let mut in_heading = false;
    let mut content_start = 0usize;

    let mut push_section = |heading: &str, level: u8, content: &str| {
        let content = content.trim();
        if !(heading.is_empty() && content.is_empty()) {
            sections.push(Section {
                heading: heading.trim().to_string(),
                content: content.to_string(),
                header_level: level,
            });
        }
    };

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                let content = markdown.get(content_start..range.start).unwrap_or_default();
                push_section(&heading, level, content);
                heading.clear();
                in_heading = true;
            }
            Event::End(TagEnd::Heading(heading_level)) => {
                level = heading_level_to_u8(heading_level);
                in_heading = false;
                content_start = range.end;
            }
            Event::Text(text) | Event::Code(text) if in_heading => {
                heading.push_str(&text);
            }
            _ => {}
        }
    }

    let content = markdown.get(content_start..).unwrap_or_default();
    push_section(&heading, level, content);

    sections
}
