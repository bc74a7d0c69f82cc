#[cfg(test)]
mod tests;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::ops::Range;
use tracing::debug;

use crate::Result;
use crate::catalog::{PatternCatalog, TryRegex};

/// Share of a line that may be link noise before the whole line goes
pub const LINK_LINE_THRESHOLD: f64 = 0.4;

struct OpenSpan {
    range: Range<usize>,
    is_image: bool,
    label: String,
}

/// Byte ranges of outermost links and images, with what should replace them
fn link_edits(text: &str) -> Vec<(Range<usize>, String)> {
    let mut edits = Vec::new();
    let mut stack: Vec<OpenSpan> = Vec::new();

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::Image { .. }) => stack.push(OpenSpan {
                range,
                is_image: true,
                label: String::new(),
            }),
            Event::Start(Tag::Link { .. }) => stack.push(OpenSpan {
                range,
                is_image: false,
                label: String::new(),
            }),
            Event::Text(t) | Event::Code(t) => {
                if let Some(open) = stack.last_mut() {
                    if !open.is_image {
                        open.label.push_str(&t);
                    }
                }
            }
            Event::End(TagEnd::Image | TagEnd::Link) => {
                let Some(open) = stack.pop() else {
                    continue;
                };
                if stack.is_empty() {
                    let replacement = if open.is_image { String::new() } else { open.label };
                    edits.push((open.range, replacement));
                }
            }
            _ => {}
        }
    }

    edits
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Remove images, reduce links to their label and drop bare URLs.
///
/// A line that loses at least 40% of its characters this way is dropped
/// entirely unless it is a header.
#[inline]
pub fn strip_links_and_images(text: &str, catalog: &PatternCatalog) -> Result<String> {
    if !text.contains("](") && !catalog.url().try_is_match(text)? {
        return Ok(text.to_string());
    }

    let edits = link_edits(text);
    let mut edited = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for (range, replacement) in &edits {
        edited.push_str(text.get(cursor..range.start).unwrap_or_default());
        edited.push_str(replacement);
        cursor = range.end;
    }
    edited.push_str(text.get(cursor..).unwrap_or_default());

    let edited = catalog.url().try_replace_all(&edited, "")?.into_owned();
    debug!("Rewrote {} links/images", edits.len());

    let original_lines: Vec<&str> = text.split('\n').collect();
    let edited_lines: Vec<&str> = edited.split('\n').collect();
    if original_lines.len() != edited_lines.len() {
        // A link spanning lines was collapsed; per-line shares are meaningless
        return Ok(edited);
    }

    Ok(edited_lines
        .into_iter()
        .zip(original_lines)
        .filter(|(edited, original)| {
            if original.is_empty() || original.contains('#') {
                return true;
            }
            let removed = 1.0 - char_len(edited) as f64 / char_len(original) as f64;
            removed < LINK_LINE_THRESHOLD
        })
        .map(|(edited, _)| edited)
        .collect::<Vec<_>>()
        .join("\n"))
}
