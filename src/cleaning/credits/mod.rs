// Credit classification
// Decides whether a heading/body pair is credits, thanks or promotion rather
// than game content, based on how much of it the credit phrase tables eat.

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::Result;
use crate::catalog::{PatternCatalog, TryRegex};
use crate::cleaning::markdown::{Section, sections};

pub const DEFAULT_CREDIT_THRESHOLD: f64 = 0.4;

/// Outcome of classifying one heading/body pair, with the evidence behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditVerdict {
    pub is_credit: bool,
    /// The heading contained a hard-drop phrase
    pub hard_drop: bool,
    /// Share of the heading's characters removed by the phrase tables
    pub heading_filtered: f64,
    /// Share of the body removed; `None` when the heading alone decided
    pub content_filtered: Option<f64>,
}

/// A document split into its content sections and its credit sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditPartition {
    pub main_text: String,
    pub credit_text: String,
    pub num_sections: usize,
    pub num_credit_sections: usize,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn filtered_share(after: &str, before: &str) -> f64 {
    let before = char_len(before);
    if before == 0 {
        return 0.0;
    }
    1.0 - char_len(after) as f64 / before as f64
}

#[derive(Debug, Clone, Copy)]
pub struct CreditClassifier<'a> {
    catalog: &'a PatternCatalog,
    threshold: f64,
}

impl<'a> CreditClassifier<'a> {
    #[inline]
    pub fn new(catalog: &'a PatternCatalog, threshold: f64) -> Self {
        Self { catalog, threshold }
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Remove credit phrases from a section body, line by line
    fn strip_body(&self, text: &str) -> Result<String> {
        let mut text = self.catalog.truncate_at_splitters(text)?.to_string();

        if self.catalog.any_hard_drop(&text)? {
            let edited = self.catalog.remove_hard_drop(&text)?;
            let original_lines: Vec<&str> = text.split('\n').collect();
            let edited_lines: Vec<&str> = edited.split('\n').collect();
            text = if original_lines.len() == edited_lines.len() {
                // Any line a hard-drop phrase touched goes entirely
                original_lines
                    .into_iter()
                    .zip(edited_lines)
                    .filter(|(original, edited)| original == edited)
                    .map(|(original, _)| original)
                    .collect::<Vec<_>>()
                    .join("\n")
            } else {
                edited
            };
        }

        if self.catalog.any_soft_drop(&text)? {
            let edited = self.catalog.remove_soft_drop(&text)?;
            text = text
                .split('\n')
                .zip(edited.split('\n'))
                .filter(|(original, edited)| {
                    original.is_empty() || filtered_share(edited, original) < self.threshold
                })
                .map(|(_, edited)| edited)
                .collect::<Vec<_>>()
                .join("\n");
        }

        Ok(text)
    }

    /// Classify a heading and its body.
    ///
    /// The heading is checked first: a hard-drop phrase, or soft-drop phrases
    /// covering at least the threshold share of it, settle the question
    /// without looking at the body.
    #[inline]
    pub fn classify(&self, heading: &str, content: &str) -> Result<CreditVerdict> {
        let content = content.strip_prefix(heading).unwrap_or(content);

        let (heading_filtered, hard_drop) = if heading.is_empty() {
            (0.0, false)
        } else {
            let truncated = self.catalog.truncate_at_splitters(heading)?;
            if self.catalog.any_hard_drop(truncated)? {
                (1.0, true)
            } else {
                let stripped = self.catalog.remove_soft_drop(truncated)?;
                (filtered_share(&stripped, heading), false)
            }
        };

        if heading_filtered >= self.threshold {
            return Ok(CreditVerdict {
                is_credit: true,
                hard_drop,
                heading_filtered,
                content_filtered: None,
            });
        }

        let content_filtered = if content.is_empty() {
            0.0
        } else {
            filtered_share(&self.strip_body(content)?, content)
        };

        Ok(CreditVerdict {
            is_credit: content_filtered >= self.threshold,
            hard_drop,
            heading_filtered,
            content_filtered: Some(content_filtered),
        })
    }

    #[inline]
    pub fn is_credit(&self, heading: &str, content: &str) -> Result<bool> {
        Ok(self.classify(heading, content)?.is_credit)
    }

    /// Split a document's sections into content and credits
    #[inline]
    pub fn partition_sections(&self, text: &str) -> Result<CreditPartition> {
        let mut main = Vec::new();
        let mut credits = Vec::new();

        for section in sections(text) {
            if self.is_credit(&section.heading, &section.content)? {
                credits.push(render_section(&section));
            } else {
                main.push(render_section(&section));
            }
        }

        debug!(
            "Partitioned {} sections, {} credit",
            main.len() + credits.len(),
            credits.len()
        );

        Ok(CreditPartition {
            num_sections: main.len() + credits.len(),
            num_credit_sections: credits.len(),
            main_text: main.join("\n\n"),
            credit_text: credits.join("\n\n"),
        })
    }
}

fn render_section(section: &Section) -> String {
    if section.header_level == 0 {
        return section.content.clone();
    }
    let marker = "#".repeat(usize::from(section.header_level));
    if section.content.is_empty() {
        format!("{} {}", marker, section.heading)
    } else {
        format!("{} {}\n{}", marker, section.heading, section.content)
    }
}

/// Apply the catalog's nuisance-credit rules.
///
/// Each matching rule cuts its matches out of the text and appends its
/// replacement after a horizontal rule at the end of the document.
#[inline]
pub fn rewrite_nuisance_credits(text: &str, catalog: &PatternCatalog) -> Result<String> {
    let mut text = text.to_string();
    for rule in catalog.nuisance_credits() {
        if rule.pattern.try_is_match(&text)? {
            debug!("Nuisance credit rule matched: {}", rule.pattern.as_str());
            text = rule.pattern.try_replace_all(&text, "\n")?.into_owned();
            text = format!("{}\n___\n{}", text.trim_end(), rule.append);
        }
    }
    Ok(text)
}
