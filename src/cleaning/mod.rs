// Document cleaning pipeline
// Raw scraped markdown in, cleaned text out. Every stage is a pure function of
// the text, so documents can be cleaned in parallel.

pub mod consistency;
pub mod credits;
pub mod css;
pub mod links;
pub mod markdown;
pub mod markup;
pub mod relocate;

#[cfg(test)]
mod tests;

use fancy_regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

use crate::catalog::{PatternCatalog, TryRegex};
use crate::{PrepError, Result};
use credits::{CreditClassifier, DEFAULT_CREDIT_THRESHOLD, rewrite_nuisance_credits};
use css::DEFAULT_WARN_LIMIT;

static RESIDUAL_RULES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__+").expect("regex is valid"));

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CleaningConfig {
    /// Unrecognised lines allowed inside an open brace block
    pub css_warn_limit: usize,
    /// Share of a heading or body that credit phrases must cover
    pub credit_threshold: f64,
    pub relocate_credits: bool,
    pub normalize_consistency: bool,
    /// Documents cleaned concurrently by the batch command
    pub jobs: usize,
}

impl Default for CleaningConfig {
    #[inline]
    fn default() -> Self {
        Self {
            css_warn_limit: DEFAULT_WARN_LIMIT,
            credit_threshold: DEFAULT_CREDIT_THRESHOLD,
            relocate_credits: true,
            normalize_consistency: true,
            jobs: 4,
        }
    }
}

/// A scraped document. Its cleaned text is set once and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: u64,
    pub raw_text: String,
    cleaned_text: Option<String>,
}

impl Document {
    #[inline]
    pub fn new(id: u64, raw_text: impl Into<String>) -> Self {
        Self {
            id,
            raw_text: raw_text.into(),
            cleaned_text: None,
        }
    }

    #[inline]
    pub fn cleaned_text(&self) -> Option<&str> {
        self.cleaned_text.as_deref()
    }

    #[inline]
    pub fn is_cleaned(&self) -> bool {
        self.cleaned_text.is_some()
    }
}

#[derive(Debug)]
pub struct DocumentFailure {
    pub id: u64,
    pub error: PrepError,
}

/// Result of cleaning a batch: what succeeded and what did not
#[derive(Debug, Default)]
pub struct BatchReport {
    pub cleaned: Vec<Document>,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Clone)]
pub struct DocumentCleaner {
    catalog: Arc<PatternCatalog>,
    config: CleaningConfig,
}

impl DocumentCleaner {
    #[inline]
    pub fn new(catalog: Arc<PatternCatalog>, config: CleaningConfig) -> Self {
        Self { catalog, config }
    }

    #[inline]
    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    #[inline]
    pub fn classifier(&self) -> CreditClassifier<'_> {
        CreditClassifier::new(&self.catalog, self.config.credit_threshold)
    }

    /// Strip markup noise only (HTML, layout directives, CSS, metadata,
    /// broken markdown, excess whitespace)
    #[inline]
    pub fn strip_noise(&self, text: &str) -> Result<String> {
        markup::strip_markup_noise(text, &self.catalog, self.config.css_warn_limit)
    }

    /// Run the whole pipeline over one text
    #[inline]
    pub fn clean_text(&self, text: &str) -> Result<String> {
        let text = rewrite_nuisance_credits(text, &self.catalog)?;
        let text = self.strip_noise(&text)?;
        let text = links::strip_links_and_images(&text, &self.catalog)?;

        // Leftover column header from stripped statblock tables
        let text = text
            .split('\n')
            .filter(|line| line.trim() != "Num")
            .collect::<Vec<_>>()
            .join("\n");

        let text = if self.config.relocate_credits && relocate::needs_relocation(&text, &self.catalog)?
        {
            relocate::relocate_credits(&text, &self.classifier())?
        } else {
            text
        };

        let text = RESIDUAL_RULES.try_replace_all(&text, "")?.into_owned();

        let text = if self.config.normalize_consistency {
            consistency::make_consistent(&text, &self.catalog)?
        } else {
            text
        };

        Ok(text.trim().to_string())
    }

    /// Clean a document in place, returning its cleaned text.
    /// A document that is already cleaned is returned as is.
    #[inline]
    pub fn clean<'d>(&self, document: &'d mut Document) -> Result<&'d str> {
        if document.cleaned_text.is_none() {
            debug!("Cleaning document {}", document.id);
            document.cleaned_text = Some(self.clean_text(&document.raw_text)?);
        }
        Ok(document.cleaned_text.as_deref().unwrap_or_default())
    }

    /// Clean every document, collecting failures instead of stopping at the first
    #[inline]
    pub fn clean_batch(&self, documents: Vec<Document>) -> BatchReport {
        let mut report = BatchReport::default();

        for mut document in documents {
            match self.clean(&mut document) {
                Ok(_) => report.cleaned.push(document),
                Err(error) => {
                    warn!("Failed to clean document {}: {}", document.id, error);
                    report.failures.push(DocumentFailure {
                        id: document.id,
                        error,
                    });
                }
            }
        }

        info!(
            "Cleaned {} documents, {} failed",
            report.cleaned.len(),
            report.failures.len()
        );
        report
    }
}
