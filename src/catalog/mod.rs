// Pattern catalog
// Raw pattern tables (built-in or loaded from TOML) and their compiled form.

pub mod builtin;


use anyhow::Context;
use fancy_regex::{Match, Regex, Replacer};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::{PrepError, Result};

/// A rewrite rule for credits written in ways the classifier cannot see.
/// Matches of `pattern` are cut out of the document and `append` is placed
/// after a horizontal rule at the end, where the relocator will pick it up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NuisanceCredit {
    pub pattern: String,
    pub append: String,
}

/// Uncompiled pattern tables, as written in a catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogSource {
    /// Use only the tables from this source instead of extending the built-in ones
    pub replace_builtin: bool,
    pub noisy_css: Vec<String>,
    pub formatters: Vec<String>,
    pub metadata_keywords: Vec<String>,
    pub platform_boilerplate: Vec<String>,
    pub hard_drop: Vec<String>,
    pub soft_drop: Vec<String>,
    pub splitters: Vec<String>,
    pub encoding_fixes: BTreeMap<String, String>,
    pub jargon: BTreeMap<String, String>,
    pub nuisance_credits: Vec<NuisanceCredit>,
}

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| (*s).to_string()).collect()
}

fn owned_pairs(table: &[(&str, &str)]) -> BTreeMap<String, String> {
    table
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

impl CatalogSource {
    /// The tables shipped with the crate
    #[inline]
    pub fn builtin() -> Self {
        Self {
            replace_builtin: false,
            noisy_css: owned(builtin::NOISY_CSS),
            formatters: owned(builtin::FORMATTERS),
            metadata_keywords: owned(builtin::METADATA_KEYWORDS),
            platform_boilerplate: owned(builtin::PLATFORM_BOILERPLATE),
            hard_drop: owned(builtin::HARD_DROP),
            soft_drop: owned(builtin::SOFT_DROP),
            splitters: owned(builtin::SPLITTERS),
            encoding_fixes: owned_pairs(builtin::ENCODING_FIXES),
            jargon: owned_pairs(builtin::JARGON),
            nuisance_credits: Vec::new(),
        }
    }

    #[inline]
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let source: CatalogSource = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        Ok(source)
    }

    /// Append every table of `other` to this one. Map entries in `other` win.
    #[inline]
    pub fn extend(&mut self, other: CatalogSource) {
        self.noisy_css.extend(other.noisy_css);
        self.formatters.extend(other.formatters);
        self.metadata_keywords.extend(other.metadata_keywords);
        self.platform_boilerplate.extend(other.platform_boilerplate);
        self.hard_drop.extend(other.hard_drop);
        self.soft_drop.extend(other.soft_drop);
        self.splitters.extend(other.splitters);
        self.encoding_fixes.extend(other.encoding_fixes);
        self.jargon.extend(other.jargon);
        self.nuisance_credits.extend(other.nuisance_credits);
    }
}

/// Matching that reports fancy-regex runtime failures (backtrack limit on
/// very long input) as [`PrepError::Regex`] instead of panicking or
/// reading them as "no match"
pub trait TryRegex {
    fn try_is_match(&self, text: &str) -> Result<bool>;
    fn try_find<'t>(&self, text: &'t str) -> Result<Option<Match<'t>>>;
    fn try_find_all<'t>(&self, text: &'t str) -> Result<Vec<Match<'t>>>;
    fn try_replace_all<'t, R: Replacer>(
        &self,
        text: &'t str,
        replacement: R,
    ) -> Result<Cow<'t, str>>;
}

fn regex_error(error: fancy_regex::Error) -> PrepError {
    PrepError::Regex(Box::new(error))
}

impl TryRegex for Regex {
    #[inline]
    fn try_is_match(&self, text: &str) -> Result<bool> {
        self.is_match(text).map_err(regex_error)
    }

    #[inline]
    fn try_find<'t>(&self, text: &'t str) -> Result<Option<Match<'t>>> {
        self.find(text).map_err(regex_error)
    }

    #[inline]
    fn try_find_all<'t>(&self, text: &'t str) -> Result<Vec<Match<'t>>> {
        self.find_iter(text)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(regex_error)
    }

    #[inline]
    fn try_replace_all<'t, R: Replacer>(
        &self,
        text: &'t str,
        replacement: R,
    ) -> Result<Cow<'t, str>> {
        self.try_replacen(text, 0, replacement).map_err(regex_error)
    }
}

fn any_match(regexes: &[Regex], text: &str) -> Result<bool> {
    for re in regexes {
        if re.try_is_match(text)? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn remove_all(regexes: &[Regex], text: &str) -> Result<String> {
    regexes.iter().try_fold(text.to_string(), |acc, re| {
        Ok(re.try_replace_all(&acc, "")?.into_owned())
    })
}

/// A jargon abbreviation and the phrase it expands to
#[derive(Debug, Clone)]
pub struct JargonRule {
    pub target: String,
    pub replacement: String,
    pattern: Regex,
}

impl JargonRule {
    /// Expand every standalone occurrence of the abbreviation (and its plural)
    #[inline]
    pub fn apply(&self, text: &str) -> Result<String> {
        self.pattern
            .try_replace_all(text, |caps: &fancy_regex::Captures| {
                let plural = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
                if !plural {
                    self.replacement.clone()
                } else if self.replacement.ends_with("ss") {
                    format!("{}es", self.replacement)
                } else if self.replacement.ends_with('s') {
                    self.replacement.clone()
                } else {
                    format!("{}s", self.replacement)
                }
            })
            .map(Cow::into_owned)
    }
}

#[derive(Debug, Clone)]
pub struct NuisanceRule {
    pub pattern: Regex,
    pub append: String,
}

/// Compiled form of a [`CatalogSource`]
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    noisy_css: Vec<Regex>,
    html_tag: Regex,
    url: Regex,
    formatters: Vec<String>,
    metadata_keywords: Vec<String>,
    platform_boilerplate: Vec<Regex>,
    hard_drop: Vec<Regex>,
    soft_drop: Vec<Regex>,
    splitters: Vec<Regex>,
    encoding_fixes: Vec<(String, String)>,
    jargon: Vec<JargonRule>,
    nuisance_credits: Vec<NuisanceRule>,
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| PrepError::Pattern {
        pattern: pattern.to_string(),
        source: Box::new(source),
    })
}

/// Compile a credit phrase so it only matches on word-ish boundaries, ignoring case
fn compile_guarded(pattern: &str) -> Result<Regex> {
    compile(&format!("(?i)(?<![A-Za-z])(?:{})(?![A-Za-z])", pattern))
}

impl Default for PatternCatalog {
    #[inline]
    fn default() -> Self {
        Self::compile(&CatalogSource::builtin()).expect("built-in patterns are valid")
    }
}

impl PatternCatalog {
    #[inline]
    pub fn compile(source: &CatalogSource) -> Result<Self> {
        let noisy_css = source
            .noisy_css
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;
        let platform_boilerplate = source
            .platform_boilerplate
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;
        let hard_drop = source
            .hard_drop
            .iter()
            .map(|p| compile_guarded(p))
            .collect::<Result<Vec<_>>>()?;
        let soft_drop = source
            .soft_drop
            .iter()
            .map(|p| compile_guarded(p))
            .collect::<Result<Vec<_>>>()?;
        let splitters = source
            .splitters
            .iter()
            .map(|p| compile_guarded(p))
            .collect::<Result<Vec<_>>>()?;

        let mut encoding_fixes: Vec<(String, String)> = source
            .encoding_fixes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        // Shorter keys are prefixes of longer ones ("â€" vs "â€™")
        encoding_fixes.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        let mut jargon = source
            .jargon
            .iter()
            .map(|(target, replacement)| {
                let pattern = compile(&format!(
                    "(?i)(?<![A-Za-z0-9]){}(s?)(?![A-Za-z0-9])",
                    fancy_regex::escape(target)
                ))?;
                Ok(JargonRule {
                    target: target.clone(),
                    replacement: replacement.clone(),
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        // "dnd5e" must be expanded before "dnd" and "5e" get a chance
        jargon.sort_by(|a, b| b.target.len().cmp(&a.target.len()));

        let nuisance_credits = source
            .nuisance_credits
            .iter()
            .map(|rule| {
                Ok(NuisanceRule {
                    pattern: compile(&format!("(?i){}", rule.pattern))?,
                    append: rule.append.replace("\\n", "\n"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Compiled pattern catalog: {} css, {} hard-drop, {} soft-drop, {} jargon",
            noisy_css.len(),
            hard_drop.len(),
            soft_drop.len(),
            jargon.len()
        );

        Ok(Self {
            noisy_css,
            html_tag: compile(builtin::HTML_TAG)?,
            url: compile(builtin::URL)?,
            formatters: source.formatters.clone(),
            metadata_keywords: source.metadata_keywords.clone(),
            platform_boilerplate,
            hard_drop,
            soft_drop,
            splitters,
            encoding_fixes,
            jargon,
            nuisance_credits,
        })
    }

    /// Built-in tables, extended (or replaced) by the catalog file at `path`
    #[inline]
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let file = CatalogSource::from_toml_file(path)?;
        if file.replace_builtin {
            return Self::compile(&file);
        }
        let mut source = CatalogSource::builtin();
        source.extend(file);
        Self::compile(&source)
    }

    #[inline]
    pub fn matches_noisy_css(&self, line: &str) -> Result<bool> {
        any_match(&self.noisy_css, line)
    }

    #[inline]
    pub fn has_html_tag(&self, text: &str) -> Result<bool> {
        self.html_tag.try_is_match(text)
    }

    #[inline]
    pub fn strip_html_tags(&self, text: &str) -> Result<String> {
        Ok(self.html_tag.try_replace_all(text, "")?.into_owned())
    }

    #[inline]
    pub fn url(&self) -> &Regex {
        &self.url
    }

    #[inline]
    pub fn formatters(&self) -> &[String] {
        &self.formatters
    }

    #[inline]
    pub fn metadata_keywords(&self) -> &[String] {
        &self.metadata_keywords
    }

    #[inline]
    pub fn strip_platform_boilerplate(&self, text: &str) -> Result<String> {
        remove_all(&self.platform_boilerplate, text)
    }

    #[inline]
    pub fn fix_encoding(&self, text: &str) -> String {
        self.encoding_fixes
            .iter()
            .fold(text.to_string(), |acc, (broken, fixed)| {
                if acc.contains(broken.as_str()) {
                    acc.replace(broken.as_str(), fixed)
                } else {
                    acc
                }
            })
    }

    #[inline]
    pub fn any_hard_drop(&self, text: &str) -> Result<bool> {
        any_match(&self.hard_drop, text)
    }

    #[inline]
    pub fn any_soft_drop(&self, text: &str) -> Result<bool> {
        any_match(&self.soft_drop, text)
    }

    /// True when any hard-drop, soft-drop or splitter phrase occurs in `text`
    #[inline]
    pub fn any_credit_pattern(&self, text: &str) -> Result<bool> {
        Ok(self.any_soft_drop(text)?
            || self.any_hard_drop(text)?
            || any_match(&self.splitters, text)?)
    }

    #[inline]
    pub fn remove_hard_drop(&self, text: &str) -> Result<String> {
        remove_all(&self.hard_drop, text)
    }

    #[inline]
    pub fn remove_soft_drop(&self, text: &str) -> Result<String> {
        remove_all(&self.soft_drop, text)
    }

    /// Cut `text` at the first match of each splitter phrase in turn
    #[inline]
    pub fn truncate_at_splitters<'t>(&self, text: &'t str) -> Result<&'t str> {
        let mut text = text;
        for re in &self.splitters {
            if let Some(m) = re.try_find(text)? {
                text = text.get(..m.start()).unwrap_or(text);
            }
        }
        Ok(text)
    }

    #[inline]
    pub fn jargon(&self) -> &[JargonRule] {
        &self.jargon
    }

    #[inline]
    pub fn nuisance_credits(&self) -> &[NuisanceRule] {
        &self.nuisance_credits
    }
}
