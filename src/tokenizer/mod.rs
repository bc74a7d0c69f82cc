// Vocabulary-aware tokenizer
// Learns from a corpus how to map spelling variants and compound words onto
// tokens an embedding vocabulary knows, then applies those mappings, falling
// back to placeholders for whatever stays unknown.

pub mod numbers;
pub mod pos;
pub mod splitter;
pub mod words;


use anyhow::Context;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::{PrepError, Result};
use numbers::convert_numbers;
use pos::{HeuristicTagger, PosTag, PosTagger};
use splitter::TokenSplitter;
use words::word_tokenize;

/// Characters that separate spelling variants of the same word
pub const DELIMITERS: [char; 3] = ['-', '\'', '.'];

/// Longer tokens are never searched for compound splits
pub const MAX_SPLIT_LENGTH: usize = 25;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Corpus frequency at which a token counts as common
    pub min_counts_common_token: usize,
    pub min_subtoken_size: usize,
    pub max_subtokens: usize,
    /// Replacement for unknown tokens; empty means tag them by part of speech
    pub unknown_token: String,
}

impl Default for TokenizerConfig {
    #[inline]
    fn default() -> Self {
        Self {
            min_counts_common_token: 5,
            min_subtoken_size: 3,
            max_subtokens: 2,
            unknown_token: String::new(),
        }
    }
}

/// Text to fit on: one string, or a list of documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Corpus {
    Text(String),
    Documents(Vec<String>),
}

impl Corpus {
    /// The whole corpus as one text, documents separated by newlines
    #[inline]
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Documents(documents) => Cow::Owned(documents.join("\n")),
        }
    }

    #[inline]
    pub fn documents(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::Documents(documents) => documents.iter().map(String::as_str).collect(),
        }
    }
}

impl From<String> for Corpus {
    #[inline]
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Corpus {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<String>> for Corpus {
    #[inline]
    fn from(documents: Vec<String>) -> Self {
        Self::Documents(documents)
    }
}

impl From<Vec<&str>> for Corpus {
    #[inline]
    fn from(documents: Vec<&str>) -> Self {
        Self::Documents(documents.into_iter().map(str::to_string).collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for Corpus {
    type Error = PrepError;

    #[inline]
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::Text(text)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text),
                    other => Err(PrepError::CorpusType(format!(
                        "expected an array of strings, found an element that is {}",
                        json_kind(&other)
                    ))),
                })
                .collect::<Result<Vec<_>>>()
                .map(Self::Documents),
            other => Err(PrepError::CorpusType(format!(
                "expected a string or an array of strings, found {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Everything the tokenizer has learned.
///
/// A mapping never contains its own key and is never empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Vocabulary {
    embedding_vocab: BTreeSet<String>,
    common_vocab: BTreeSet<String>,
    token_mappings: BTreeMap<String, Vec<String>>,
    placeholders: BTreeSet<String>,
}

impl Vocabulary {
    #[inline]
    pub fn new<I, S>(embedding_vocab: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            embedding_vocab: embedding_vocab
                .into_iter()
                .map(|token| token.as_ref().to_lowercase())
                .collect(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file: {}", path.display()))?;
        Ok(serde_json::from_str(&content)?)
    }

    #[inline]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write vocabulary file: {}", path.display()))?;
        Ok(())
    }

    #[inline]
    pub fn embedding_vocab(&self) -> &BTreeSet<String> {
        &self.embedding_vocab
    }

    #[inline]
    pub fn common_vocab(&self) -> &BTreeSet<String> {
        &self.common_vocab
    }

    #[inline]
    pub fn token_mappings(&self) -> &BTreeMap<String, Vec<String>> {
        &self.token_mappings
    }

    #[inline]
    pub fn placeholders(&self) -> &BTreeSet<String> {
        &self.placeholders
    }

    #[inline]
    pub fn mapping(&self, token: &str) -> Option<&[String]> {
        self.token_mappings.get(token).map(Vec::as_slice)
    }

    /// In the embedding or common vocabulary
    #[inline]
    pub fn in_vocab(&self, token: &str) -> bool {
        self.embedding_vocab.contains(token) || self.common_vocab.contains(token)
    }

    /// Known in any way: vocabulary, mapping key or emitted placeholder
    #[inline]
    pub fn is_known(&self, token: &str) -> bool {
        self.in_vocab(token)
            || self.token_mappings.contains_key(token)
            || self.placeholders.contains(token)
    }

    /// Replace every token by its mapping; unmapped tokens stand for themselves
    #[inline]
    pub fn expand<I>(&self, tokens: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        tokens
            .into_iter()
            .flat_map(|token| match self.token_mappings.get(&token) {
                Some(mapped) => mapped.clone(),
                None => vec![token],
            })
            .collect()
    }

    /// Record a mapping, refusing empty or self-referencing ones
    #[inline]
    pub fn insert_mapping(&mut self, token: String, mapped: Vec<String>) -> bool {
        if mapped.is_empty() || mapped.contains(&token) {
            debug!("Refusing mapping {} -> {:?}", token, mapped);
            return false;
        }
        self.token_mappings.insert(token, mapped);
        true
    }

    #[inline]
    pub fn promote(&mut self, token: &str) {
        self.common_vocab.insert(token.to_string());
    }

    /// Remember how an unknown token was resolved
    fn resolve_unknown(&mut self, token: String, placeholder: &str) {
        if token != placeholder {
            self.insert_mapping(token, vec![placeholder.to_string()]);
        }
        self.placeholders.insert(placeholder.to_string());
    }
}

/// Tokenizer that maps text onto a known vocabulary.
///
/// `tokenize` takes `&mut self` because resolving an unknown token records
/// the resolution; share one behind a lock to tokenize from several threads.
#[derive(Debug, Clone)]
pub struct VocabularyTokenizer<T = HeuristicTagger> {
    vocabulary: Vocabulary,
    config: TokenizerConfig,
    splitter: TokenSplitter,
    tagger: T,
    fitted: bool,
}

impl VocabularyTokenizer<HeuristicTagger> {
    #[inline]
    pub fn new<I, S>(embedding_vocab: I, config: TokenizerConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_tagger(Vocabulary::new(embedding_vocab), config, HeuristicTagger)
    }

    /// Resume from a previously fitted vocabulary
    #[inline]
    pub fn from_vocabulary(vocabulary: Vocabulary, config: TokenizerConfig) -> Self {
        let mut tokenizer = Self::with_tagger(vocabulary, config, HeuristicTagger);
        tokenizer.fitted = true;
        tokenizer
    }
}

impl<T: PosTagger> VocabularyTokenizer<T> {
    #[inline]
    pub fn with_tagger(vocabulary: Vocabulary, config: TokenizerConfig, tagger: T) -> Self {
        let splitter = TokenSplitter::new(config.min_subtoken_size, config.max_subtokens);
        Self {
            vocabulary,
            config,
            splitter,
            tagger,
            fitted: false,
        }
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }

    #[inline]
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Learn variant, delimiter and compound mappings from a corpus
    #[inline]
    pub fn fit(&mut self, corpus: impl Into<Corpus>) {
        let corpus = corpus.into();
        let text = corpus.joined().to_lowercase();

        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for token in word_tokenize(&text) {
            *counts.entry(token).or_default() += 1;
        }
        debug!("Fitting on {} distinct tokens", counts.len());

        for delimiter in DELIMITERS {
            counts = self.merge_variants(counts, delimiter);
        }
        self.promote_common(&counts);
        counts.retain(|token, _| !self.vocabulary.embedding_vocab.contains(token));

        for delimiter in DELIMITERS {
            self.split_delimited(&mut counts, delimiter);
        }
        self.promote_common(&counts);

        self.split_compounds(&counts);
        self.fitted = true;

        info!(
            "Fitted tokenizer: {} common tokens, {} mappings",
            self.vocabulary.common_vocab.len(),
            self.vocabulary.token_mappings.len()
        );
    }

    /// Collapse tokens that only differ by `delimiter` onto one canonical
    /// variant: embedding vocabulary first, then frequency
    fn merge_variants(
        &mut self,
        counts: BTreeMap<String, usize>,
        delimiter: char,
    ) -> BTreeMap<String, usize> {
        let mut groups: BTreeMap<String, Vec<(String, usize)>> = BTreeMap::new();
        for (token, count) in counts {
            let base = token.replace(delimiter, "");
            // Punctuation and single letters carry no variant information
            if base.chars().count() <= 1 {
                continue;
            }
            groups.entry(base).or_default().push((token, count));
        }

        let mut merged = BTreeMap::new();
        for mut variants in groups.into_values() {
            let embedding = &self.vocabulary.embedding_vocab;
            variants.sort_by(|(a, a_count), (b, b_count)| {
                embedding
                    .contains(b)
                    .cmp(&embedding.contains(a))
                    .then(b_count.cmp(a_count))
                    .then(a.cmp(b))
            });

            let total: usize = variants.iter().map(|(_, count)| count).sum();
            let mut variants = variants.into_iter().map(|(token, _)| token);
            let Some(canonical) = variants.next() else {
                continue;
            };
            for variant in variants {
                debug!("Mapping variant '{}' to '{}'", variant, canonical);
                self.vocabulary
                    .insert_mapping(variant, vec![canonical.clone()]);
            }
            merged.insert(canonical, total);
        }
        merged
    }

    fn promote_common(&mut self, counts: &BTreeMap<String, usize>) {
        for (token, &count) in counts {
            if count >= self.config.min_counts_common_token {
                self.vocabulary.promote(token);
            }
        }
    }

    /// Split tokens on `delimiter` when at least one piece is already known,
    /// moving their counts onto the pieces
    fn split_delimited(&mut self, counts: &mut BTreeMap<String, usize>, delimiter: char) {
        let splits: Vec<(String, usize, Vec<String>)> = counts
            .iter()
            .filter(|(token, _)| token.contains(delimiter))
            .map(|(token, &count)| {
                let pieces = token
                    .split(delimiter)
                    .filter(|piece| !piece.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>();
                (token.clone(), count, pieces)
            })
            .filter(|(_, _, pieces)| pieces.iter().any(|piece| self.vocabulary.in_vocab(piece)))
            .collect();

        for (token, count, pieces) in splits {
            counts.remove(&token);
            for piece in pieces.iter().unique() {
                if let Some(piece_count) = counts.get_mut(piece) {
                    *piece_count += count;
                }
            }
            self.vocabulary.insert_mapping(token, pieces);
        }
    }

    /// Map remaining tokens onto their best split into common tokens
    fn split_compounds(&mut self, counts: &BTreeMap<String, usize>) {
        let min_length = 2 * self.config.min_subtoken_size;
        let common = &self.vocabulary.common_vocab;

        let splits: Vec<(String, Vec<String>)> = counts
            .keys()
            .filter(|token| !common.contains(*token))
            .filter(|token| {
                let length = token.chars().count();
                length >= min_length && length <= MAX_SPLIT_LENGTH
            })
            .filter(|token| token.chars().any(|c| c.is_ascii_alphabetic()))
            .filter_map(|token| {
                let split = self.splitter.best_split(token, common)?;
                Some((token.clone(), split))
            })
            .collect();

        debug!("Found {} compound tokens", splits.len());
        for (token, split) in splits {
            self.vocabulary.insert_mapping(token, split);
        }
    }

    /// Tokenize text, resolving and remembering unknown tokens
    #[inline]
    pub fn tokenize(&mut self, text: &str) -> Vec<String> {
        let text = convert_numbers(&text.to_lowercase());
        let mut tokens = self.vocabulary.expand(word_tokenize(&text));

        let unknown: Vec<usize> = tokens
            .iter()
            .positions(|token| !self.vocabulary.is_known(token))
            .collect();
        if unknown.is_empty() {
            return tokens;
        }
        debug!("Resolving {} unknown tokens", unknown.len());

        let placeholders: Vec<String> = if self.config.unknown_token.is_empty() {
            let tags = self.tagger.tag(&tokens);
            unknown
                .iter()
                .map(|&i| tags.get(i).unwrap_or(&PosTag::X).placeholder())
                .collect()
        } else {
            vec![self.config.unknown_token.clone(); unknown.len()]
        };

        for (&i, placeholder) in unknown.iter().zip(placeholders) {
            let Some(slot) = tokens.get_mut(i) else {
                continue;
            };
            let token = std::mem::replace(slot, placeholder.clone());
            self.vocabulary.resolve_unknown(token, &placeholder);
        }
        tokens
    }

    /// Fit on the corpus, then tokenize each of its documents
    #[inline]
    pub fn fit_transform(&mut self, corpus: impl Into<Corpus>) -> Vec<Vec<String>> {
        let corpus = corpus.into();
        self.fit(corpus.clone());
        corpus
            .documents()
            .into_iter()
            .map(|document| self.tokenize(document))
            .collect()
    }
}
