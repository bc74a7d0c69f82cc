use anyhow::{Context, Result};
use console::style;
use futures::{StreamExt, stream};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cleaning::{Document, DocumentCleaner};
use crate::config::Config;
use crate::tokenizer::{Corpus, Vocabulary, VocabularyTokenizer};

/// Outcome of a `clean` run, by document id
#[derive(Debug, Default)]
pub struct CleanSummary {
    pub cleaned: Vec<u64>,
    pub skipped: Vec<u64>,
    pub failures: Vec<(u64, String)>,
}

/// One line of `tokenize` output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenizedDocument {
    pub id: u64,
    pub tokens: Vec<String>,
}

fn progress_bar(len: usize, message: &'static str) -> ProgressBar {
    if console::user_attended_stderr() {
        ProgressBar::new(len as u64)
            .with_style(
                ProgressStyle::with_template("{spinner} [{pos}/{len}] {msg}")
                    .expect("style template is valid"),
            )
            .with_message(message)
    } else {
        ProgressBar::hidden()
    }
}

/// `<id>.txt` -> id
fn document_id(path: &Path) -> Option<u64> {
    if path.extension()? != "txt" {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}

fn document_path(dir: &Path, id: u64) -> PathBuf {
    dir.join(format!("{}.txt", id))
}

/// Read every `<id>.txt` file in a directory, ordered by id
#[inline]
pub fn read_documents(dir: &Path) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read document directory: {}", dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        let Some(id) = document_id(&path) else {
            debug!("Skipping {}", path.display());
            continue;
        };
        let raw_text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document: {}", path.display()))?;
        documents.push(Document::new(id, raw_text));
    }

    documents.sort_by_key(|document| document.id);
    Ok(documents)
}

/// A directory of documents, a JSON string or string array, or a plain text file
#[inline]
pub fn read_corpus(path: &Path) -> Result<Corpus> {
    if path.is_dir() {
        let documents = read_documents(path)?;
        return Ok(Corpus::Documents(
            documents.into_iter().map(|document| document.raw_text).collect(),
        ));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse corpus: {}", path.display()))?;
        return Ok(Corpus::try_from(value)?);
    }

    Ok(Corpus::Text(content))
}

/// One token per line; blank lines ignored
#[inline]
pub fn read_embedding_vocab(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read embedding vocabulary: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Clean every document in `input` into `output`, in parallel.
///
/// Documents already present in `output` are skipped unless `force` is set.
/// Failures are reported and do not stop the batch.
#[inline]
pub async fn clean_documents(
    config: &Config,
    input: &Path,
    output: &Path,
    force: bool,
) -> Result<CleanSummary> {
    let catalog = config.catalog().context("Failed to load pattern catalog")?;
    let cleaner = Arc::new(DocumentCleaner::new(
        Arc::new(catalog),
        config.cleaning.clone(),
    ));

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let mut summary = CleanSummary::default();
    let mut pending = Vec::new();
    for document in read_documents(input)? {
        if !force && document_path(output, document.id).exists() {
            summary.skipped.push(document.id);
            continue;
        }
        pending.push(document);
    }
    info!(
        "Cleaning {} documents ({} already cleaned)",
        pending.len(),
        summary.skipped.len()
    );

    let bar = progress_bar(pending.len(), "Cleaning documents");
    let mut results = stream::iter(pending.into_iter().map(|mut document| {
        let cleaner = Arc::clone(&cleaner);
        let id = document.id;
        let task = tokio::task::spawn_blocking(move || {
            cleaner.clean(&mut document).map(str::to_string)
        });
        async move { (id, task.await) }
    }))
    .buffer_unordered(config.cleaning.jobs.max(1));

    while let Some((id, joined)) = results.next().await {
        bar.inc(1);
        let error = match joined {
            Ok(Ok(text)) => {
                let path = document_path(output, id);
                fs::write(&path, text)
                    .with_context(|| format!("Failed to write document: {}", path.display()))?;
                summary.cleaned.push(id);
                continue;
            }
            Ok(Err(e)) => e.to_string(),
            // A panicking task loses only its own document
            Err(e) => format!("Cleaning task failed: {}", e),
        };
        warn!("Failed to clean document {}: {}", id, error);
        summary.failures.push((id, error));
    }
    bar.finish_and_clear();

    summary.cleaned.sort_unstable();
    summary.failures.sort_by_key(|(id, _)| *id);

    println!(
        "{} {} cleaned, {} skipped, {} failed",
        style("Done:").bold().green(),
        summary.cleaned.len(),
        summary.skipped.len(),
        summary.failures.len()
    );
    for (id, error) in &summary.failures {
        println!("  {} {}: {}", style("✗").red(), id, error);
    }

    Ok(summary)
}

/// Fit a vocabulary on a corpus and save it as JSON
#[inline]
pub fn fit_vocabulary(
    config: &Config,
    corpus: &Path,
    embedding_vocab: &Path,
    output: Option<PathBuf>,
) -> Result<PathBuf> {
    let corpus = read_corpus(corpus)?;
    let embedding = read_embedding_vocab(embedding_vocab)?;
    info!("Loaded {} embedding tokens", embedding.len());

    let mut tokenizer = VocabularyTokenizer::new(embedding, config.tokenizer.clone());
    tokenizer.fit(corpus);

    let path = output.unwrap_or_else(|| config.vocabulary_path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    tokenizer.vocabulary().save(&path)?;

    let vocabulary = tokenizer.vocabulary();
    println!(
        "{} {} common tokens, {} mappings",
        style("Fitted:").bold().green(),
        vocabulary.common_vocab().len(),
        vocabulary.token_mappings().len()
    );
    println!("Vocabulary: {}", style(path.display()).dim());

    Ok(path)
}

/// Tokenize documents with a fitted vocabulary, writing one JSON line per
/// document. Unknown tokens resolved along the way are saved back into the
/// vocabulary.
#[inline]
pub fn tokenize_documents(
    config: &Config,
    input: &Path,
    vocabulary: Option<PathBuf>,
    output: Option<&Path>,
) -> Result<usize> {
    let vocabulary_path = vocabulary.unwrap_or_else(|| config.vocabulary_path());
    let vocabulary = Vocabulary::load(&vocabulary_path).with_context(|| {
        format!(
            "Failed to load vocabulary {}; run `homebrew-prep fit` first",
            vocabulary_path.display()
        )
    })?;
    let mut tokenizer = VocabularyTokenizer::from_vocabulary(vocabulary, config.tokenizer.clone());

    let documents = if input.is_dir() {
        read_documents(input)?
    } else {
        let raw_text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read document: {}", input.display()))?;
        vec![Document::new(document_id(input).unwrap_or_default(), raw_text)]
    };

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let bar = progress_bar(documents.len(), "Tokenizing documents");
    for document in &documents {
        let line = TokenizedDocument {
            id: document.id,
            tokens: tokenizer.tokenize(&document.raw_text),
        };
        serde_json::to_writer(&mut writer, &line)?;
        writeln!(writer)?;
        bar.inc(1);
    }
    writer.flush()?;
    bar.finish_and_clear();

    tokenizer.vocabulary().save(&vocabulary_path)?;
    info!("Tokenized {} documents", documents.len());

    Ok(documents.len())
}
