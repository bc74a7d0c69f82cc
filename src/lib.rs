use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error(
        "CSS detection failed: more than {limit} unrecognised lines inside a brace block:\n{lines}"
    )]
    CssDetection { limit: usize, lines: String },

    #[error("Document has no markdown headers")]
    NoHeaders,

    #[error("Unsupported corpus: {0}")]
    CorpusType(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: Box<fancy_regex::Error>,
    },

    #[error("Pattern matching failed: {0}")]
    Regex(#[source] Box<fancy_regex::Error>),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod catalog;
pub mod cleaning;
pub mod commands;
pub mod config;
pub mod tokenizer;
