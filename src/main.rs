use clap::{Parser, Subcommand};
use homebrew_prep::Result;
use homebrew_prep::commands::{clean_documents, fit_vocabulary, tokenize_documents};
use homebrew_prep::config::{Config, get_config_dir, init_config, show_config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "homebrew-prep")]
#[command(about = "Clean scraped homebrew markdown and tokenize it against an embedding vocabulary")]
#[command(version)]
struct Cli {
    /// Configuration directory (defaults to ~/.homebrew-prep)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the configuration file, or print it
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Clean a directory of `<id>.txt` documents
    Clean {
        /// Directory of raw documents
        input: PathBuf,
        /// Directory the cleaned documents are written to
        output: PathBuf,
        /// Re-clean documents that already have output
        #[arg(long)]
        force: bool,
        /// Number of documents cleaned concurrently
        #[arg(long, short)]
        jobs: Option<usize>,
    },
    /// Fit the tokenizer vocabulary on a corpus
    Fit {
        /// Directory of documents, a text file, or a JSON string or string array
        corpus: PathBuf,
        /// Embedding vocabulary, one token per line
        #[arg(long)]
        embedding_vocab: PathBuf,
        /// Where to write the vocabulary (defaults to the config directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Tokenize documents, one JSON line per document
    Tokenize {
        /// Directory of documents or a single document
        input: PathBuf,
        /// Fitted vocabulary (defaults to the config directory)
        #[arg(long)]
        vocabulary: Option<PathBuf>,
        /// Output file (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries `tokenize` output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => get_config_dir()?,
    };

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config(&Config::load(&config_dir)?)?;
            } else {
                init_config(&config_dir)?;
            }
        }
        Commands::Clean {
            input,
            output,
            force,
            jobs,
        } => {
            let mut config = Config::load(&config_dir)?;
            if let Some(jobs) = jobs {
                config.cleaning.jobs = jobs;
            }
            config.validate()?;
            clean_documents(&config, &input, &output, force).await?;
        }
        Commands::Fit {
            corpus,
            embedding_vocab,
            output,
        } => {
            let config = Config::load(&config_dir)?;
            fit_vocabulary(&config, &corpus, &embedding_vocab, output)?;
        }
        Commands::Tokenize {
            input,
            vocabulary,
            output,
        } => {
            let config = Config::load(&config_dir)?;
            tokenize_documents(&config, &input, vocabulary, output.as_deref())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["homebrew-prep", "config", "--show"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            assert!(matches!(parsed.command, Commands::Config { show: true }));
            assert_eq!(parsed.config_dir, None);
        }
    }

    #[test]
    fn clean_command_with_dirs() {
        let cli = Cli::try_parse_from(["homebrew-prep", "clean", "raw", "cleaned"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Clean {
                input,
                output,
                force,
                jobs,
            } = parsed.command
            {
                assert_eq!(input, PathBuf::from("raw"));
                assert_eq!(output, PathBuf::from("cleaned"));
                assert!(!force);
                assert_eq!(jobs, None);
            }
        }
    }

    #[test]
    fn clean_command_with_options() {
        let cli = Cli::try_parse_from([
            "homebrew-prep",
            "clean",
            "raw",
            "cleaned",
            "--force",
            "-j",
            "8",
            "--config-dir",
            "/tmp/prep",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            assert_eq!(parsed.config_dir, Some(PathBuf::from("/tmp/prep")));
            if let Commands::Clean { force, jobs, .. } = parsed.command {
                assert!(force);
                assert_eq!(jobs, Some(8));
            }
        }
    }

    #[test]
    fn fit_requires_embedding_vocab() {
        let result = Cli::try_parse_from(["homebrew-prep", "fit", "cleaned"]);
        assert!(result.is_err());

        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::MissingRequiredArgument);
        }

        let cli = Cli::try_parse_from([
            "homebrew-prep",
            "fit",
            "cleaned",
            "--embedding-vocab",
            "glove.txt",
        ]);
        assert!(cli.is_ok());
    }

    #[test]
    fn tokenize_command_with_output() {
        let cli = Cli::try_parse_from([
            "homebrew-prep",
            "tokenize",
            "cleaned",
            "--vocabulary",
            "vocab.json",
            "-o",
            "tokens.jsonl",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Tokenize {
                vocabulary, output, ..
            } = parsed.command
            {
                assert_eq!(vocabulary, Some(PathBuf::from("vocab.json")));
                assert_eq!(output, Some(PathBuf::from("tokens.jsonl")));
            }
        }
    }

    #[test]
    fn invalid_command() {
        let result = Cli::try_parse_from(["homebrew-prep", "invalid-command"]);
        assert!(result.is_err());

        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_flag() {
        let result = Cli::try_parse_from(["homebrew-prep", "--help"]);
        assert!(result.is_err());

        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::DisplayHelp);
        }
    }
}
