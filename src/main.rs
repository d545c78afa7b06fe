//! # pdf-chat CLI
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pdf-chat chat <file.pdf>` | Ingest a PDF, then answer questions read from stdin |
//! | `pdf-chat ask <file.pdf> "<question>"` | Ingest a PDF and answer one question |
//! | `pdf-chat serve` | Start the HTTP chat surface |
//!
//! ## Examples
//!
//! ```bash
//! pdf-chat chat ./paper.pdf
//! pdf-chat --config ./pdf-chat.toml ask ./paper.pdf "Who are the authors?"
//! RUST_LOG=debug pdf-chat serve
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pdf_chat::{config, repl, server};

/// Chat with a PDF document using a local Ollama instance.
#[derive(Parser)]
#[command(
    name = "pdf-chat",
    about = "Chat with a PDF document using a local Ollama instance",
    version,
    long_about = "Extracts the text of a PDF, splits it into paragraphs, embeds each paragraph \
    with Ollama, and answers questions from the single most similar paragraph."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Optional. Without it, a local Ollama at http://localhost:11434 with
    /// `mxbai-embed-large` and `llama3.1:8b` and an in-memory collection are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a PDF and start an interactive question loop.
    ///
    /// Questions are read from stdin one per line; `/quit` or EOF ends the session.
    Chat {
        /// The PDF document to chat with.
        file: PathBuf,
    },

    /// Ingest a PDF and answer a single question.
    Ask {
        /// The PDF document to ask about.
        file: PathBuf,

        /// The question.
        question: String,
    },

    /// Start the HTTP chat surface.
    ///
    /// Binds to `[server].bind` (default 127.0.0.1:8501) and serves one session.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let cfg = config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Chat { file } => {
            repl::run_chat(&cfg, &file).await?;
        }
        Commands::Ask { file, question } => {
            repl::run_ask(&cfg, &file, &question).await?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
