//! Terminal chat surface for `pdf-chat chat` and `pdf-chat ask`.
//!
//! The PDF is ingested first; questions are then read line by line and each
//! one is rendered as a user line followed by an assistant line. A failed
//! question prints the error and the loop keeps going, so the user can ask
//! again. Answers go to stdout, logs to stderr.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::extract::ensure_pdf_path;
use crate::ingest::STORED_MESSAGE;
use crate::models::{ConversationTurn, IngestReport};
use crate::pipeline::Pipeline;
use crate::session::Session;

pub const CHAT_PROMPT: &str = "Ask a question based on the uploaded PDF document:";

/// Read and ingest the PDF at `path`.
pub async fn load_pdf(
    pipeline: &Pipeline,
    session: &mut Session,
    path: &Path,
) -> Result<IngestReport> {
    ensure_pdf_path(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let report = pipeline.ingest_pdf(session, &bytes).await?;
    Ok(report)
}

pub fn print_report<W: Write>(out: &mut W, report: &IngestReport) -> std::io::Result<()> {
    writeln!(out, "{}", STORED_MESSAGE)?;
    writeln!(out, "  pages: {}", report.pages)?;
    writeln!(out, "  chunks: {}", report.chunks)?;
    Ok(())
}

/// Question loop. Ends on EOF, `/quit` or `/exit`.
pub async fn run_repl<R, W>(
    pipeline: &Pipeline,
    session: &mut Session,
    input: R,
    out: &mut W,
    interactive: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    if interactive {
        writeln!(out, "{}", CHAT_PROMPT)?;
    }

    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "/quit" || message == "/exit" {
            break;
        }

        writeln!(out, "{}", ConversationTurn::user(message).render())?;
        match pipeline.submit(session, message).await {
            Ok(exchange) => writeln!(out, "{}", exchange.assistant.render())?,
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        out.flush()?;
    }

    Ok(())
}

pub async fn run_chat(config: &Config, path: &Path) -> Result<()> {
    let pipeline = Pipeline::from_config(config).await?;
    let mut session = pipeline.new_session().await?;

    println!("Processing the PDF file...");
    let report = load_pdf(&pipeline, &mut session, path).await?;

    let mut out = std::io::stdout();
    print_report(&mut out, &report)?;

    let interactive = atty::is(atty::Stream::Stdin);
    let input = BufReader::new(tokio::io::stdin());
    run_repl(&pipeline, &mut session, input, &mut out, interactive).await
}

pub async fn run_ask(config: &Config, path: &Path, question: &str) -> Result<()> {
    let pipeline = Pipeline::from_config(config).await?;
    let mut session = pipeline.new_session().await?;

    load_pdf(&pipeline, &mut session, path).await?;
    let exchange = pipeline.submit(&mut session, question).await?;

    println!("{}", exchange.user.render());
    println!("{}", exchange.assistant.render());
    Ok(())
}
