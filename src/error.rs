//! Error taxonomy for the chat pipeline.
//!
//! Every external call (PDF parser, embedding service, generative model,
//! vector store) reports failures through [`ChatError`]. None of them are
//! retried: the failing action (one ingestion batch or one question) is
//! aborted and the error is shown to the user by whichever surface is
//! running. An empty collection is *not* an error; see
//! [`Retrieval::NoDocument`](crate::retrieve::Retrieval::NoDocument).

use thiserror::Error;

/// Static prompt shown when a chat message arrives before any PDF was ingested.
pub const UPLOAD_FIRST: &str = "Please upload a PDF document to start chatting.";

#[derive(Debug, Error)]
pub enum ChatError {
    /// The uploaded bytes could not be parsed as a PDF.
    #[error("invalid PDF: {0}")]
    InvalidPdf(String),

    /// The upload is not a `.pdf` file / `application/pdf` body.
    #[error("unsupported upload: {0}")]
    UnsupportedUpload(String),

    #[error("embedding service error: {0}")]
    Embedding(String),

    #[error("generative model error: {0}")]
    Generation(String),

    #[error("vector store error: {0}")]
    Store(String),

    /// A chat message was submitted while no document is ready.
    #[error("{}", UPLOAD_FIRST)]
    NoDocument,

    #[error("message must not be empty")]
    EmptyMessage,
}

impl From<sqlx::Error> for ChatError {
    fn from(e: sqlx::Error) -> Self {
        ChatError::Store(e.to_string())
    }
}
