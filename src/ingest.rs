//! Ingestion pipeline orchestration.
//!
//! Coordinates extract → split → embed → upsert for one uploaded PDF.
//! Chunks are processed strictly in order, one embedding request at a time.
//! The first failing request aborts the rest of the batch; records already
//! upserted stay in the collection and the session stays in its previous
//! state.

use crate::chunk::split_paragraphs;
use crate::error::ChatError;
use crate::extract::extract_pages;
use crate::models::{Chunk, IngestReport};
use crate::pipeline::Pipeline;
use crate::session::Session;

/// Confirmation shown by the surfaces after a successful ingestion.
pub const STORED_MESSAGE: &str = "PDF content successfully stored!";

impl Pipeline {
    /// Ingest a PDF and mark the session document-ready on success.
    pub async fn ingest_pdf(
        &self,
        session: &mut Session,
        bytes: &[u8],
    ) -> Result<IngestReport, ChatError> {
        let pages = extract_pages(bytes)?;
        let page_count = pages.len();
        let text = pages.concat();
        log::info!(
            "extracted {} pages ({} chars) from {} byte upload",
            page_count,
            text.len(),
            bytes.len()
        );

        self.store_document(session, &text, page_count).await
    }

    /// Ingest already-extracted document text. The report counts 0 pages.
    pub async fn ingest_text(
        &self,
        session: &mut Session,
        text: &str,
    ) -> Result<IngestReport, ChatError> {
        self.store_document(session, text, 0).await
    }

    async fn store_document(
        &self,
        session: &mut Session,
        text: &str,
        pages: usize,
    ) -> Result<IngestReport, ChatError> {
        let pieces = split_paragraphs(text);
        let start = session.batch_start();

        let mut ids = Vec::with_capacity(pieces.len());
        let result = self.store_chunks(start, pieces, &mut ids).await;
        session.advance_ids(ids.len() as u64);
        result?;

        session.mark_document_ready();
        log::info!(
            "stored {} chunks in collection '{}'",
            ids.len(),
            self.collection.name()
        );

        Ok(IngestReport {
            pages,
            chunks: ids.len(),
            ids,
        })
    }

    async fn store_chunks(
        &self,
        start: u64,
        pieces: Vec<String>,
        ids: &mut Vec<String>,
    ) -> Result<(), ChatError> {
        for (i, text) in pieces.into_iter().enumerate() {
            let id = (start + i as u64).to_string();
            let embedding = self.embedder.embed(&text).await?;
            let chunk = Chunk {
                id,
                text,
                embedding,
            };
            self.collection
                .upsert(&chunk.id, &chunk.embedding, &chunk.text)
                .await?;
            log::debug!("upserted chunk {}", chunk.id);
            ids.push(chunk.id);
        }
        Ok(())
    }
}
