//! Shared fixtures: deterministic fake providers and a hand-built PDF writer.

#![allow(dead_code)]

use async_trait::async_trait;
use pdf_chat::config::IdPolicy;
use pdf_chat::embedding::EmbeddingProvider;
use pdf_chat::error::ChatError;
use pdf_chat::generate::LanguageModel;
use pdf_chat::pipeline::Pipeline;
use pdf_chat::store::memory::InMemoryStore;
use pdf_chat::store::{Collection, VectorStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ─── Embedding fakes ────────────────────────────────────────────────

/// Bag-of-words embedder over a fixed vocabulary, plus a constant bias
/// dimension so no vector is all zeros.
pub struct VocabEmbedder {
    vocab: Vec<&'static str>,
    calls: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl VocabEmbedder {
    pub fn new(vocab: &[&'static str]) -> Self {
        Self {
            vocab: vocab.to_vec(),
            calls: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect()
}

#[async_trait]
impl EmbeddingProvider for VocabEmbedder {
    fn model_name(&self) -> &str {
        "vocab"
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChatError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(text.to_string());

        let toks = tokens(text);
        let mut v: Vec<f32> = self
            .vocab
            .iter()
            .map(|w| toks.iter().filter(|t| t.as_str() == *w).count() as f32)
            .collect();
        v.push(1.0);
        Ok(v)
    }
}

/// Succeeds for the first `ok_calls` requests, then fails every time.
pub struct FlakyEmbedder {
    ok_calls: usize,
    calls: AtomicUsize,
}

impl FlakyEmbedder {
    pub fn new(ok_calls: usize) -> Self {
        Self {
            ok_calls,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FlakyEmbedder {
    fn model_name(&self) -> &str {
        "flaky"
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, ChatError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.ok_calls {
            Ok(vec![1.0, 0.0])
        } else {
            Err(ChatError::Embedding("service unavailable".to_string()))
        }
    }
}

// ─── Generation fakes ───────────────────────────────────────────────

/// Returns a fixed reply and records every prompt it receives.
pub struct RecordingModel {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingModel {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for RecordingModel {
    fn model_name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

pub struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    fn model_name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, ChatError> {
        Err(ChatError::Generation("model crashed".to_string()))
    }
}

// ─── Pipeline helpers ───────────────────────────────────────────────

pub const VOCAB: &[&str] = &["alpha", "beta", "gamma", "fact"];

pub async fn memory_collection() -> Arc<dyn Collection> {
    InMemoryStore::new().get_or_create("docs").await.unwrap()
}

pub async fn pipeline_with(
    embedder: Arc<dyn EmbeddingProvider>,
    model: Arc<dyn LanguageModel>,
    id_policy: IdPolicy,
) -> (Pipeline, Arc<dyn Collection>) {
    let collection = memory_collection().await;
    let pipeline = Pipeline::new(embedder, model, collection.clone(), id_policy);
    (pipeline, collection)
}

// ─── PDF fixtures ───────────────────────────────────────────────────

/// Minimal valid PDF with one page per entry of `pages`, each showing its
/// text in Helvetica. Builds the body first and then the xref table with
/// correct byte offsets so pdf-extract can parse it.
pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let n = pages.len();
    let font_obj = 3 + 2 * n;
    let mut offsets = Vec::new();
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");

    offsets.push(out.len());
    out.extend_from_slice(b"1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\n");

    let kids = (0..n)
        .map(|i| format!("{} 0 R", 3 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");
    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "2 0 obj << /Type /Pages /Kids [{}] /Count {} >> endobj\n",
            kids, n
        )
        .as_bytes(),
    );

    for (i, text) in pages.iter().enumerate() {
        let page_obj = 3 + 2 * i;
        let content_obj = page_obj + 1;

        offsets.push(out.len());
        out.extend_from_slice(
            format!(
                "{} 0 obj << /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 {} 0 R >> >> >> endobj\n",
                page_obj, content_obj, font_obj
            )
            .as_bytes(),
        );

        let stream = format!("BT /F1 12 Tf 100 700 Td ({}) Tj ET", text);
        offsets.push(out.len());
        out.extend_from_slice(
            format!(
                "{} 0 obj << /Length {} >> stream\n{}\nendstream endobj\n",
                content_obj,
                stream.len(),
                stream
            )
            .as_bytes(),
        );
    }

    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "{} 0 obj << /Type /Font /Subtype /Type1 /BaseFont /Helvetica >> endobj\n",
            font_obj
        )
        .as_bytes(),
    );

    let xref_start = out.len();
    let size = offsets.len() + 1;
    out.extend_from_slice(format!("xref\n0 {}\n", size).as_bytes());
    out.extend_from_slice(format!("{:010} 65535 f \n", 0).as_bytes());
    for off in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
    }
    out.extend_from_slice(format!("trailer << /Size {} /Root 1 0 R >>\nstartxref\n", size).as_bytes());
    out.extend_from_slice(format!("{}\n", xref_start).as_bytes());
    out.extend_from_slice(b"%%EOF\n");
    out
}
