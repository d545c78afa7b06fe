//! Embedding provider abstraction and the Ollama implementation.
//!
//! Defines the [`EmbeddingProvider`] trait and:
//! - **[`OllamaEmbedder`]**: calls a local Ollama instance's `/api/embed` endpoint.
//!
//! Also provides vector utilities used by the stores:
//! - [`cosine_similarity`]: similarity metric for nearest-neighbor lookup
//! - [`vec_to_blob`] / [`blob_to_vec`]: little-endian f32 encoding for SQLite BLOBs
//!
//! One text is embedded per request. Requests are not retried; a failure is
//! fatal to the ingestion batch or question that issued it.

use async_trait::async_trait;

use crate::config::EmbeddingConfig;
use crate::error::ChatError;
use crate::ollama::OllamaClient;

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Returns the model identifier (e.g. `"mxbai-embed-large"`).
    fn model_name(&self) -> &str;

    /// Embed one text into a fixed-length vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChatError>;
}

/// Embedding provider using a local Ollama instance.
///
/// Requires Ollama to be running with the model pulled
/// (e.g. `ollama pull mxbai-embed-large`).
pub struct OllamaEmbedder {
    client: OllamaClient,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(client: OllamaClient, config: &EmbeddingConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbedder {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChatError> {
        let body = serde_json::json!({
            "model": self.model,
            "input": [text],
        });

        log::debug!("embedding {} chars with {}", text.len(), self.model);

        let json = self
            .client
            .post_json("/api/embed", &body)
            .await
            .map_err(|e| ChatError::Embedding(format!("{:#}", e)))?;

        parse_ollama_response(&json)?
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::Embedding("Empty embedding response".to_string()))
    }
}

fn parse_ollama_response(json: &serde_json::Value) -> Result<Vec<Vec<f32>>, ChatError> {
    let embeddings = json
        .get("embeddings")
        .and_then(|e| e.as_array())
        .ok_or_else(|| {
            ChatError::Embedding("Invalid Ollama response: missing embeddings array".to_string())
        })?;

    let mut result = Vec::with_capacity(embeddings.len());

    for embedding in embeddings {
        let vec: Vec<f32> = embedding
            .as_array()
            .ok_or_else(|| {
                ChatError::Embedding(
                    "Invalid Ollama response: embedding is not an array".to_string(),
                )
            })?
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();
        result.push(vec);
    }

    Ok(result)
}

/// Encode a float vector as a BLOB (little-endian f32 bytes).
///
/// # Example
///
/// ```rust
/// use pdf_chat::embedding::{vec_to_blob, blob_to_vec};
///
/// let v = vec![1.0f32, -2.5, 3.125];
/// let blob = vec_to_blob(&v);
/// assert_eq!(blob.len(), 12);
/// assert_eq!(blob_to_vec(&blob), v);
/// ```
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vec.len() * 4);
    for &v in vec {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decode a BLOB back into a float vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in `[-1.0, 1.0]`, or `0.0` for empty vectors, vectors of
/// different lengths, and zero vectors.
///
/// ```text
///            a · b
/// cos(θ) = ─────────
///          ‖a‖ × ‖b‖
/// ```
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom < f32::EPSILON {
        return 0.0;
    }

    dot / denom
}
