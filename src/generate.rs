//! Answer generation.
//!
//! The retrieved chunk and the user's question are interpolated into a fixed
//! prompt template and sent to the generative model. The model's text is
//! returned verbatim. When nothing was retrieved the model is not called and
//! [`NO_RELEVANT_DOCUMENT`] is returned instead.
//!
//! Chunks are not truncated before interpolation; a very long paragraph
//! produces a very long prompt.

use async_trait::async_trait;

use crate::config::GenerationConfig;
use crate::error::ChatError;
use crate::ollama::OllamaClient;
use crate::retrieve::Retrieval;

pub const NO_RELEVANT_DOCUMENT: &str = "No relevant document found for the query.";

/// Trait for generative model backends.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Returns the model identifier (e.g. `"llama3.1:8b"`).
    fn model_name(&self) -> &str;

    /// Produce a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, ChatError>;
}

/// Completion backend using Ollama's `/api/generate` endpoint (non-streaming).
pub struct OllamaGenerator {
    client: OllamaClient,
    model: String,
}

impl OllamaGenerator {
    pub fn new(client: OllamaClient, config: &GenerationConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaGenerator {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let json = self
            .client
            .post_json("/api/generate", &body)
            .await
            .map_err(|e| ChatError::Generation(format!("{:#}", e)))?;

        json.get("response")
            .and_then(|r| r.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ChatError::Generation("Invalid Ollama response: missing response".to_string())
            })
    }
}

pub fn build_prompt(chunk_text: &str, question: &str) -> String {
    format!(
        "Using this data: {}. Respond to this prompt: {}",
        chunk_text, question
    )
}

/// Answer `question` from the retrieved context.
pub async fn answer(
    model: &dyn LanguageModel,
    retrieval: &Retrieval,
    question: &str,
) -> Result<String, ChatError> {
    let chunk = match retrieval {
        Retrieval::Found(chunk) => chunk,
        Retrieval::NoDocument => return Ok(NO_RELEVANT_DOCUMENT.to_string()),
    };

    let prompt = build_prompt(&chunk.text, question);
    log::debug!(
        "generating with {} from chunk {} ({} prompt chars)",
        model.model_name(),
        chunk.id,
        prompt.len()
    );
    model.generate(&prompt).await
}
