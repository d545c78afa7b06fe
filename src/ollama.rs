//! Minimal HTTP client for a local Ollama instance.
//!
//! Shared by the embedding and generation providers. Requests are sent once:
//! there is no retry and, unless `ollama.timeout_secs` is set, no timeout.

use anyhow::{bail, Result};
use std::time::Duration;

use crate::config::OllamaConfig;

#[derive(Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    url: String,
}

impl OllamaClient {
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST a JSON body to `{url}{path}` and return the decoded JSON response.
    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(format!("{}{}", self.url, path))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Ollama connection error (is Ollama running at {}?): {}",
                    self.url,
                    e
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            bail!("Ollama API error {}: {}", status, body_text);
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = OllamaClient::new(&OllamaConfig {
            url: "http://localhost:11434/".to_string(),
            timeout_secs: Some(5),
        })
        .unwrap();
        assert_eq!(client.url(), "http://localhost:11434");
    }
}
