//! TOML configuration.
//!
//! Every section is optional. With no config file at all the tool behaves
//! like the stock setup: a local Ollama at `http://localhost:11434`,
//! `mxbai-embed-large` for embeddings, `llama3.1:8b` for answers, and an
//! in-memory collection named `docs`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_EMBEDDING_MODEL: &str = "mxbai-embed-large";
pub const DEFAULT_GENERATION_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_COLLECTION: &str = "docs";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    /// Per-request timeout. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            timeout_secs: None,
        }
    }
}

fn default_ollama_url() -> String {
    DEFAULT_OLLAMA_URL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_model")]
    pub model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
        }
    }
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "default_generation_model")]
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
        }
    }
}

fn default_generation_model() -> String {
    DEFAULT_GENERATION_MODEL.to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Database file for the `sqlite` backend.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            collection: default_collection(),
            path: default_store_path(),
        }
    }
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/pdf-chat.sqlite")
}

/// How chunk ids are assigned across uploads within one session.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum IdPolicy {
    /// Ids continue from the previous upload; nothing is overwritten.
    #[default]
    Monotonic,
    /// Ids restart at `"0"` on every upload and overwrite colliding records.
    PerUpload,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngestConfig {
    #[serde(default)]
    pub id_policy: IdPolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8501".to_string()
}

fn default_max_upload_mb() -> usize {
    200
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` when given, otherwise fall back to the built-in defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => load_config(p),
        None => Ok(Config::default()),
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.ollama.url.trim().is_empty() {
        anyhow::bail!("ollama.url must not be empty");
    }
    if config.ollama.timeout_secs == Some(0) {
        anyhow::bail!("ollama.timeout_secs must be > 0 when set");
    }
    if config.embedding.model.trim().is_empty() {
        anyhow::bail!("embedding.model must not be empty");
    }
    if config.generation.model.trim().is_empty() {
        anyhow::bail!("generation.model must not be empty");
    }
    if config.store.collection.trim().is_empty() {
        anyhow::bail!("store.collection must not be empty");
    }
    if config.server.max_upload_mb == 0 {
        anyhow::bail!("server.max_upload_mb must be > 0");
    }
    Ok(())
}
