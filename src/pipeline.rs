//! The wired-up chat pipeline.
//!
//! A [`Pipeline`] owns the three external collaborators (embedding provider,
//! generative model, vector-store collection) plus the id policy. It carries
//! no per-user state; that lives in [`Session`], which every operation takes
//! explicitly. Ingestion lives in [`crate::ingest`], chat submission in
//! [`crate::chat`].

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::{Config, IdPolicy};
use crate::embedding::{EmbeddingProvider, OllamaEmbedder};
use crate::error::ChatError;
use crate::generate::{LanguageModel, OllamaGenerator};
use crate::ollama::OllamaClient;
use crate::session::Session;
use crate::store::{open_store, Collection};

pub struct Pipeline {
    pub(crate) embedder: Arc<dyn EmbeddingProvider>,
    pub(crate) model: Arc<dyn LanguageModel>,
    pub(crate) collection: Arc<dyn Collection>,
    pub(crate) id_policy: IdPolicy,
}

impl Pipeline {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        model: Arc<dyn LanguageModel>,
        collection: Arc<dyn Collection>,
        id_policy: IdPolicy,
    ) -> Self {
        Self {
            embedder,
            model,
            collection,
            id_policy,
        }
    }

    /// Build the Ollama-backed pipeline and open (get-or-create) the
    /// configured collection.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let client = OllamaClient::new(&config.ollama)?;
        let embedder = Arc::new(OllamaEmbedder::new(client.clone(), &config.embedding));
        let model = Arc::new(OllamaGenerator::new(client, &config.generation));

        let store = open_store(&config.store)
            .await
            .context("Failed to open vector store")?;
        log::debug!(
            "existing collections: {:?}",
            store.collection_names().await?
        );
        let collection = store
            .get_or_create(&config.store.collection)
            .await
            .with_context(|| format!("Failed to open collection '{}'", config.store.collection))?;

        log::info!(
            "pipeline ready: embeddings={} generation={} collection={} ({:?} store)",
            config.embedding.model,
            config.generation.model,
            config.store.collection,
            config.store.backend
        );

        Ok(Self::new(
            embedder,
            model,
            collection,
            config.ingest.id_policy,
        ))
    }

    pub fn collection(&self) -> &dyn Collection {
        self.collection.as_ref()
    }

    /// Start a fresh session. Under the monotonic policy its ids start after
    /// the largest numeric id already in the collection.
    pub async fn new_session(&self) -> Result<Session, ChatError> {
        let next_id = match self.id_policy {
            IdPolicy::PerUpload => 0,
            IdPolicy::Monotonic => self
                .collection
                .ids()
                .await?
                .iter()
                .filter_map(|id| id.parse::<u64>().ok())
                .max()
                .map(|max| max + 1)
                .unwrap_or(0),
        };
        Ok(Session::starting_at(self.id_policy, next_id))
    }
}
