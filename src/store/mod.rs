//! Vector store abstraction.
//!
//! A [`VectorStore`] hosts named [`Collection`]s of `(id, embedding, text)`
//! records. Opening a collection is get-or-create, so re-running the pipeline
//! against an existing collection neither fails nor duplicates it.
//!
//! Backends:
//! - [`memory::InMemoryStore`]: process-local, lost on exit.
//! - [`sqlite::SqliteStore`]: SQLite file via sqlx.
//!
//! Both use brute-force cosine similarity for nearest-neighbor lookup and
//! replace a record when an existing id is upserted. A collection takes the
//! dimension of its first vector; upserts and queries of any other length
//! are rejected with [`ChatError::Store`].

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::ChatError;

/// A nearest-neighbor match.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: String,
    pub text: String,
    /// Cosine similarity to the query vector.
    pub score: f64,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Fetch the collection `name`, creating it if absent.
    async fn get_or_create(&self, name: &str) -> Result<Arc<dyn Collection>, ChatError>;

    /// Names of all existing collections. Only logged by the pipeline.
    async fn collection_names(&self) -> Result<Vec<String>, ChatError>;
}

#[async_trait]
pub trait Collection: Send + Sync {
    fn name(&self) -> &str;

    /// Insert a record, or replace the record that already has this id.
    async fn upsert(&self, id: &str, vector: &[f32], text: &str) -> Result<(), ChatError>;

    /// Up to `top_k` records ordered by similarity, most similar first.
    /// Empty when the collection is empty.
    async fn nearest(&self, vector: &[f32], top_k: usize) -> Result<Vec<Hit>, ChatError>;

    /// All record ids, in insertion order.
    async fn ids(&self) -> Result<Vec<String>, ChatError>;

    /// Text of the record with this id. Not used by the chat flow; kept for
    /// inspecting a collection from callers and tests.
    async fn get_text(&self, id: &str) -> Result<Option<String>, ChatError>;
}

/// Open the backend selected in `[store]`.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn VectorStore>, ChatError> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(memory::InMemoryStore::new())),
        StoreBackend::Sqlite => Ok(Arc::new(sqlite::SqliteStore::open(&config.path).await?)),
    }
}

/// Sort hits by score, highest first, keeping insertion order among ties.
pub(crate) fn rank(mut hits: Vec<Hit>, top_k: usize) -> Vec<Hit> {
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits.truncate(top_k);
    hits
}

/// Reject a vector whose length differs from the collection's dimension.
/// `expected` is `None` while the collection is empty.
pub(crate) fn check_dimension(expected: Option<usize>, got: usize) -> Result<(), ChatError> {
    match expected {
        Some(dim) if dim != got => Err(ChatError::Store(format!(
            "embedding dimension {} does not match collection dimension {}",
            got, dim
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, score: f64) -> Hit {
        Hit {
            id: id.to_string(),
            text: String::new(),
            score,
        }
    }

    #[test]
    fn rank_orders_descending_and_truncates() {
        let ranked = rank(vec![hit("a", 0.1), hit("b", 0.9), hit("c", 0.5)], 2);
        let ids: Vec<&str> = ranked.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn rank_tolerates_nan_scores() {
        let ranked = rank(
            vec![hit("a", 0.2), hit("nan", f64::NAN), hit("b", 0.8), hit("c", f64::NAN)],
            4,
        );
        assert_eq!(ranked.len(), 4);
        let finite: Vec<&str> = ranked
            .iter()
            .filter(|h| !h.score.is_nan())
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(finite, vec!["b", "a"]);
    }

    #[test]
    fn dimension_check() {
        assert!(check_dimension(None, 3).is_ok());
        assert!(check_dimension(Some(3), 3).is_ok());
        let err = check_dimension(Some(2), 3).unwrap_err();
        assert!(matches!(err, ChatError::Store(_)));
        assert_eq!(
            err.to_string(),
            "vector store error: embedding dimension 3 does not match collection dimension 2"
        );
    }

    #[test]
    fn rank_keeps_first_inserted_on_tie() {
        let ranked = rank(vec![hit("first", 0.5), hit("second", 0.5)], 1);
        assert_eq!(ranked[0].id, "first");
    }
}
