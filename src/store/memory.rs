//! In-memory [`VectorStore`] implementation.
//!
//! Collections live in a `HashMap` behind `tokio::sync::RwLock`; records keep
//! insertion order. Everything is dropped with the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::embedding::cosine_similarity;
use crate::error::ChatError;

use super::{check_dimension, rank, Collection, Hit, VectorStore};

struct StoredRecord {
    id: String,
    vector: Vec<f32>,
    text: String,
}

/// In-memory store holding any number of named collections.
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Arc<InMemoryCollection>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryStore {
    async fn get_or_create(&self, name: &str) -> Result<Arc<dyn Collection>, ChatError> {
        let mut collections = self.collections.write().await;
        let collection: Arc<dyn Collection> = collections
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("creating collection '{}'", name);
                Arc::new(InMemoryCollection::new(name))
            })
            .clone();
        Ok(collection)
    }

    async fn collection_names(&self) -> Result<Vec<String>, ChatError> {
        let mut names: Vec<String> = self.collections.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

pub struct InMemoryCollection {
    name: String,
    records: RwLock<Vec<StoredRecord>>,
}

impl InMemoryCollection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            records: RwLock::new(Vec::new()),
        }
    }
}

fn dimension(records: &[StoredRecord]) -> Option<usize> {
    records.first().map(|r| r.vector.len())
}

#[async_trait]
impl Collection for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(&self, id: &str, vector: &[f32], text: &str) -> Result<(), ChatError> {
        let mut records = self.records.write().await;
        check_dimension(dimension(&records), vector.len())?;
        match records.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                existing.vector = vector.to_vec();
                existing.text = text.to_string();
            }
            None => records.push(StoredRecord {
                id: id.to_string(),
                vector: vector.to_vec(),
                text: text.to_string(),
            }),
        }
        Ok(())
    }

    async fn nearest(&self, vector: &[f32], top_k: usize) -> Result<Vec<Hit>, ChatError> {
        let records = self.records.read().await;
        check_dimension(dimension(&records), vector.len())?;
        let hits = records
            .iter()
            .map(|r| Hit {
                id: r.id.clone(),
                text: r.text.clone(),
                score: cosine_similarity(vector, &r.vector) as f64,
            })
            .collect();
        Ok(rank(hits, top_k))
    }

    async fn ids(&self) -> Result<Vec<String>, ChatError> {
        Ok(self.records.read().await.iter().map(|r| r.id.clone()).collect())
    }

    async fn get_text(&self, id: &str) -> Result<Option<String>, ChatError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.text.clone()))
    }
}
