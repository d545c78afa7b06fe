//! SQLite-backed [`VectorStore`] implementation.
//!
//! Collections and records survive process restarts. Vectors are stored as
//! BLOBs (see [`vec_to_blob`]) and nearest-neighbor lookup scans every record
//! of the collection, scoring with cosine similarity.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use crate::db;
use crate::embedding::{blob_to_vec, cosine_similarity, vec_to_blob};
use crate::error::ChatError;
use crate::migrate;

use super::{check_dimension, rank, Collection, Hit, VectorStore};

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and apply the schema.
    pub async fn open(path: &Path) -> Result<Self, ChatError> {
        let pool = db::connect(path).await?;
        migrate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl VectorStore for SqliteStore {
    async fn get_or_create(&self, name: &str) -> Result<Arc<dyn Collection>, ChatError> {
        let created =
            sqlx::query("INSERT INTO collections (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
                .bind(name)
                .execute(&self.pool)
                .await?
                .rows_affected();
        if created > 0 {
            log::debug!("creating collection '{}'", name);
        }

        let collection: Arc<dyn Collection> = Arc::new(SqliteCollection {
            pool: self.pool.clone(),
            name: name.to_string(),
        });
        Ok(collection)
    }

    async fn collection_names(&self) -> Result<Vec<String>, ChatError> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM collections ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }
}

pub struct SqliteCollection {
    pool: SqlitePool,
    name: String,
}

impl SqliteCollection {
    /// Dimension of the first stored vector, `None` when empty.
    async fn dimension(&self) -> Result<Option<usize>, ChatError> {
        let bytes: Option<i64> = sqlx::query_scalar(
            "SELECT length(embedding) FROM records WHERE collection = ? ORDER BY rowid LIMIT 1",
        )
        .bind(&self.name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(bytes.map(|b| b as usize / 4))
    }
}

#[async_trait]
impl Collection for SqliteCollection {
    fn name(&self) -> &str {
        &self.name
    }

    async fn upsert(&self, id: &str, vector: &[f32], text: &str) -> Result<(), ChatError> {
        check_dimension(self.dimension().await?, vector.len())?;
        sqlx::query(
            r#"
            INSERT INTO records (collection, id, text, embedding)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(collection, id) DO UPDATE SET
                text = excluded.text,
                embedding = excluded.embedding
            "#,
        )
        .bind(&self.name)
        .bind(id)
        .bind(text)
        .bind(vec_to_blob(vector))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn nearest(&self, vector: &[f32], top_k: usize) -> Result<Vec<Hit>, ChatError> {
        check_dimension(self.dimension().await?, vector.len())?;
        let rows = sqlx::query(
            "SELECT id, text, embedding FROM records WHERE collection = ? ORDER BY rowid",
        )
        .bind(&self.name)
        .fetch_all(&self.pool)
        .await?;

        let hits = rows
            .iter()
            .map(|row| {
                let blob: Vec<u8> = row.get("embedding");
                Hit {
                    id: row.get("id"),
                    text: row.get("text"),
                    score: cosine_similarity(vector, &blob_to_vec(&blob)) as f64,
                }
            })
            .collect();

        Ok(rank(hits, top_k))
    }

    async fn ids(&self) -> Result<Vec<String>, ChatError> {
        let ids: Vec<String> =
            sqlx::query_scalar("SELECT id FROM records WHERE collection = ? ORDER BY rowid")
                .bind(&self.name)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    async fn get_text(&self, id: &str) -> Result<Option<String>, ChatError> {
        let text: Option<String> =
            sqlx::query_scalar("SELECT text FROM records WHERE collection = ? AND id = ?")
                .bind(&self.name)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(text)
    }
}
