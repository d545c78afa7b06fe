use sqlx::SqlitePool;

use crate::error::ChatError;

/// Create the vector store schema. Safe to run on every open.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), ChatError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One row per chunk; embedding is a little-endian f32 BLOB
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            collection TEXT NOT NULL,
            id TEXT NOT NULL,
            text TEXT NOT NULL,
            embedding BLOB NOT NULL,
            PRIMARY KEY (collection, id),
            FOREIGN KEY (collection) REFERENCES collections(name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
