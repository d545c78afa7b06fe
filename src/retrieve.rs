//! Top-1 retrieval.
//!
//! Embeds the query and takes the single nearest record from the
//! collection. The best match is accepted whatever its score; an empty
//! collection yields [`Retrieval::NoDocument`].

use crate::embedding::EmbeddingProvider;
use crate::error::ChatError;
use crate::store::Collection;

#[derive(Debug, Clone, PartialEq)]
pub struct RetrievedChunk {
    pub id: String,
    pub text: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    Found(RetrievedChunk),
    NoDocument,
}

pub async fn retrieve(
    embedder: &dyn EmbeddingProvider,
    collection: &dyn Collection,
    query: &str,
) -> Result<Retrieval, ChatError> {
    let query_vec = embedder.embed(query).await?;
    let best = collection.nearest(&query_vec, 1).await?.into_iter().next();

    Ok(match best {
        Some(hit) => {
            log::debug!("retrieved chunk {} (score {:.4})", hit.id, hit.score);
            Retrieval::Found(RetrievedChunk {
                id: hit.id,
                text: hit.text,
                score: hit.score,
            })
        }
        None => {
            log::debug!("collection '{}' is empty", collection.name());
            Retrieval::NoDocument
        }
    })
}
