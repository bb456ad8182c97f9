use crate::embeddings::Embedder;
use crate::error::{ChatError, EmbedError};
use crate::models::{ScoredPoint, SearchHit};
use crate::traits::VectorIndex;
use serde_json::Value;

/// Embeds a query, searches the vector index, and normalizes the raw
/// results into [`SearchHit`]s.
///
/// This is the single place result-shape heterogeneity is absorbed;
/// everything downstream sees the uniform hit record. Index order is
/// preserved (already descending by relevance); no re-ranking happens here.
pub struct Retriever<E, V> {
    embedder: E,
    index: V,
}

impl<E, V> Retriever<E, V>
where
    E: Embedder,
    V: VectorIndex,
{
    pub fn new(embedder: E, index: V) -> Self {
        Self { embedder, index }
    }

    pub fn index(&self) -> &V {
        &self.index
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, ChatError> {
        let inputs = [query.to_string()];
        let mut vectors = self.embedder.embed(&inputs).await?;

        if vectors.len() != 1 {
            return Err(ChatError::Embedding(EmbedError::CountMismatch {
                expected: 1,
                actual: vectors.len(),
            }));
        }
        let vector = vectors.remove(0);

        let points = self.index.search(&vector, limit).await?;
        Ok(points.into_iter().map(normalize_hit).collect())
    }
}

/// Maps a raw index point to the uniform hit shape.
///
/// Chunk text comes from payload key `chunk`, falling back to `text`;
/// a point whose payload yields no text is kept with an empty chunk, since
/// its score and filename may still be informative.
fn normalize_hit(point: ScoredPoint) -> SearchHit {
    let chunk = point
        .payload
        .pointer("/chunk")
        .and_then(Value::as_str)
        .or_else(|| point.payload.pointer("/text").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let filename = point
        .payload
        .pointer("/filename")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let chunk_id = point.payload.pointer("/chunk_id").and_then(Value::as_u64);

    SearchHit {
        chunk,
        filename,
        chunk_id,
        score: point.score,
    }
}
