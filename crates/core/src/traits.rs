use crate::error::{IndexError, LlmError, MemoryError, StoreError};
use crate::models::{DocumentMetadata, IndexRecord, MessageRole, ScoredPoint};
use async_trait::async_trait;

/// Nearest-neighbor store over embedding vectors.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Creates the collection with the given dimensionality if it does not
    /// exist yet. Distance metric is the backend's configured default
    /// (cosine here).
    async fn ensure_collection(&self, dimension: usize) -> Result<(), IndexError>;

    /// Batch write, idempotent per id. A partial backend failure surfaces
    /// as one error; callers must not assume any subset was persisted.
    async fn upsert(&self, records: &[IndexRecord]) -> Result<(), IndexError>;

    /// Returns up to `limit` points ordered by descending relevance score.
    async fn search(&self, vector: &[f32], limit: usize) -> Result<Vec<ScoredPoint>, IndexError>;
}

/// Append-only, capped per-session log of conversation messages.
///
/// The store enforces the retention cap, evicting oldest messages first.
#[async_trait]
pub trait ConversationMemory: Send + Sync {
    async fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<(), MemoryError>;

    /// Chronological history rendered as `role: text` lines.
    async fn read(&self, session_id: &str) -> Result<Vec<String>, MemoryError>;

    async fn clear(&self, session_id: &str) -> Result<(), MemoryError>;
}

/// Persistence for per-document ingestion metadata.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, metadata: DocumentMetadata) -> Result<(), StoreError>;

    /// Transition to `Indexed` and record the vector ids; returns the
    /// finalized record.
    async fn mark_indexed(
        &self,
        id: &str,
        vector_ids: Vec<String>,
    ) -> Result<DocumentMetadata, StoreError>;

    /// Transition to `IndexFailed`; the record is retained, id list empty.
    async fn mark_failed(&self, id: &str) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Option<DocumentMetadata>, StoreError>;
}

/// Synchronous request/response completion boundary to the LLM provider.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
