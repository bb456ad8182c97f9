use crate::chunking::build_chunks;
use crate::embeddings::Embedder;
use crate::error::IngestError;
use crate::models::{
    ChunkStrategy, DocumentMetadata, FileType, IndexRecord, IndexState, IngestionOptions,
    RecordPayload,
};
use crate::traits::{DocumentStore, VectorIndex};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

/// Chunk -> embed -> index pipeline for one document.
///
/// Fail-fast: each failure point surfaces its own error and nothing after
/// it runs. The metadata record is written before index writes so a stable
/// document id exists; on upsert failure it is retained in `IndexFailed`
/// with an empty id list. Retries are safe because record ids are freshly
/// generated each attempt; stale partial writes are orphaned, harmless
/// points in the index.
pub struct IngestionPipeline<E, V, D> {
    embedder: E,
    index: V,
    documents: D,
    options: IngestionOptions,
}

impl<E, V, D> IngestionPipeline<E, V, D>
where
    E: Embedder,
    V: VectorIndex,
    D: DocumentStore,
{
    pub fn new(embedder: E, index: V, documents: D, options: IngestionOptions) -> Self {
        Self {
            embedder,
            index,
            documents,
            options,
        }
    }

    pub async fn ingest(
        &self,
        document_text: &str,
        filename: &str,
        filetype: FileType,
        strategy: ChunkStrategy,
    ) -> Result<DocumentMetadata, IngestError> {
        if document_text.trim().is_empty() {
            return Err(IngestError::NoReadableText);
        }

        let chunks = build_chunks(document_text, strategy, self.options.words_per_chunk);
        if chunks.is_empty() {
            return Err(IngestError::NoChunks);
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = self.embedder.embed(&texts).await?;

        // Embedder contract violation, not a data problem.
        if embeddings.len() != chunks.len() {
            return Err(IngestError::EmbeddingCountMismatch {
                expected: chunks.len(),
                actual: embeddings.len(),
            });
        }

        let document_id = Uuid::new_v4().to_string();
        self.documents
            .create(DocumentMetadata {
                id: document_id.clone(),
                filename: filename.to_string(),
                filetype,
                chunk_strategy: strategy,
                number_of_chunks: chunks.len(),
                vector_ids: Vec::new(),
                state: IndexState::Created,
                uploaded_at: Utc::now(),
            })
            .await?;

        let mut records = Vec::with_capacity(chunks.len());
        let mut vector_ids = Vec::with_capacity(chunks.len());

        for (chunk, vector) in chunks.iter().zip(embeddings) {
            let record_id = Uuid::new_v4().to_string();
            vector_ids.push(record_id.clone());
            records.push(IndexRecord {
                id: record_id,
                vector,
                payload: RecordPayload {
                    chunk: chunk.text.clone(),
                    filename: filename.to_string(),
                    chunk_id: chunk.index,
                    document_id: document_id.clone(),
                },
            });
        }

        if let Err(error) = self.index.upsert(&records).await {
            if let Err(store_error) = self.documents.mark_failed(&document_id).await {
                warn!(
                    document_id = %document_id,
                    error = %store_error,
                    "unable to record failed index state"
                );
            }
            return Err(IngestError::IndexUpsert(error));
        }

        let finalized = self.documents.mark_indexed(&document_id, vector_ids).await?;
        info!(
            document_id = %finalized.id,
            filename = %finalized.filename,
            chunk_count = finalized.number_of_chunks,
            "document indexed"
        );

        Ok(finalized)
    }
}
