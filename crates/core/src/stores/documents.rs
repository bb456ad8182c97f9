use crate::error::StoreError;
use crate::models::{DocumentMetadata, IndexState};
use crate::traits::DocumentStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process document metadata store implementing the two-phase
/// Created -> Indexed / IndexFailed lifecycle.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<String, DocumentMetadata>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, in no particular order.
    pub async fn all(&self) -> Vec<DocumentMetadata> {
        self.documents.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, metadata: DocumentMetadata) -> Result<(), StoreError> {
        self.documents
            .write()
            .await
            .insert(metadata.id.clone(), metadata);
        Ok(())
    }

    async fn mark_indexed(
        &self,
        id: &str,
        vector_ids: Vec<String>,
    ) -> Result<DocumentMetadata, StoreError> {
        let mut documents = self.documents.write().await;
        let metadata = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        metadata.vector_ids = vector_ids;
        metadata.state = IndexState::Indexed;
        Ok(metadata.clone())
    }

    async fn mark_failed(&self, id: &str) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        let metadata = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        metadata.state = IndexState::IndexFailed;
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<DocumentMetadata>, StoreError> {
        Ok(self.documents.read().await.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChunkStrategy, FileType};
    use chrono::Utc;

    fn created_metadata(id: &str) -> DocumentMetadata {
        DocumentMetadata {
            id: id.to_string(),
            filename: "report.txt".to_string(),
            filetype: FileType::Txt,
            chunk_strategy: ChunkStrategy::Paragraph,
            number_of_chunks: 2,
            vector_ids: Vec::new(),
            state: IndexState::Created,
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn mark_indexed_records_ids_and_state() {
        let store = InMemoryDocumentStore::new();
        store
            .create(created_metadata("doc-1"))
            .await
            .expect("in-memory create");

        let finalized = store
            .mark_indexed("doc-1", vec!["v1".to_string(), "v2".to_string()])
            .await
            .expect("mark indexed");

        assert_eq!(finalized.state, IndexState::Indexed);
        assert_eq!(finalized.vector_ids.len(), finalized.number_of_chunks);
    }

    #[tokio::test]
    async fn mark_failed_retains_the_record_with_empty_ids() {
        let store = InMemoryDocumentStore::new();
        store
            .create(created_metadata("doc-1"))
            .await
            .expect("in-memory create");
        store.mark_failed("doc-1").await.expect("mark failed");

        let metadata = store
            .get("doc-1")
            .await
            .expect("in-memory get")
            .expect("record retained");
        assert_eq!(metadata.state, IndexState::IndexFailed);
        assert!(metadata.vector_ids.is_empty());
        assert_eq!(metadata.number_of_chunks, 2);
    }

    #[tokio::test]
    async fn transitions_on_unknown_documents_fail() {
        let store = InMemoryDocumentStore::new();
        assert!(store.mark_indexed("missing", Vec::new()).await.is_err());
        assert!(store.mark_failed("missing").await.is_err());
        assert!(store
            .get("missing")
            .await
            .expect("in-memory get")
            .is_none());
    }
}
