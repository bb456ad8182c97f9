pub mod chunking;
pub mod embeddings;
pub mod error;
pub mod extract;
pub mod ingest;
pub mod llm;
pub mod models;
pub mod orchestrator;
pub mod prompt;
pub mod retriever;
pub mod stores;
pub mod traits;

pub use chunking::{build_chunks, chunk_fixed, chunk_paragraphs, DEFAULT_WORDS_PER_CHUNK};
pub use embeddings::{Embedder, HashEmbedder, HttpEmbedder, DEFAULT_EMBEDDING_DIMENSIONS};
pub use error::{
    ChatError, EmbedError, IndexError, IngestError, LlmError, MemoryError, StoreError,
};
pub use extract::{detect_file_type, extract_text};
pub use ingest::IngestionPipeline;
pub use llm::ChatCompletionsClient;
pub use models::{
    ChatTurn, ChunkStrategy, ConversationMessage, DocumentMetadata, FileType, IndexRecord,
    IndexState, IngestionOptions, MessageRole, RecordPayload, ScoredPoint, SearchHit, TextChunk,
};
pub use orchestrator::{ChatOrchestrator, MemoryOutcome, DEFAULT_TOP_K, SOURCE_PREVIEW_CHARS};
pub use prompt::{build_prompt, MAX_EXCERPT_CHARS};
pub use retriever::Retriever;
pub use stores::{
    InMemoryConversationStore, InMemoryDocumentStore, QdrantStore, DEFAULT_MEMORY_CAP,
};
pub use traits::{ConversationMemory, DocumentStore, LlmClient, VectorIndex};
