use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding backend returned {status}")]
    Backend { status: String },

    #[error("embedding count {actual} does not match input count {expected}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("embedding dimension {actual} does not match configured {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("index request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("llm backend returned {status}: {details}")]
    Backend { status: String, details: String },

    #[error("llm response contains no completion text")]
    EmptyCompletion,
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("memory store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Ingestion failures. Each fixed failure point of the pipeline has its own
/// variant so operators can tell which dependency broke.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no readable text found in document")]
    NoReadableText,

    #[error("chunking produced 0 chunks")]
    NoChunks,

    #[error("embedding generation failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("embedding count {actual} does not match chunk count {expected}")]
    EmbeddingCountMismatch { expected: usize, actual: usize },

    #[error("vector index upsert failed: {0}")]
    IndexUpsert(#[source] IndexError),

    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("metadata store error: {0}")]
    Metadata(#[from] StoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf parse error: {0}")]
    PdfParse(String),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbedError),

    #[error("vector search failed: {0}")]
    Search(#[from] IndexError),

    #[error("llm completion failed: {0}")]
    Llm(#[from] LlmError),
}

pub type Result<T, E = IngestError> = std::result::Result<T, E>;
