pub mod conversation;
pub mod documents;
pub mod qdrant;

pub use conversation::{InMemoryConversationStore, DEFAULT_MEMORY_CAP};
pub use documents::InMemoryDocumentStore;
pub use qdrant::QdrantStore;
