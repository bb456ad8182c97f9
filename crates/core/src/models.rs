use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChunkStrategy {
    Fixed,
    Paragraph,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Txt,
}

impl FileType {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        if extension.eq_ignore_ascii_case("pdf") {
            Some(Self::Pdf)
        } else if extension.eq_ignore_ascii_case("txt") {
            Some(Self::Txt)
        } else {
            None
        }
    }
}

/// One bounded unit of a source document, with its zero-based position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextChunk {
    pub index: usize,
    pub text: String,
}

/// Payload stored alongside every vector in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPayload {
    pub chunk: String,
    pub filename: String,
    pub chunk_id: usize,
    pub document_id: String,
}

/// One point written to the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: RecordPayload,
}

/// Raw nearest-neighbor result as returned by the index, before
/// normalization. Payload shape is backend-defined.
#[derive(Debug, Clone)]
pub struct ScoredPoint {
    pub id: String,
    pub score: f64,
    pub payload: Value,
}

/// Normalized retrieval result. Downstream code consumes this shape only;
/// payload heterogeneity is absorbed in the retriever.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub chunk: String,
    pub filename: String,
    pub chunk_id: Option<u64>,
    pub score: f64,
}

impl SearchHit {
    /// Copy of this hit with the chunk text cut down to a short preview.
    /// Display-only; independent of prompt-side excerpt truncation.
    pub fn preview(mut self, max_chars: usize) -> Self {
        if self.chunk.chars().count() > max_chars {
            self.chunk = self.chunk.chars().take(max_chars).collect();
        }
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => formatter.write_str("user"),
            Self::Assistant => formatter.write_str("assistant"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub text: String,
}

impl ConversationMessage {
    pub fn render(&self) -> String {
        format!("{}: {}", self.role, self.text)
    }
}

/// Index lifecycle of a document metadata record.
///
/// Metadata is persisted before the batch upsert so a stable document id
/// exists ahead of index writes; the state records whether that upsert
/// ever completed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IndexState {
    Created,
    Indexed,
    IndexFailed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub id: String,
    pub filename: String,
    pub filetype: FileType,
    pub chunk_strategy: ChunkStrategy,
    pub number_of_chunks: usize,
    pub vector_ids: Vec<String>,
    pub state: IndexState,
    pub uploaded_at: DateTime<Utc>,
}

/// Result of one conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub answer: String,
    pub sources: Vec<SearchHit>,
}

#[derive(Debug, Clone, Copy)]
pub struct IngestionOptions {
    pub words_per_chunk: usize,
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            words_per_chunk: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_is_detected_case_insensitively() {
        assert_eq!(FileType::from_path(Path::new("a.PDF")), Some(FileType::Pdf));
        assert_eq!(FileType::from_path(Path::new("b.txt")), Some(FileType::Txt));
        assert_eq!(FileType::from_path(Path::new("c.docx")), None);
        assert_eq!(FileType::from_path(Path::new("noext")), None);
    }

    #[test]
    fn message_renders_as_role_prefixed_line() {
        let message = ConversationMessage {
            role: MessageRole::Assistant,
            text: "hello".to_string(),
        };
        assert_eq!(message.render(), "assistant: hello");
    }

    #[test]
    fn preview_truncates_only_long_chunks() {
        let hit = SearchHit {
            chunk: "abcdef".to_string(),
            filename: "f.txt".to_string(),
            chunk_id: Some(0),
            score: 1.0,
        };

        let short = hit.clone().preview(10);
        assert_eq!(short.chunk, "abcdef");

        let cut = hit.preview(3);
        assert_eq!(cut.chunk, "abc");
    }
}
