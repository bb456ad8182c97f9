use crate::embeddings::Embedder;
use crate::error::ChatError;
use crate::models::{ChatTurn, MessageRole};
use crate::prompt::build_prompt;
use crate::retriever::Retriever;
use crate::traits::{ConversationMemory, LlmClient, VectorIndex};
use tracing::warn;

/// Default number of excerpts retrieved per turn when the caller passes
/// none or a non-positive value.
pub const DEFAULT_TOP_K: usize = 4;

/// Source chunk texts are cut to this many characters in the returned hit
/// list. Display-only; the prompt keeps the longer excerpt.
pub const SOURCE_PREVIEW_CHARS: usize = 250;

/// Outcome of the best-effort memory read.
///
/// A read failure degrades quality, never correctness: the turn proceeds
/// with no transcript, and the distinction stays observable for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryOutcome {
    Loaded(String),
    Empty,
    Unavailable,
}

impl MemoryOutcome {
    pub fn transcript(&self) -> &str {
        match self {
            Self::Loaded(transcript) => transcript,
            Self::Empty | Self::Unavailable => "",
        }
    }
}

/// Composes memory, retrieval, prompt assembly, the LLM call, and the
/// memory write-back for one conversation turn.
pub struct ChatOrchestrator<E, V, M, L> {
    retriever: Retriever<E, V>,
    memory: M,
    llm: L,
}

impl<E, V, M, L> ChatOrchestrator<E, V, M, L>
where
    E: Embedder,
    V: VectorIndex,
    M: ConversationMemory,
    L: LlmClient,
{
    pub fn new(retriever: Retriever<E, V>, memory: M, llm: L) -> Self {
        Self {
            retriever,
            memory,
            llm,
        }
    }

    pub async fn turn(
        &self,
        session_id: Option<&str>,
        query: &str,
        top_k: Option<usize>,
        include_memory: bool,
    ) -> Result<ChatTurn, ChatError> {
        if query.trim().is_empty() {
            return Err(ChatError::EmptyQuery);
        }

        let limit = top_k.filter(|k| *k > 0).unwrap_or(DEFAULT_TOP_K);
        let hits = self.retriever.search(query, limit).await?;

        let memory = match (session_id, include_memory) {
            (Some(session), true) => self.load_memory(session).await,
            _ => MemoryOutcome::Empty,
        };

        let excerpts: Vec<String> = hits.iter().map(|hit| hit.chunk.clone()).collect();
        let prompt = build_prompt(&excerpts, memory.transcript(), query);

        let answer = self.llm.complete(&prompt).await?;

        if let Some(session) = session_id {
            self.record_turn(session, query, &answer).await;
        }

        Ok(ChatTurn {
            answer,
            sources: hits
                .into_iter()
                .map(|hit| hit.preview(SOURCE_PREVIEW_CHARS))
                .collect(),
        })
    }

    async fn load_memory(&self, session: &str) -> MemoryOutcome {
        match self.memory.read(session).await {
            Ok(lines) if lines.is_empty() => MemoryOutcome::Empty,
            Ok(lines) => MemoryOutcome::Loaded(lines.join("\n")),
            Err(error) => {
                warn!(session, error = %error, "memory read failed, continuing without it");
                MemoryOutcome::Unavailable
            }
        }
    }

    /// User message first, then the assistant reply; failures must not
    /// alter the returned answer.
    async fn record_turn(&self, session: &str, query: &str, answer: &str) {
        for (role, text) in [(MessageRole::User, query), (MessageRole::Assistant, answer)] {
            if let Err(error) = self.memory.append(session, role, text).await {
                warn!(session, role = %role, error = %error, "memory write failed");
            }
        }
    }
}
