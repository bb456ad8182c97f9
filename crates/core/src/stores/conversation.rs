use crate::error::MemoryError;
use crate::models::{ConversationMessage, MessageRole};
use crate::traits::ConversationMemory;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

pub const DEFAULT_MEMORY_CAP: usize = 10;

/// In-process conversation memory with per-session FIFO retention.
///
/// The `ConversationMemory` trait is the swap point for a networked store;
/// this implementation keeps the capped-log semantics without one.
pub struct InMemoryConversationStore {
    max_messages: usize,
    sessions: RwLock<HashMap<String, VecDeque<ConversationMessage>>>,
}

impl InMemoryConversationStore {
    pub fn new(max_messages: usize) -> Self {
        Self {
            max_messages: max_messages.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_CAP)
    }
}

#[async_trait]
impl ConversationMemory for InMemoryConversationStore {
    async fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        text: &str,
    ) -> Result<(), MemoryError> {
        let mut sessions = self.sessions.write().await;
        let log = sessions.entry(session_id.to_string()).or_default();

        log.push_back(ConversationMessage {
            role,
            text: text.to_string(),
        });

        while log.len() > self.max_messages {
            log.pop_front();
        }

        Ok(())
    }

    async fn read(&self, session_id: &str) -> Result<Vec<String>, MemoryError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(session_id)
            .map(|log| log.iter().map(ConversationMessage::render).collect())
            .unwrap_or_default())
    }

    async fn clear(&self, session_id: &str) -> Result<(), MemoryError> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn eviction_keeps_the_most_recent_cap_messages_in_order() {
        let cap = 6;
        let store = InMemoryConversationStore::new(cap);

        for n in 0..cap + 5 {
            store
                .append("s1", MessageRole::User, &format!("message {n}"))
                .await
                .expect("in-memory append");
        }

        let history = store.read("s1").await.expect("in-memory read");
        assert_eq!(history.len(), cap);
        assert_eq!(history[0], "user: message 5");
        assert_eq!(history[cap - 1], "user: message 10");
    }

    #[tokio::test]
    async fn history_preserves_arrival_order_per_turn() {
        let store = InMemoryConversationStore::default();
        store
            .append("s1", MessageRole::User, "question")
            .await
            .expect("in-memory append");
        store
            .append("s1", MessageRole::Assistant, "answer")
            .await
            .expect("in-memory append");

        let history = store.read("s1").await.expect("in-memory read");
        assert_eq!(history, vec!["user: question", "assistant: answer"]);
    }

    #[tokio::test]
    async fn sessions_are_isolated_and_clearable() {
        let store = InMemoryConversationStore::default();
        store
            .append("a", MessageRole::User, "hi")
            .await
            .expect("in-memory append");

        assert!(store.read("b").await.expect("in-memory read").is_empty());

        store.clear("a").await.expect("in-memory clear");
        assert!(store.read("a").await.expect("in-memory read").is_empty());
    }
}
