//! Chat service: the linear pipeline around the conversation node.
//!
//! `ChatService` is the graph runner of this system: entry routes straight
//! into the single `ConversationNode` and back out. Multi-turn state lives
//! behind the `HistoryStore` collaborator, keyed by thread id.

use recall_types::error::ChatError;
use recall_types::llm::Message;

use crate::chat::history::HistoryStore;
use crate::chat::turn::{ConversationNode, TurnOutput};
use crate::llm::provider::LlmProvider;
use crate::memory::store::FactStore;

/// Orchestrates one conversation turn end to end.
///
/// Generic over the provider, fact store, and history store traits so that
/// recall-core never depends on recall-infra.
pub struct ChatService<P: LlmProvider, F: FactStore, H: HistoryStore> {
    node: ConversationNode<P, F>,
    history: H,
}

impl<P: LlmProvider, F: FactStore, H: HistoryStore> ChatService<P, F, H> {
    pub fn new(node: ConversationNode<P, F>, history: H) -> Self {
        Self { node, history }
    }

    /// Access the history store.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Run one turn: persist the user message, run the node on the last
    /// message in history, persist and return the reply.
    pub async fn send(&self, thread_id: &str, input: &str) -> Result<TurnOutput, ChatError> {
        self.history
            .append_message(thread_id, &Message::user(input))
            .await?;

        let history = self.history.load_history(thread_id).await?;
        let last = history
            .last()
            .cloned()
            .unwrap_or_else(|| Message::user(input));

        let output = self.node.run(thread_id, &last).await?;

        self.history.append_message(thread_id, &output.reply).await?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use recall_types::error::RepositoryError;
    use recall_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
    };
    use recall_types::memory::{Recall, StoreOutcome};

    use crate::memory::extractor::FactExtractor;

    /// Provider that replays scripted outcomes in order and records requests.
    struct ScriptedProvider {
        replies: Mutex<VecDeque<Result<String, ()>>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<String, ()>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl LlmProvider for &ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(content)) => Ok(CompletionResponse {
                    content,
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                Some(Err(())) | None => Err(LlmError::Provider {
                    message: "scripted failure".to_string(),
                }),
            }
        }
    }

    /// In-memory fact store with a switchable availability flag.
    struct FakeFacts {
        available: bool,
        stored: Mutex<Vec<(String, String)>>,
    }

    impl FakeFacts {
        fn new(available: bool) -> Self {
            Self {
                available,
                stored: Mutex::new(Vec::new()),
            }
        }
    }

    impl FactStore for &FakeFacts {
        async fn store(&self, thread_id: &str, content: &str) -> StoreOutcome {
            if !self.available {
                return StoreOutcome::Skipped;
            }
            self.stored
                .lock()
                .unwrap()
                .push((thread_id.to_string(), content.to_string()));
            StoreOutcome::Stored
        }

        async fn retrieve(&self, thread_id: &str, _query: &str, k: usize) -> Recall {
            if !self.available {
                return Recall::Unavailable;
            }
            let facts: Vec<String> = self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|(tid, _)| tid == thread_id)
                .map(|(_, c)| c.clone())
                .take(k)
                .collect();
            Recall::Facts(facts)
        }
    }

    /// In-memory history keyed by thread id.
    #[derive(Default)]
    struct FakeHistory {
        threads: Mutex<HashMap<String, Vec<Message>>>,
    }

    impl HistoryStore for &FakeHistory {
        async fn load_history(&self, thread_id: &str) -> Result<Vec<Message>, RepositoryError> {
            Ok(self
                .threads
                .lock()
                .unwrap()
                .get(thread_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn append_message(
            &self,
            thread_id: &str,
            message: &Message,
        ) -> Result<(), RepositoryError> {
            self.threads
                .lock()
                .unwrap()
                .entry(thread_id.to_string())
                .or_default()
                .push(message.clone());
            Ok(())
        }
    }

    fn service<'a>(
        provider: &'a ScriptedProvider,
        facts: &'a FakeFacts,
        history: &'a FakeHistory,
        persona: &str,
    ) -> ChatService<&'a ScriptedProvider, &'a FakeFacts, &'a FakeHistory> {
        let node = ConversationNode::new(
            provider,
            facts,
            FactExtractor::new("extract facts"),
            persona.to_string(),
            "test-model".to_string(),
            3,
        );
        ChatService::new(node, history)
    }

    #[tokio::test]
    async fn test_send_appends_user_and_reply_to_history() {
        let provider = ScriptedProvider::new(vec![
            Ok(r#"{"facts": []}"#.to_string()),
            Ok("hello there".to_string()),
        ]);
        let facts = FakeFacts::new(true);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "");

        let output = svc.send("t1", "hi").await.unwrap();
        assert_eq!(output.reply.content, "hello there");

        let messages = svc.history().load_history("t1").await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "hi");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "hello there");
    }

    #[tokio::test]
    async fn test_context_order_persona_facts_user() {
        let provider = ScriptedProvider::new(vec![
            Ok(r#"{"facts": ["name is Alex"]}"#.to_string()),
            Ok("reply".to_string()),
        ]);
        let facts = FakeFacts::new(true);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "You are terse.");

        let output = svc.send("t1", "I'm Alex").await.unwrap();

        assert_eq!(output.context.len(), 3);
        assert_eq!(output.context[0].role, MessageRole::System);
        assert_eq!(output.context[0].content, "You are terse.");
        assert_eq!(output.context[1].role, MessageRole::System);
        assert!(output.context[1].content.contains("name is Alex"));
        assert_eq!(output.context[2].role, MessageRole::User);
        assert_eq!(output.context[2].content, "I'm Alex");
    }

    #[tokio::test]
    async fn test_context_is_bare_user_message_without_persona_or_facts() {
        let provider = ScriptedProvider::new(vec![
            Ok(r#"{"facts": []}"#.to_string()),
            Ok("reply".to_string()),
        ]);
        let facts = FakeFacts::new(true);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "");

        let output = svc.send("t1", "hi").await.unwrap();
        assert_eq!(output.context.len(), 1);
        assert_eq!(output.context[0].role, MessageRole::User);
    }

    #[tokio::test]
    async fn test_degraded_memory_still_answers() {
        let provider = ScriptedProvider::new(vec![
            Ok(r#"{"facts": ["lost fact"]}"#.to_string()),
            Ok("reply".to_string()),
        ]);
        let facts = FakeFacts::new(false);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "");

        let output = svc.send("t1", "hi").await.unwrap();
        assert_eq!(output.reply.content, "reply");
        // No facts note in the context.
        assert_eq!(output.context.len(), 1);
        assert!(facts.stored.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extracted_facts_are_stored_under_the_thread() {
        let provider = ScriptedProvider::new(vec![
            Ok(r#"{"facts": ["likes tea", "likes tea", "plays go"]}"#.to_string()),
            Ok("reply".to_string()),
        ]);
        let facts = FakeFacts::new(true);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "");

        svc.send("thread-a", "hi").await.unwrap();

        let stored = facts.stored.lock().unwrap();
        assert_eq!(
            *stored,
            vec![
                ("thread-a".to_string(), "likes tea".to_string()),
                ("thread-a".to_string(), "plays go".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_extraction_failure_does_not_block_the_turn() {
        let provider = ScriptedProvider::new(vec![Err(()), Ok("still here".to_string())]);
        let facts = FakeFacts::new(true);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "");

        let output = svc.send("t1", "hi").await.unwrap();
        assert_eq!(output.reply.content, "still here");
    }

    #[tokio::test]
    async fn test_primary_call_failure_propagates() {
        let provider =
            ScriptedProvider::new(vec![Ok(r#"{"facts": []}"#.to_string()), Err(())]);
        let facts = FakeFacts::new(true);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "");

        let err = svc.send("t1", "hi").await.unwrap_err();
        assert!(matches!(err, ChatError::Llm(_)));

        // The failed reply must not be appended.
        let messages = svc.history().load_history("t1").await.unwrap();
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn test_extraction_request_uses_instruction_and_temperature_zero() {
        let provider = ScriptedProvider::new(vec![
            Ok(r#"{"facts": []}"#.to_string()),
            Ok("reply".to_string()),
        ]);
        let facts = FakeFacts::new(true);
        let history = FakeHistory::default();
        let svc = service(&provider, &facts, &history, "");

        svc.send("t1", "hi").await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].system.as_deref(), Some("extract facts"));
        assert_eq!(requests[0].temperature, Some(0.0));
        assert!(requests[1].system.is_none());
    }
}
