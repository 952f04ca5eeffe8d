//! Single-turn conversation logic.
//!
//! `ConversationNode` is the one node of the pipeline. Per invocation it
//! extracts facts from the user message, stores them, retrieves the most
//! relevant remembered facts, assembles the prompt, and calls the LLM.
//!
//! Memory and extraction failures degrade the turn (fewer or no facts); the
//! response call itself is the single path that propagates its error to the
//! caller. That asymmetry is intentional: a dead provider should stop the
//! loop, a dead memory backend should not.

use recall_types::llm::{CompletionRequest, LlmError, Message};
use recall_types::memory::StoreOutcome;

use crate::llm::provider::LlmProvider;
use crate::memory::extractor::FactExtractor;
use crate::memory::store::FactStore;

/// Result of one conversation turn.
#[derive(Debug, Clone)]
pub struct TurnOutput {
    /// The exact context sent to the LLM, in order.
    pub context: Vec<Message>,
    /// The assistant's reply.
    pub reply: Message,
}

/// The conversation node: extract, store, retrieve, prompt, respond.
pub struct ConversationNode<P: LlmProvider, F: FactStore> {
    provider: P,
    facts: F,
    extractor: FactExtractor,
    /// System persona prepended to every prompt; empty means none.
    persona: String,
    chat_model: String,
    retrieval_k: usize,
}

impl<P: LlmProvider, F: FactStore> ConversationNode<P, F> {
    pub fn new(
        provider: P,
        facts: F,
        extractor: FactExtractor,
        persona: String,
        chat_model: String,
        retrieval_k: usize,
    ) -> Self {
        Self {
            provider,
            facts,
            extractor,
            persona,
            chat_model,
            retrieval_k,
        }
    }

    /// Run one turn for `user_message` within `thread_id`.
    #[tracing::instrument(name = "conversation_turn", skip(self, user_message), fields(thread_id = %thread_id))]
    pub async fn run(
        &self,
        thread_id: &str,
        user_message: &Message,
    ) -> Result<TurnOutput, LlmError> {
        let text = user_message.content.as_str();

        let extracted = self
            .extractor
            .extract(&self.provider, &self.chat_model, text)
            .await;
        for fact in &extracted {
            match self.facts.store(thread_id, fact).await {
                StoreOutcome::Stored => {
                    tracing::debug!(fact = %fact, "stored fact");
                }
                StoreOutcome::Skipped => {
                    tracing::warn!(fact = %fact, "embedding unavailable; fact not stored");
                }
                StoreOutcome::Failed => {
                    tracing::warn!(fact = %fact, "fact write failed; skipped");
                }
            }
        }

        let recall = self.facts.retrieve(thread_id, text, self.retrieval_k).await;
        if recall.is_unavailable() {
            tracing::warn!("fact retrieval unavailable; continuing without memory");
        }
        let remembered = recall.into_facts();

        let mut context = Vec::new();
        if !self.persona.is_empty() {
            context.push(Message::system(self.persona.clone()));
        }
        if !remembered.is_empty() {
            context.push(Message::system(facts_note(&remembered)));
        }
        context.push(user_message.clone());

        let request = CompletionRequest {
            model: self.chat_model.clone(),
            messages: context.clone(),
            system: None,
            temperature: None,
        };

        // The one unguarded external call: errors abort the turn.
        let response = self.provider.complete(&request).await?;

        Ok(TurnOutput {
            context,
            reply: Message::assistant(response.content),
        })
    }
}

/// System note injecting retrieved facts into the prompt.
fn facts_note(facts: &[String]) -> String {
    let mut note = String::from("Relevant information I remember about this conversation:");
    for fact in facts {
        note.push_str("\n- ");
        note.push_str(fact);
    }
    note
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_note_lists_each_fact() {
        let note = facts_note(&["likes tea".to_string(), "name is Alex".to_string()]);
        assert!(note.contains("\n- likes tea"));
        assert!(note.contains("\n- name is Alex"));
    }
}
