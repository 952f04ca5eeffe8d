//! Conversation orchestration for Recall.
//!
//! This module defines the `HistoryStore` trait for multi-turn persistence,
//! the `ConversationNode` that runs a single turn, and the `ChatService`
//! pipeline wiring them together.

pub mod history;
pub mod service;
pub mod turn;
