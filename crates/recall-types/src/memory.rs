//! Fact-memory outcome types for Recall.
//!
//! Facts themselves are plain strings partitioned by thread and append-only
//! (created on extraction, never updated or deleted). The enums here make the
//! degraded states of the memory subsystem explicit so callers can
//! distinguish "no facts found" from "memory subsystem down".

/// Outcome of storing a single fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    /// The fact and its embedding were written.
    Stored,
    /// Embedding was unavailable or failed; nothing was written.
    Skipped,
    /// The database write failed; nothing was written.
    Failed,
}

/// Outcome of a semantic retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// Retrieval ran; the list may be empty if nothing matched.
    Facts(Vec<String>),
    /// The memory subsystem could not answer (embedder down or query failed).
    Unavailable,
}

impl Recall {
    /// The retrieved facts, treating `Unavailable` as no facts.
    pub fn into_facts(self) -> Vec<String> {
        match self {
            Recall::Facts(facts) => facts,
            Recall::Unavailable => Vec::new(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Recall::Unavailable)
    }
}
