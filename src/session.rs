//! Per-session state.
//!
//! A [`Session`] is created empty, handed to every ingestion and chat call,
//! and dropped when the user goes away. It tracks whether a document has
//! been ingested, the conversation history, and where the next chunk id
//! starts.

use crate::config::IdPolicy;
use crate::models::ConversationTurn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoDocument,
    DocumentReady,
}

#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    messages: Vec<ConversationTurn>,
    id_policy: IdPolicy,
    next_id: u64,
}

impl Session {
    pub fn new(id_policy: IdPolicy) -> Self {
        Self::starting_at(id_policy, 0)
    }

    /// A session whose monotonic ids start at `next_id` (used when the
    /// collection already holds records from an earlier run).
    pub fn starting_at(id_policy: IdPolicy, next_id: u64) -> Self {
        Self {
            state: SessionState::NoDocument,
            messages: Vec::new(),
            id_policy,
            next_id,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_document_ready(&self) -> bool {
        self.state == SessionState::DocumentReady
    }

    pub fn messages(&self) -> &[ConversationTurn] {
        &self.messages
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// First id of the next ingestion batch.
    pub(crate) fn batch_start(&self) -> u64 {
        match self.id_policy {
            IdPolicy::PerUpload => 0,
            IdPolicy::Monotonic => self.next_id,
        }
    }

    /// Record that `used` ids of the current batch were written.
    pub(crate) fn advance_ids(&mut self, used: u64) {
        if self.id_policy == IdPolicy::Monotonic {
            self.next_id += used;
        }
    }

    /// There is no way back to `NoDocument`.
    pub(crate) fn mark_document_ready(&mut self) {
        self.state = SessionState::DocumentReady;
    }

    pub(crate) fn push(&mut self, turn: ConversationTurn) {
        self.messages.push(turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_document() {
        let s = Session::new(IdPolicy::Monotonic);
        assert_eq!(s.state(), SessionState::NoDocument);
        assert!(s.messages().is_empty());
    }

    #[test]
    fn monotonic_ids_continue() {
        let mut s = Session::new(IdPolicy::Monotonic);
        assert_eq!(s.batch_start(), 0);
        s.advance_ids(3);
        assert_eq!(s.batch_start(), 3);
        s.advance_ids(2);
        assert_eq!(s.batch_start(), 5);
    }

    #[test]
    fn per_upload_ids_restart() {
        let mut s = Session::new(IdPolicy::PerUpload);
        s.advance_ids(3);
        assert_eq!(s.batch_start(), 0);
    }

    #[test]
    fn starting_at_offsets_monotonic_only() {
        assert_eq!(Session::starting_at(IdPolicy::Monotonic, 10).batch_start(), 10);
        assert_eq!(Session::starting_at(IdPolicy::PerUpload, 10).batch_start(), 0);
    }
}
