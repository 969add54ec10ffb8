use std::collections::VecDeque;

use crate::types::Term;

/// Result of taking the next term off the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pop {
    Term(Term),
    EndOfQueue,
}

/// Pending terms, consumed head first
#[derive(Debug, Clone, Default)]
pub struct TermQueue {
    pending: VecDeque<Term>,
}

impl TermQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from raw text, one term per line
    pub fn from_text(raw: &str) -> Self {
        let mut queue = Self::new();
        queue.load_from_text(raw);
        queue
    }

    /// Replace the pending terms with the lines of `raw`. Lines are trimmed,
    /// case-folded and NFC-normalized; blank lines are dropped.
    pub fn load_from_text(&mut self, raw: &str) {
        self.pending = raw.lines().filter_map(Term::parse).collect();
        tracing::info!("Loaded {} term(s) into the queue", self.pending.len());
    }

    /// Remove and return the head. Keeps returning `EndOfQueue` once empty.
    pub fn pop(&mut self) -> Pop {
        match self.pending.pop_front() {
            Some(term) => Pop::Term(term),
            None => Pop::EndOfQueue,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.pending.iter()
    }
}
