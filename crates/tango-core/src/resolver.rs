//! Candidate selection state machine.
//!
//! ```text
//! Empty --load(n > 1)--> BrowsingCandidates --confirm--> EditingTerm
//! Empty --load(n = 1)------------------------------------^   |  ^
//!                                      open_examples (k > 1) |  | select_example(i)
//!                                                            v  |
//!                                                     BrowsingExamples
//! ```
//!
//! Inputs that do not apply to the current phase are no-ops.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{AnnotationCandidate, FieldKey, Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Empty,
    BrowsingCandidates,
    EditingTerm,
    BrowsingExamples,
}

/// Selection state for the term being worked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionState {
    candidates: Vec<AnnotationCandidate>,
    candidate_index: usize,
    candidate_confirmed: bool,
    example_index: Option<usize>,
    example_confirmed: bool,
    browsing_examples: bool,
}

impl ResolutionState {
    /// Fresh state; an empty list becomes a single blank candidate and a
    /// single candidate is confirmed immediately.
    pub fn new(mut candidates: Vec<AnnotationCandidate>) -> Self {
        if candidates.is_empty() {
            candidates.push(AnnotationCandidate::blank());
        }
        let candidate_confirmed = candidates.len() == 1;

        Self {
            candidates,
            candidate_index: 0,
            candidate_confirmed,
            example_index: None,
            example_confirmed: false,
            browsing_examples: false,
        }
    }

    pub fn candidates(&self) -> &[AnnotationCandidate] {
        &self.candidates
    }

    pub fn candidate_index(&self) -> usize {
        self.candidate_index
    }

    pub fn candidate_confirmed(&self) -> bool {
        self.candidate_confirmed
    }

    pub fn example_index(&self) -> Option<usize> {
        self.example_index
    }

    pub fn example_confirmed(&self) -> bool {
        self.example_confirmed
    }

    /// Candidate under the cursor (the confirmed one once confirmed)
    pub fn current(&self) -> &AnnotationCandidate {
        &self.candidates[self.candidate_index]
    }

    pub fn phase(&self) -> Phase {
        if !self.candidate_confirmed {
            Phase::BrowsingCandidates
        } else if self.browsing_examples {
            Phase::BrowsingExamples
        } else {
            Phase::EditingTerm
        }
    }

    /// Example committed for the confirmed candidate, if any
    pub fn confirmed_example(&self) -> Option<&str> {
        if !self.example_confirmed {
            return None;
        }
        self.example_index
            .and_then(|i| self.current().examples().get(i))
            .map(String::as_str)
    }
}

/// What happened when the examples field was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamplesOpened {
    /// Not in `EditingTerm`
    Ignored,
    /// Confirmed candidate has no examples
    NoExamples,
    /// Exactly one example, committed without browsing
    AutoConfirmed,
    /// Browsing this many examples
    Browsing(usize),
}

#[derive(Debug, Clone)]
struct WorkItem {
    term: Term,
    field_keys: Vec<FieldKey>,
    state: ResolutionState,
    edits: BTreeMap<FieldKey, String>,
    editing: Option<FieldKey>,
}

/// Owner and only writer of the `ResolutionState` for the current term
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    current: Option<WorkItem>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start working `term`, discarding everything about the previous one
    pub fn load(&mut self, term: Term, field_keys: &[FieldKey], candidates: Vec<AnnotationCandidate>) {
        let state = ResolutionState::new(candidates);
        tracing::debug!(
            "Loaded '{}' with {} candidate(s), phase {:?}",
            term,
            state.candidates.len(),
            state.phase()
        );

        self.current = Some(WorkItem {
            term,
            field_keys: field_keys.to_vec(),
            state,
            edits: BTreeMap::new(),
            editing: None,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn term(&self) -> Option<&Term> {
        self.current.as_ref().map(|item| &item.term)
    }

    pub fn state(&self) -> Option<&ResolutionState> {
        self.current.as_ref().map(|item| &item.state)
    }

    pub fn field_keys(&self) -> &[FieldKey] {
        self.current
            .as_ref()
            .map(|item| item.field_keys.as_slice())
            .unwrap_or_default()
    }

    pub fn phase(&self) -> Phase {
        self.state().map(ResolutionState::phase).unwrap_or(Phase::Empty)
    }

    /// Field currently open for editing
    pub fn editing(&self) -> Option<FieldKey> {
        self.current.as_ref().and_then(|item| item.editing)
    }

    pub fn is_edited(&self, key: FieldKey) -> bool {
        self.current
            .as_ref()
            .is_some_and(|item| item.edits.contains_key(&key))
    }

    pub fn next_candidate(&mut self) -> bool {
        self.step_candidate(1)
    }

    pub fn previous_candidate(&mut self) -> bool {
        self.step_candidate(-1)
    }

    fn step_candidate(&mut self, delta: isize) -> bool {
        let Some(state) = self.browsing_candidates() else {
            return false;
        };
        let count = state.candidates.len() as isize;
        let next = (state.candidate_index as isize + delta).rem_euclid(count);
        state.candidate_index = next as usize;
        tracing::debug!("Previewing candidate {}/{}", next + 1, count);
        true
    }

    pub fn confirm_candidate(&mut self) -> bool {
        let Some(state) = self.browsing_candidates() else {
            return false;
        };
        state.candidate_confirmed = true;
        tracing::debug!("Confirmed candidate {}", state.candidate_index + 1);
        true
    }

    fn browsing_candidates(&mut self) -> Option<&mut ResolutionState> {
        self.current
            .as_mut()
            .map(|item| &mut item.state)
            .filter(|state| state.phase() == Phase::BrowsingCandidates)
    }

    /// Enter the examples field of the confirmed candidate
    pub fn open_examples(&mut self) -> ExamplesOpened {
        let Some(item) = self.current.as_mut() else {
            return ExamplesOpened::Ignored;
        };
        if item.state.phase() != Phase::EditingTerm {
            return ExamplesOpened::Ignored;
        }
        item.editing = None;

        let state = &mut item.state;
        match state.current().examples().len() {
            0 => ExamplesOpened::NoExamples,
            1 => {
                state.example_index = Some(0);
                state.example_confirmed = true;
                tracing::debug!("Single example auto-confirmed");
                ExamplesOpened::AutoConfirmed
            }
            count => {
                state.browsing_examples = true;
                ExamplesOpened::Browsing(count)
            }
        }
    }

    /// Pick example `number` (1-based) while browsing examples. Out-of-range
    /// numbers are ignored and browsing continues.
    pub fn select_example(&mut self, number: usize) -> bool {
        let Some(item) = self.current.as_mut() else {
            return false;
        };
        let state = &mut item.state;
        if state.phase() != Phase::BrowsingExamples {
            return false;
        }
        if number == 0 || number > state.current().examples().len() {
            tracing::debug!("Ignoring example selection {}", number);
            return false;
        }

        state.example_index = Some(number - 1);
        state.example_confirmed = true;
        state.browsing_examples = false;
        tracing::debug!("Confirmed example {}", number);
        true
    }

    /// Open `key` for editing and return its current value to prefill.
    /// `examples` is chosen through `open_examples`, never typed.
    pub fn edit_field(&mut self, key: FieldKey) -> Option<String> {
        if self.phase() != Phase::EditingTerm || key.is_multi_valued() {
            return None;
        }
        if !self.field_keys().contains(&key) {
            return None;
        }

        let prefill = self.committed_value(key).unwrap_or_default();
        if let Some(item) = self.current.as_mut() {
            item.editing = Some(key);
        }
        Some(prefill)
    }

    /// Store `text` as the final value of the field being edited
    pub fn commit_field(&mut self, text: impl Into<String>) -> Option<FieldKey> {
        let item = self.current.as_mut()?;
        if item.state.phase() != Phase::EditingTerm {
            return None;
        }
        let key = item.editing.take()?;
        item.edits.insert(key, text.into());
        tracing::debug!("Committed edit to {}", key);
        Some(key)
    }

    pub fn cancel_edit(&mut self) -> bool {
        self.current
            .as_mut()
            .and_then(|item| item.editing.take())
            .is_some()
    }

    /// Value that would be written to the card for `key` right now.
    /// `None` before a candidate is confirmed or when the field is absent.
    pub fn committed_value(&self, key: FieldKey) -> Option<String> {
        let item = self.current.as_ref()?;
        if !item.state.candidate_confirmed {
            return None;
        }
        if let Some(edited) = item.edits.get(&key) {
            return Some(edited.clone());
        }
        if key.is_multi_valued() {
            return item.state.confirmed_example().map(str::to_string);
        }
        item.state.current().get(key).map(|value| value.display())
    }

    /// Final field map for the card, one entry per declared key
    pub fn finalize(&self) -> Option<(Term, BTreeMap<FieldKey, String>)> {
        let item = self.current.as_ref()?;
        if item.state.phase() != Phase::EditingTerm {
            return None;
        }

        let fields = item
            .field_keys
            .iter()
            .map(|&key| (key, self.committed_value(key).unwrap_or_default()))
            .collect();

        Some((item.term.clone(), fields))
    }
}
