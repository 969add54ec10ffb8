use serde::Serialize;

use crate::annotate::annotate;
use crate::dictionary::LexicalResources;
use crate::error::SessionError;
use crate::language::LanguageProfile;
use crate::queue::{Pop, TermQueue};
use crate::resolver::{ExamplesOpened, Phase, Resolver};
use crate::types::{FieldKey, FieldValue, FinishedCard, Term};

/// Input from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the pending queue with the lines of this text
    LoadQueue(String),
    /// Finish the current term (emitting its card) and load the next one
    Advance,
    /// Abandon the current term and load the next one
    Skip,
    NextCandidate,
    PreviousCandidate,
    ConfirmCandidate,
    OpenExamples,
    /// 1-based example number
    SelectExample(usize),
    EditField(FieldKey),
    CommitField(String),
    CancelEdit,
    SwitchProfile(String),
}

/// Result of handling one intent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the intent changed anything
    pub applied: bool,
    /// Card produced by `Advance`
    pub finished: Option<FinishedCard>,
    /// Value to prefill after `EditField`
    pub prefill: Option<String>,
}

impl Outcome {
    fn applied() -> Self {
        Self {
            applied: true,
            ..Self::default()
        }
    }

    fn absorbed() -> Self {
        Self::default()
    }
}

/// Read-only snapshot for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub term: Option<Term>,
    pub profile: String,
    pub phase: Phase,
    pub candidate_index: usize,
    pub candidate_count: usize,
    pub fields: Vec<FieldView>,
    /// Numbered example previews, only while browsing examples
    pub examples: Vec<String>,
    pub editing: Option<FieldKey>,
    pub pending: usize,
    /// Queue ran out and no term is loaded
    pub exhausted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub key: FieldKey,
    /// `None` when the field does not apply to the shown candidate
    pub value: Option<FieldValue>,
    pub edited: bool,
}

/// One user's annotation session: queue, resolver and active profile
pub struct Session {
    resources: LexicalResources,
    profiles: Vec<Box<dyn LanguageProfile>>,
    active: usize,
    queue: TermQueue,
    resolver: Resolver,
    exhausted: bool,
}

impl Session {
    pub fn new(
        resources: LexicalResources,
        profiles: Vec<Box<dyn LanguageProfile>>,
        active_profile: &str,
    ) -> Result<Self, SessionError> {
        if profiles.is_empty() {
            return Err(SessionError::NoProfiles);
        }
        let active = profiles
            .iter()
            .position(|p| p.id() == active_profile)
            .ok_or_else(|| SessionError::UnknownProfile(active_profile.to_string()))?;

        Ok(Self {
            resources,
            profiles,
            active,
            queue: TermQueue::new(),
            resolver: Resolver::new(),
            exhausted: false,
        })
    }

    pub fn profile(&self) -> &dyn LanguageProfile {
        self.profiles[self.active].as_ref()
    }

    pub fn profile_ids(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.id()).collect()
    }

    pub fn queue(&self) -> &TermQueue {
        &self.queue
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn handle(&mut self, intent: Intent) -> Outcome {
        let phase = self.resolver.phase();

        if phase == Phase::BrowsingExamples && !matches!(intent, Intent::SelectExample(_)) {
            tracing::debug!("Absorbed {:?} while choosing an example", intent);
            return Outcome::absorbed();
        }

        match intent {
            Intent::LoadQueue(text) => {
                self.queue.load_from_text(&text);
                if self.resolver.term().is_none() {
                    self.exhausted = false;
                }
                Outcome::applied()
            }
            Intent::Advance => self.advance(),
            Intent::Skip => {
                if let Some(term) = self.resolver.term() {
                    tracing::info!("Skipped '{}'", term);
                }
                self.load_next();
                Outcome::applied()
            }
            Intent::NextCandidate => applied_if(self.resolver.next_candidate()),
            Intent::PreviousCandidate => applied_if(self.resolver.previous_candidate()),
            Intent::ConfirmCandidate => applied_if(self.resolver.confirm_candidate()),
            Intent::OpenExamples => {
                let opened = self.resolver.open_examples();
                applied_if(matches!(
                    opened,
                    ExamplesOpened::AutoConfirmed | ExamplesOpened::Browsing(_)
                ))
            }
            Intent::SelectExample(number) => applied_if(self.resolver.select_example(number)),
            Intent::EditField(key) => match self.resolver.edit_field(key) {
                Some(prefill) => Outcome {
                    prefill: Some(prefill),
                    ..Outcome::applied()
                },
                None => Outcome::absorbed(),
            },
            Intent::CommitField(text) => applied_if(self.resolver.commit_field(text).is_some()),
            Intent::CancelEdit => applied_if(self.resolver.cancel_edit()),
            Intent::SwitchProfile(id) => self.switch_profile(&id),
        }
    }

    fn advance(&mut self) -> Outcome {
        match self.resolver.phase() {
            Phase::Empty => {
                self.load_next();
                Outcome::applied()
            }
            Phase::EditingTerm => {
                let finished = self.resolver.finalize().map(|(term, fields)| FinishedCard {
                    term,
                    profile: self.profile().id().to_string(),
                    fields,
                });
                if let Some(card) = &finished {
                    tracing::info!("Finished '{}'", card.term);
                }
                self.load_next();
                Outcome {
                    finished,
                    ..Outcome::applied()
                }
            }
            // A candidate has to be confirmed (or the term skipped) first
            Phase::BrowsingCandidates | Phase::BrowsingExamples => Outcome::absorbed(),
        }
    }

    fn load_next(&mut self) {
        match self.queue.pop() {
            Pop::Term(term) => {
                self.exhausted = false;
                self.resolve(term);
            }
            Pop::EndOfQueue => {
                tracing::info!("No more terms");
                self.exhausted = true;
                self.resolver.clear();
            }
        }
    }

    fn resolve(&mut self, term: Term) {
        let profile = self.profiles[self.active].as_ref();
        let candidates = annotate(profile, &term, &self.resources);
        self.resolver.load(term, profile.field_keys(), candidates);
    }

    fn switch_profile(&mut self, id: &str) -> Outcome {
        let Some(index) = self.profiles.iter().position(|p| p.id() == id) else {
            tracing::warn!("Unknown language profile: {}", id);
            return Outcome::absorbed();
        };

        self.active = index;
        tracing::info!("Switched to profile {}", id);

        // Same term, fresh resolution; edits made under the old profile are dropped
        if let Some(term) = self.resolver.term().cloned() {
            self.resolve(term);
        }
        Outcome::applied()
    }

    pub fn view(&self) -> SessionView {
        let phase = self.resolver.phase();
        let state = self.resolver.state();

        let fields = match state {
            Some(state) => self
                .resolver
                .field_keys()
                .iter()
                .map(|&key| {
                    let value = if state.candidate_confirmed() {
                        match self.resolver.committed_value(key) {
                            Some(text) => Some(FieldValue::Text(text)),
                            // Examples not chosen yet: show what is on offer
                            None => state.current().get(key).cloned(),
                        }
                    } else {
                        state.current().get(key).cloned()
                    };
                    FieldView {
                        key,
                        value,
                        edited: self.resolver.is_edited(key),
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        let examples = match state {
            Some(state) if phase == Phase::BrowsingExamples => state
                .current()
                .examples()
                .iter()
                .enumerate()
                .map(|(i, example)| format!("{}. {}", i + 1, example))
                .collect(),
            _ => Vec::new(),
        };

        SessionView {
            term: self.resolver.term().cloned(),
            profile: self.profile().id().to_string(),
            phase,
            candidate_index: state.map(|s| s.candidate_index()).unwrap_or_default(),
            candidate_count: state.map(|s| s.candidates().len()).unwrap_or_default(),
            fields,
            examples,
            editing: self.resolver.editing(),
            pending: self.queue.len(),
            exhausted: self.exhausted && state.is_none(),
        }
    }
}

fn applied_if(applied: bool) -> Outcome {
    if applied {
        Outcome::applied()
    } else {
        Outcome::absorbed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnnotationCandidate;

    /// Profile returning canned candidates keyed by term
    struct Canned {
        id: &'static str,
        keys: Vec<FieldKey>,
        answers: Vec<(&'static str, Vec<AnnotationCandidate>)>,
    }

    impl LanguageProfile for Canned {
        fn id(&self) -> &str {
            self.id
        }

        fn name(&self) -> &str {
            self.id
        }

        fn language_tag(&self) -> &str {
            "xx"
        }

        fn field_keys(&self) -> &[FieldKey] {
            &self.keys
        }

        fn resolve(&self, term: &Term, _resources: &LexicalResources) -> Vec<AnnotationCandidate> {
            self.answers
                .iter()
                .find(|(t, _)| *t == term.as_str())
                .map(|(_, c)| c.clone())
                .unwrap_or_default()
        }
    }

    fn senses(n: usize) -> Vec<AnnotationCandidate> {
        (0..n)
            .map(|i| {
                AnnotationCandidate::blank()
                    .with_text(FieldKey::Definition, format!("sense {i}"))
                    .with_text(FieldKey::PartOfSpeech, "verb")
                    .with_examples(vec![format!("ex {i}a"), format!("ex {i}b")])
            })
            .collect()
    }

    fn session() -> Session {
        let english = Canned {
            id: "english",
            keys: vec![
                FieldKey::Definition,
                FieldKey::PartOfSpeech,
                FieldKey::Examples,
                FieldKey::Notes,
            ],
            answers: vec![("run", senses(3))],
        };
        let chinese = Canned {
            id: "chinese",
            keys: vec![FieldKey::Definition, FieldKey::Pinyin, FieldKey::Notes],
            answers: vec![(
                "run",
                vec![AnnotationCandidate::blank().with_text(FieldKey::Definition, "跑")],
            )],
        };
        Session::new(
            LexicalResources::default(),
            vec![Box::new(english), Box::new(chinese)],
            "english",
        )
        .unwrap()
    }

    #[test]
    fn empty_profile_list_is_rejected() {
        let err = Session::new(LexicalResources::default(), vec![], "english").err();
        assert_eq!(err, Some(SessionError::NoProfiles));
    }

    #[test]
    fn unknown_active_profile_is_rejected() {
        let english = Canned {
            id: "english",
            keys: vec![FieldKey::Definition],
            answers: Vec::new(),
        };
        let err =
            Session::new(LexicalResources::default(), vec![Box::new(english)], "klingon").err();
        assert_eq!(err, Some(SessionError::UnknownProfile("klingon".into())));
    }

    #[test]
    fn advancing_an_empty_queue_reports_exhaustion_every_time() {
        let mut session = session();
        for _ in 0..2 {
            assert!(session.handle(Intent::Advance).applied);
            let view = session.view();
            assert!(view.exhausted);
            assert_eq!(view.phase, Phase::Empty);
        }
    }

    #[test]
    fn advance_requires_a_confirmed_candidate() {
        let mut session = session();
        session.handle(Intent::LoadQueue("run\nwalk".into()));
        session.handle(Intent::Advance);
        assert_eq!(session.view().phase, Phase::BrowsingCandidates);

        let outcome = session.handle(Intent::Advance);
        assert!(!outcome.applied);
        assert_eq!(session.view().term.unwrap().as_str(), "run");
    }

    #[test]
    fn end_to_end_confirm_edit_finish_and_pop() {
        let mut session = session();
        session.handle(Intent::LoadQueue("Run\n研究员".into()));
        session.handle(Intent::Advance);

        let view = session.view();
        assert_eq!(view.candidate_count, 3);
        assert_eq!(view.pending, 1);

        session.handle(Intent::ConfirmCandidate);
        let outcome = session.handle(Intent::EditField(FieldKey::Notes));
        assert_eq!(outcome.prefill.as_deref(), Some(""));
        session.handle(Intent::CommitField("common verb".into()));

        let outcome = session.handle(Intent::Advance);
        let card = outcome.finished.unwrap();
        assert_eq!(card.term.as_str(), "run");
        assert_eq!(card.profile, "english");
        assert_eq!(card.field(FieldKey::Definition), "sense 0");
        assert_eq!(card.field(FieldKey::Notes), "common verb");
        assert_eq!(card.field(FieldKey::Examples), "");

        let view = session.view();
        assert_eq!(view.term.unwrap().as_str(), "研究员");
        // Nothing canned for it: one blank candidate, straight to editing
        assert_eq!(view.candidate_count, 1);
        assert_eq!(view.phase, Phase::EditingTerm);
        assert!(view.fields.iter().all(|f| f.value.is_none()));
    }

    #[test]
    fn example_browsing_locks_out_everything_else() {
        let mut session = session();
        session.handle(Intent::LoadQueue("run\nwalk".into()));
        session.handle(Intent::Advance);
        session.handle(Intent::ConfirmCandidate);
        assert!(session.handle(Intent::OpenExamples).applied);

        let view = session.view();
        assert_eq!(view.phase, Phase::BrowsingExamples);
        assert_eq!(view.examples, vec!["1. ex 0a", "2. ex 0b"]);

        for intent in [
            Intent::Skip,
            Intent::Advance,
            Intent::EditField(FieldKey::Notes),
            Intent::SwitchProfile("chinese".into()),
            Intent::SelectExample(9),
        ] {
            assert!(!session.handle(intent).applied);
        }
        assert_eq!(session.view().term.unwrap().as_str(), "run");

        assert!(session.handle(Intent::SelectExample(2)).applied);
        let card = session.handle(Intent::Advance).finished.unwrap();
        assert_eq!(card.field(FieldKey::Examples), "ex 0b");
    }

    #[test]
    fn switching_profile_re_resolves_the_same_term_and_drops_edits() {
        let mut session = session();
        session.handle(Intent::LoadQueue("run".into()));
        session.handle(Intent::Advance);
        session.handle(Intent::ConfirmCandidate);
        session.handle(Intent::EditField(FieldKey::Notes));
        session.handle(Intent::CommitField("draft".into()));

        assert!(session.handle(Intent::SwitchProfile("chinese".into())).applied);
        let view = session.view();
        assert_eq!(view.profile, "chinese");
        assert_eq!(view.term.unwrap().as_str(), "run");
        assert_eq!(view.phase, Phase::EditingTerm);
        assert!(view.fields.iter().all(|f| !f.edited));
        let keys: Vec<FieldKey> = view.fields.iter().map(|f| f.key).collect();
        assert_eq!(keys, vec![FieldKey::Definition, FieldKey::Pinyin, FieldKey::Notes]);

        assert!(!session.handle(Intent::SwitchProfile("klingon".into())).applied);
        assert_eq!(session.view().profile, "chinese");
    }

    #[test]
    fn skip_discards_the_current_term() {
        let mut session = session();
        session.handle(Intent::LoadQueue("run\nwalk".into()));
        session.handle(Intent::Advance);
        let outcome = session.handle(Intent::Skip);
        assert!(outcome.finished.is_none());
        assert_eq!(session.view().term.unwrap().as_str(), "walk");
    }
}
