use regex::{Regex, RegexBuilder};

use crate::dictionary::{LexicalResources, Sense};
use crate::error::AnnotateError;
use crate::language::{LanguageProfile, PosPolicy, map_part_of_speech};
use crate::types::{AnnotationCandidate, FieldKey, Term};

/// Run `profile` for `term` and enforce the candidate-list invariants: only
/// declared keys are populated and the list is never empty.
pub fn annotate(
    profile: &dyn LanguageProfile,
    term: &Term,
    resources: &LexicalResources,
) -> Vec<AnnotationCandidate> {
    let mut candidates = profile.resolve(term, resources);

    for candidate in &mut candidates {
        let dropped = candidate.retain_keys(profile.field_keys());
        if !dropped.is_empty() {
            tracing::warn!(
                "Profile {} populated undeclared fields {:?} for '{}'",
                profile.id(),
                dropped,
                term
            );
        }
    }

    if candidates.is_empty() {
        candidates.push(AnnotationCandidate::blank());
    }

    tracing::debug!(
        "Resolved '{}' with profile {}: {} candidate(s)",
        term,
        profile.id(),
        candidates.len()
    );

    candidates
}

/// One candidate per sense of `term` in the shared sense inventory.
///
/// Lookup failures yield no candidates. A sense whose POS code cannot be
/// mapped under `policy` is skipped.
pub fn sense_candidates(
    term: &Term,
    language_tag: &str,
    resources: &LexicalResources,
    policy: PosPolicy,
) -> Vec<AnnotationCandidate> {
    let senses = match resources
        .senses()
        .and_then(|inventory| inventory.lookup_senses(term.as_str(), language_tag))
    {
        Ok(senses) => senses,
        Err(e) => {
            tracing::warn!("Sense lookup for '{}' ({}) failed: {}", term, language_tag, e);
            return Vec::new();
        }
    };

    let emphasis = Emphasis::new(term.as_str());

    senses
        .iter()
        .filter_map(|sense| match sense_candidate(sense, term, &emphasis, policy) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::warn!("Skipping sense of '{}': {}", term, e);
                None
            }
        })
        .collect()
}

fn sense_candidate(
    sense: &Sense,
    term: &Term,
    emphasis: &Emphasis,
    policy: PosPolicy,
) -> Result<AnnotationCandidate, AnnotateError> {
    let part_of_speech = map_part_of_speech(&sense.pos_code, policy)?;

    let examples = sense
        .examples
        .iter()
        .map(|example| emphasis.apply(example))
        .collect();

    let synonyms = sense
        .lemmas
        .iter()
        .filter(|lemma| lemma.to_lowercase() != term.as_str())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("; ");

    Ok(AnnotationCandidate::blank()
        .with_text(FieldKey::Definition, sense.gloss.clone())
        .with_examples(examples)
        .with_text(FieldKey::PartOfSpeech, part_of_speech)
        .with_text(FieldKey::Synonyms, synonyms))
}

/// Wraps case-insensitive occurrences of a surface form in `<b>` tags
pub struct Emphasis {
    pattern: Option<Regex>,
}

impl Emphasis {
    pub fn new(surface: &str) -> Self {
        let pattern = RegexBuilder::new(&regex::escape(surface))
            .case_insensitive(true)
            .build()
            .ok();
        Self { pattern }
    }

    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, "<b>$0</b>").into_owned(),
            None => text.to_string(),
        }
    }
}
