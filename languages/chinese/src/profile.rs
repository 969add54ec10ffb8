use tango_core::{
    AnnotationCandidate, FieldKey, HeadwordEntry, LanguageProfile, LexicalResources, PosPolicy,
    Term, sense_candidates,
};

use crate::normalize::normalize;
use crate::pinyin::numbered_to_accented;

const LANGUAGE_TAG: &str = "cmn";

const FIELDS: &[FieldKey] = &[
    FieldKey::Definition,
    FieldKey::Pinyin,
    FieldKey::PartOfSpeech,
    FieldKey::Synonyms,
    FieldKey::Examples,
    FieldKey::Notes,
];

/// Mandarin profile: CC-CEDICT headword first, then the Chinese sense graph
#[derive(Debug, Default)]
pub struct ChineseProfile;

impl ChineseProfile {
    pub fn new() -> Self {
        Self
    }

    fn lookup_headword(&self, term: &Term, resources: &LexicalResources) -> Option<HeadwordEntry> {
        match resources
            .dictionary(LANGUAGE_TAG)
            .and_then(|dictionary| dictionary.lookup_headword(term.as_str()))
        {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Headword lookup for '{}' failed: {}", term, e);
                None
            }
        }
    }

    /// Reading built character by character. Runs of characters without a
    /// reading are kept verbatim as one segment.
    fn fallback_pinyin(&self, term: &Term, resources: &LexicalResources) -> String {
        let generator = match resources.pronunciation(LANGUAGE_TAG) {
            Ok(generator) => generator,
            Err(e) => {
                tracing::warn!("No pinyin fallback for '{}': {}", term, e);
                return String::new();
            }
        };

        let mut segments: Vec<String> = Vec::new();
        let mut unknown = String::new();

        for c in term.as_str().chars().filter(|c| !c.is_whitespace()) {
            match generator.char_reading(c) {
                Ok(Some(reading)) => {
                    if !unknown.is_empty() {
                        segments.push(std::mem::take(&mut unknown));
                    }
                    segments.push(numbered_to_accented(&reading));
                }
                Ok(None) => unknown.push(c),
                Err(e) => {
                    tracing::warn!("Character reading for '{}' failed: {}", c, e);
                    return String::new();
                }
            }
        }
        if !unknown.is_empty() {
            segments.push(unknown);
        }

        segments.join(" ")
    }
}

impl LanguageProfile for ChineseProfile {
    fn id(&self) -> &str {
        "chinese"
    }

    fn name(&self) -> &str {
        "Chinese (Mandarin)"
    }

    fn language_tag(&self) -> &str {
        LANGUAGE_TAG
    }

    fn field_keys(&self) -> &[FieldKey] {
        FIELDS
    }

    fn resolve(&self, term: &Term, resources: &LexicalResources) -> Vec<AnnotationCandidate> {
        let entry = self.lookup_headword(term, resources);

        let pinyin = match &entry {
            Some(entry) => normalize(&numbered_to_accented(&entry.romanization)),
            None => self.fallback_pinyin(term, resources),
        };

        let mut candidates = Vec::new();

        if let Some(entry) = entry {
            let definition = entry
                .definitions
                .iter()
                .map(|d| normalize(d.trim()))
                .filter(|d| !d.is_empty())
                .collect::<Vec<_>>()
                .join("; ");
            candidates.push(
                AnnotationCandidate::blank()
                    .with_text(FieldKey::Definition, definition)
                    .with_text(FieldKey::Pinyin, pinyin.clone()),
            );
        }

        candidates.extend(
            sense_candidates(term, LANGUAGE_TAG, resources, PosPolicy::PassThrough)
                .into_iter()
                .map(|candidate| candidate.with_text(FieldKey::Pinyin, pinyin.clone())),
        );

        if candidates.is_empty() {
            candidates.push(AnnotationCandidate::blank().with_text(FieldKey::Pinyin, pinyin));
        }

        candidates
    }
}
