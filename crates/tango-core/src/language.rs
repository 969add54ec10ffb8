use crate::dictionary::LexicalResources;
use crate::error::AnnotateError;
use crate::types::{AnnotationCandidate, FieldKey, Term};

/// Lookup strategy and field schema for one language
pub trait LanguageProfile: Send + Sync {
    /// Stable identifier ("english", "chinese", ...)
    fn id(&self) -> &str;

    /// Human readable name
    fn name(&self) -> &str;

    /// Tag passed to the sense inventory ("eng", "cmn", ...)
    fn language_tag(&self) -> &str;

    /// Fields this profile can populate, in display order. Every candidate
    /// returned by `resolve` only uses these keys.
    fn field_keys(&self) -> &[FieldKey];

    /// Candidate annotations for `term`, most relevant first
    fn resolve(&self, term: &Term, resources: &LexicalResources) -> Vec<AnnotationCandidate>;
}

/// What to do with a sense-inventory POS code outside the fixed table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosPolicy {
    /// Unknown codes are a data-contract break
    Strict,
    /// Unknown codes are shown as-is
    PassThrough,
}

/// Map a short POS code ("n", "v", "a", "r") to its label
pub fn map_part_of_speech(code: &str, policy: PosPolicy) -> Result<String, AnnotateError> {
    let label = match code {
        "n" => "noun",
        "v" => "verb",
        "a" => "adjective",
        "r" => "adverb",
        other => {
            return match policy {
                PosPolicy::Strict => Err(AnnotateError::UnmappedPartOfSpeech {
                    code: other.to_string(),
                }),
                PosPolicy::PassThrough => Ok(other.to_string()),
            };
        }
    };

    Ok(label.to_string())
}
