use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::preprocess::{Preprocessor, TermPreprocessor};

/// Normalized vocabulary item (case-folded, NFC).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Term(String);

impl Term {
    /// Normalize raw input into a term, `None` if nothing is left after trimming
    pub fn parse(raw: &str) -> Option<Self> {
        let text = TermPreprocessor.process(raw);
        if text.is_empty() { None } else { Some(Self(text)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Card field keys, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Definition,
    Ipa,
    Pinyin,
    PartOfSpeech,
    Synonyms,
    Examples,
    Notes,
}

impl FieldKey {
    pub const ALL: [FieldKey; 7] = [
        FieldKey::Definition,
        FieldKey::Ipa,
        FieldKey::Pinyin,
        FieldKey::PartOfSpeech,
        FieldKey::Synonyms,
        FieldKey::Examples,
        FieldKey::Notes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Definition => "definition",
            FieldKey::Ipa => "ipa",
            FieldKey::Pinyin => "pinyin",
            FieldKey::PartOfSpeech => "partOfSpeech",
            FieldKey::Synonyms => "synonyms",
            FieldKey::Examples => "examples",
            FieldKey::Notes => "notes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Definition => "Definition",
            FieldKey::Ipa => "IPA",
            FieldKey::Pinyin => "Pinyin",
            FieldKey::PartOfSpeech => "Part of speech",
            FieldKey::Synonyms => "Synonyms",
            FieldKey::Examples => "Example",
            FieldKey::Notes => "Notes",
        }
    }

    /// Only `examples` carries several values
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, FieldKey::Examples)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for FieldKey {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        FieldKey::ALL
            .into_iter()
            .find(|key| {
                key.as_str().eq_ignore_ascii_case(&wanted)
                    || key.label().eq_ignore_ascii_case(&wanted)
            })
            .or(match wanted.as_str() {
                "pos" | "function" => Some(FieldKey::PartOfSpeech),
                "example" => Some(FieldKey::Examples),
                _ => None,
            })
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Flattened form used for previews and prefilled edits
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(" | "),
        }
    }
}

/// One proposed set of field values for a term.
///
/// Keys that a source does not populate are absent rather than empty, so the
/// presentation layer can tell "not applicable" apart from "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationCandidate {
    fields: BTreeMap<FieldKey, FieldValue>,
}

impl AnnotationCandidate {
    /// Candidate with every field absent
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, key: FieldKey, text: impl Into<String>) -> Self {
        self.set_text(key, text);
        self
    }

    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.fields
            .insert(FieldKey::Examples, FieldValue::List(examples));
        self
    }

    pub fn set_text(&mut self, key: FieldKey, text: impl Into<String>) {
        self.fields.insert(key, FieldValue::Text(text.into()));
    }

    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.fields.get(&key)
    }

    pub fn text(&self, key: FieldKey) -> Option<&str> {
        match self.fields.get(&key) {
            Some(FieldValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn examples(&self) -> &[String] {
        match self.fields.get(&FieldKey::Examples) {
            Some(FieldValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.fields.keys().copied()
    }

    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }

    /// Drop every key outside `allowed`, returning the dropped keys
    pub fn retain_keys(&mut self, allowed: &[FieldKey]) -> Vec<FieldKey> {
        let dropped: Vec<FieldKey> = self
            .fields
            .keys()
            .filter(|key| !allowed.contains(key))
            .copied()
            .collect();
        for key in &dropped {
            self.fields.remove(key);
        }
        dropped
    }
}

/// Finalized output for one term, handed to a card sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedCard {
    pub term: Term,
    pub profile: String,
    pub fields: BTreeMap<FieldKey, String>,
}

impl FinishedCard {
    pub fn field(&self, key: FieldKey) -> &str {
        self.fields.get(&key).map(String::as_str).unwrap_or_default()
    }
}
