use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tango_core::{LookupError, Sense, SenseInventory};

use crate::error::{LoadError, read_file};

// JSON structures for the WordNet-shaped export
#[derive(Debug, Deserialize)]
struct SenseFile {
    senses: Vec<SenseRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct SenseRecord {
    lang: String,
    pos: String,
    #[serde(default)]
    gloss: String,
    #[serde(default)]
    examples: Vec<String>,
    lemmas: Vec<String>,
}

/// In-memory sense inventory indexed by (language tag, lemma)
#[derive(Debug, Default)]
pub struct SenseStore {
    records: Vec<SenseRecord>,
    index: HashMap<(String, String), Vec<usize>>,
}

impl SenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json_str: &str) -> Result<Self, LoadError> {
        let file: SenseFile = serde_json::from_str(json_str)?;
        let mut store = Self::new();
        for record in file.senses {
            store.push(record);
        }
        Ok(store)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        tracing::info!("Loading senses from file: {}", path.display());
        let store = Self::from_json(&read_file(path)?)?;
        tracing::info!("Loaded {} senses from file", store.len());
        Ok(store)
    }

    /// Add one sense; `lemmas` may use `_` or spaces between words
    pub fn insert(&mut self, language_tag: &str, sense: Sense) {
        self.push(SenseRecord {
            lang: language_tag.to_string(),
            pos: sense.pos_code,
            gloss: sense.gloss,
            examples: sense.examples,
            lemmas: sense.lemmas,
        });
    }

    fn push(&mut self, record: SenseRecord) {
        let idx = self.records.len();
        for lemma in &record.lemmas {
            let slot = self
                .index
                .entry((record.lang.clone(), lemma_key(lemma)))
                .or_default();
            // A lemma listed twice in one sense must not duplicate the sense
            if slot.last() != Some(&idx) {
                slot.push(idx);
            }
        }
        self.records.push(record);
    }

    /// Append every sense of `other` after ours
    pub fn merge(mut self, other: SenseStore) -> Self {
        for record in other.records {
            self.push(record);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SenseInventory for SenseStore {
    fn lookup_senses(&self, term: &str, language_tag: &str) -> Result<Vec<Sense>, LookupError> {
        let key = (language_tag.to_string(), lemma_key(term));
        let senses = self
            .index
            .get(&key)
            .into_iter()
            .flatten()
            .filter_map(|&idx| self.records.get(idx))
            .map(|record| Sense {
                gloss: record.gloss.clone(),
                examples: record.examples.clone(),
                pos_code: record.pos.clone(),
                lemmas: record.lemmas.iter().map(|l| l.replace('_', " ")).collect(),
            })
            .collect();
        Ok(senses)
    }
}

fn lemma_key(lemma: &str) -> String {
    lemma.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "senses": [
            { "lang": "eng", "pos": "v", "gloss": "flee", "examples": ["run!"],
              "lemmas": ["scat", "run", "turn_tail"] },
            { "lang": "eng", "pos": "n", "gloss": "a score", "lemmas": ["run", "Run"] },
            { "lang": "cmn", "pos": "v", "gloss": "flee", "lemmas": ["跑"] }
        ]
    }"#;

    #[test]
    fn looks_up_by_language_and_lemma_in_file_order() {
        let store = SenseStore::from_json(SAMPLE).unwrap();
        let senses = store.lookup_senses("run", "eng").unwrap();

        assert_eq!(senses.len(), 2);
        assert_eq!(senses[0].gloss, "flee");
        assert_eq!(senses[0].lemmas, vec!["scat", "run", "turn tail"]);
        assert_eq!(senses[1].pos_code, "n");
        assert!(senses[1].examples.is_empty());

        assert!(store.lookup_senses("run", "cmn").unwrap().is_empty());
        assert_eq!(store.lookup_senses("跑", "cmn").unwrap().len(), 1);
    }

    #[test]
    fn multiword_terms_match_underscored_lemmas() {
        let store = SenseStore::from_json(SAMPLE).unwrap();
        assert_eq!(store.lookup_senses("turn tail", "eng").unwrap().len(), 1);
    }

    #[test]
    fn merge_appends_after_existing_senses() {
        let mut extra = SenseStore::new();
        extra.insert(
            "eng",
            Sense {
                gloss: "operate".into(),
                pos_code: "v".into(),
                lemmas: vec!["run".into()],
                ..Sense::default()
            },
        );
        let store = SenseStore::from_json(SAMPLE).unwrap().merge(extra);
        let senses = store.lookup_senses("run", "eng").unwrap();
        assert_eq!(senses.len(), 3);
        assert_eq!(senses[2].gloss, "operate");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            SenseStore::from_json("{ \"senses\": 3 }"),
            Err(LoadError::ParseError(_))
        ));
    }
}
