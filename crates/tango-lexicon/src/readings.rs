use std::collections::HashMap;
use std::path::Path;

use tango_core::{LookupError, PronunciationGenerator};

use crate::error::{LoadError, read_file};

/// Pronunciation table loaded from TSV (`key\treading` per line).
/// Single-character keys also serve per-character readings.
#[derive(Debug, Default)]
pub struct ReadingTable {
    words: HashMap<String, Vec<String>>,
    chars: HashMap<char, String>,
}

impl ReadingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tsv(content: &str) -> Self {
        let mut table = Self::new();

        for line in content.lines() {
            if line.trim_start().starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() >= 2 {
                table.insert(parts[0], parts[1]);
            }
        }

        table
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        tracing::info!("Loading readings from file: {}", path.display());
        let table = Self::from_tsv(&read_file(path)?);
        tracing::info!("Loaded readings for {} keys from file", table.len());
        Ok(table)
    }

    pub fn insert(&mut self, key: &str, reading: &str) {
        let key = key.trim().to_lowercase();
        let reading = reading.trim();
        if key.is_empty() || reading.is_empty() {
            return;
        }

        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            self.chars.entry(c).or_insert_with(|| reading.to_string());
        }

        let readings = self.words.entry(key).or_default();
        if !readings.iter().any(|r| r == reading) {
            readings.push(reading.to_string());
        }
    }

    /// Add `other`'s readings after ours
    pub fn merge(mut self, other: ReadingTable) -> Self {
        for (key, readings) in other.words {
            for reading in readings {
                self.insert(&key, &reading);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl PronunciationGenerator for ReadingTable {
    fn transliterate(&self, term: &str) -> Result<Vec<String>, LookupError> {
        Ok(self
            .words
            .get(&term.to_lowercase())
            .cloned()
            .unwrap_or_default())
    }

    fn char_reading(&self, c: char) -> Result<Option<String>, LookupError> {
        let folded = c.to_lowercase().next().unwrap_or(c);
        Ok(self.chars.get(&folded).cloned())
    }
}
