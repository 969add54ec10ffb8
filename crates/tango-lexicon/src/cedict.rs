use std::collections::HashMap;
use std::path::Path;

use tango_core::{BilingualDictionary, HeadwordEntry, LookupError};

use crate::error::{LoadError, read_file};

/// One CC-CEDICT line: `TRAD SIMP [pin1 yin1] /def 1/def 2/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CedictEntry {
    pub traditional: String,
    pub simplified: String,
    /// Numbered pinyin as written in the file
    pub pinyin: String,
    pub definitions: Vec<String>,
}

impl CedictEntry {
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (traditional, rest) = line.split_once(' ')?;
        let (simplified, rest) = rest.split_once(' ')?;
        let rest = rest.strip_prefix('[')?;
        let (pinyin, rest) = rest.split_once(']')?;
        let body = rest.trim().strip_prefix('/')?.strip_suffix('/')?;

        let definitions: Vec<String> = body
            .split('/')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect();
        if definitions.is_empty() {
            return None;
        }

        Some(Self {
            traditional: traditional.to_string(),
            simplified: simplified.to_string(),
            pinyin: pinyin.trim().to_string(),
            definitions,
        })
    }
}

/// CC-CEDICT headword dictionary, indexed by both character sets
#[derive(Debug, Default)]
pub struct Cedict {
    entries: Vec<CedictEntry>,
    index: HashMap<String, usize>,
}

impl Cedict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut dict = Self::new();
        let mut skipped = 0usize;

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            match CedictEntry::parse_line(trimmed) {
                Some(entry) => dict.insert(entry),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed CC-CEDICT line(s)", skipped);
        }
        dict
    }

    pub fn load_from_file(path: &Path) -> Result<Self, LoadError> {
        tracing::info!("Loading CC-CEDICT from file: {}", path.display());
        let dict = Self::from_text(&read_file(path)?);
        if dict.is_empty() {
            return Err(LoadError::InvalidFormat(format!(
                "{} contains no CC-CEDICT entries",
                path.display()
            )));
        }
        tracing::info!("Loaded {} dictionary entries from file", dict.len());
        Ok(dict)
    }

    /// First entry for a headword wins
    pub fn insert(&mut self, entry: CedictEntry) {
        let idx = self.entries.len();
        self.index.entry(entry.simplified.clone()).or_insert(idx);
        self.index.entry(entry.traditional.clone()).or_insert(idx);
        self.entries.push(entry);
    }

    pub fn merge(mut self, other: Cedict) -> Self {
        for entry in other.entries {
            self.insert(entry);
        }
        self
    }

    pub fn get(&self, headword: &str) -> Option<&CedictEntry> {
        self.index.get(headword).and_then(|&idx| self.entries.get(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BilingualDictionary for Cedict {
    fn lookup_headword(&self, term: &str) -> Result<Option<HeadwordEntry>, LookupError> {
        Ok(self.get(term).map(|entry| HeadwordEntry {
            definitions: entry.definitions.clone(),
            romanization: entry.pinyin.clone(),
        }))
    }
}
