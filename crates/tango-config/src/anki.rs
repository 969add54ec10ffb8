use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// Enable Anki integration
    pub enabled: bool,
    /// AnkiConnect URL
    pub url: String,
    /// Default deck name
    pub deck: String,
    /// Default model name
    pub model: String,
    /// Tags added to every note
    pub tags: Vec<String>,
    /// Front field template, `{term}` and `{<field>}` placeholders
    pub front_template: String,
    pub back_template: String,
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnkiConfig {
    pub fn new() -> Self {
        let url = env::var("TANGO_ANKI_URL").unwrap_or_else(|_| "http://localhost:8765".to_string());

        Self {
            enabled: false,
            url,
            deck: "Vocabulary".to_string(),
            model: "Basic".to_string(),
            tags: vec!["tango".to_string()],
            front_template: "{term}".to_string(),
            back_template: "{ipa}{pinyin}<br>{partOfSpeech}<br>{definition}<br>{examples}<br>{synonyms}<br>{notes}".to_string(),
        }
    }
}
