use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Load the small built-in sample data before user files
    #[serde(default = "default_enabled")]
    pub use_embedded: bool,
    /// JSON sense inventories
    #[serde(default)]
    pub sense_paths: Vec<String>,
    /// CC-CEDICT files
    #[serde(default)]
    pub cedict_paths: Vec<String>,
    /// TSV reading tables keyed by language tag ("eng", "cmn")
    #[serde(default)]
    pub reading_paths: BTreeMap<String, Vec<String>>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            use_embedded: default_enabled(),
            sense_paths: vec![],
            cedict_paths: vec![],
            reading_paths: BTreeMap::new(),
        }
    }
}
