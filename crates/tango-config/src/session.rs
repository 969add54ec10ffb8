use std::env;

use serde::{Deserialize, Serialize};

fn default_language() -> String {
    env::var("TANGO_LANGUAGE").unwrap_or_else(|_| "english".to_string())
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Active language profile id
    #[serde(default = "default_language")]
    pub language: String,
    /// Initial term queue, one term per line
    pub queue_file: Option<String>,
    /// JSON-lines card output, `<home>/cards.jsonl` when unset
    pub output_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            queue_file: None,
            output_path: None,
        }
    }
}
