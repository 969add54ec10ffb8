use serde::{Deserialize, Serialize};

fn default_example_preview_width() -> usize {
    72
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Example previews longer than this are truncated (in characters)
    #[serde(default = "default_example_preview_width")]
    pub example_preview_width: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            example_preview_width: default_example_preview_width(),
        }
    }
}
