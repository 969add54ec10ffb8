use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::dictionary::DictionaryConfig;
use self::session::SessionConfig;
use self::ui::UiConfig;

pub mod anki;
pub mod dictionary;
pub mod session;
pub mod ui;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub anki: AnkiConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,

    /// Directory holding user dictionary files, resolved relative paths start here
    pub data_dir: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let data_dir = env::var("TANGO_DATA_DIR").ok();

        Config {
            dictionary: DictionaryConfig::default(),
            anki: AnkiConfig::new(),
            session: SessionConfig::default(),
            ui: UiConfig::default(),

            data_dir,
        }
    }

    /// Re-apply `TANGO_LANGUAGE`, `TANGO_ANKI_URL` and `TANGO_DATA_DIR` on top
    /// of a config read from disk
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(language) = var("TANGO_LANGUAGE") {
            self.session.language = language;
        }
        if let Some(url) = var("TANGO_ANKI_URL") {
            self.anki.url = url;
        }
        if let Some(dir) = var("TANGO_DATA_DIR") {
            self.data_dir = Some(dir);
        }
    }

    /// Resolve a configured path against `data_dir`
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        match &self.data_dir {
            Some(dir) if path.is_relative() => PathBuf::from(dir).join(path),
            _ => path,
        }
    }
}
