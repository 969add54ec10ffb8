use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tango_config::Config;

/// `$TANGO_HOME`, else `$HOME/.tango`
pub fn tango_root() -> anyhow::Result<PathBuf> {
    if let Ok(home) = env::var("TANGO_HOME") {
        return Ok(PathBuf::from(home));
    }
    let home = env::var("HOME").map_err(|_| anyhow::anyhow!("Neither TANGO_HOME nor HOME is set"))?;
    Ok(PathBuf::from(home).join(".tango"))
}

/// Represents a user profile
#[derive(Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub value: Config,
}

/// Named configs stored as `<root>/profiles/<name>.json`
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// JSON-lines card output used when the profile names none
    pub fn cards_path(&self) -> PathBuf {
        self.root.join("cards.jsonl")
    }

    fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Initialize user config folders and main profile if missing
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.profiles_dir())?;

        let main_profile = self.profile_path("main");
        if !main_profile.exists() {
            let profile = Profile {
                name: "main".into(),
                value: Config::new(),
            };
            fs::write(&main_profile, serde_json::to_string_pretty(&profile)?)?;
            tracing::info!("Created main profile in {}", self.root.display());
        }

        Ok(())
    }

    /// Load a user profile by name, defaulting to main if name not found
    pub fn load(&self, name: &str) -> anyhow::Result<Config> {
        let profile_file = self.profile_path(name);
        if profile_file.exists() {
            return read_profile(&profile_file);
        }

        tracing::warn!("Profile {name} not found, falling back to main profile or defaults");
        let main_file = self.profile_path("main");
        if main_file.exists() {
            read_profile(&main_file)
        } else {
            Ok(Config::new())
        }
    }
}

fn read_profile(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let profile: Profile = serde_json::from_str(&data)
        .map_err(|e| anyhow::anyhow!("Invalid profile {}: {}", path.display(), e))?;
    tracing::info!("Loaded profile {} from {}", profile.name, path.display());
    Ok(profile.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_main_profile_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());

        store.init().unwrap();
        let main = store.profiles_dir().join("main.json");
        assert!(main.exists());

        fs::write(&main, r#"{ "name": "main", "value": { "ui": { "example_preview_width": 40 } } }"#)
            .unwrap();
        store.init().unwrap();
        assert_eq!(store.load("main").unwrap().ui.example_preview_width, 40);
    }

    #[test]
    fn unknown_profile_falls_back_to_main() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        store.init().unwrap();

        fs::write(
            store.profiles_dir().join("main.json"),
            r#"{ "name": "main", "value": { "session": { "language": "chinese" } } }"#,
        )
        .unwrap();

        assert_eq!(store.load("nope").unwrap().session.language, "chinese");
    }

    #[test]
    fn missing_store_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("absent"));
        assert!(store.load("main").unwrap().dictionary.enabled);
    }

    #[test]
    fn broken_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        store.init().unwrap();
        fs::write(store.profiles_dir().join("bad.json"), "{").unwrap();

        assert!(store.load("bad").is_err());
    }
}
