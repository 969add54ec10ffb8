use tango_config::Config;
use tango_core::LexicalResources;

use crate::cedict::Cedict;
use crate::error::LoadError;
use crate::readings::ReadingTable;
use crate::senses::SenseStore;

pub struct LexiconLoader;

impl LexiconLoader {
    /// Load embedded sense data
    pub fn embedded_senses() -> Result<SenseStore, LoadError> {
        let json = include_str!("../data/senses.json");
        tracing::info!("Loading embedded sense inventory...");
        let store = SenseStore::from_json(json)?;
        tracing::info!("Loaded {} embedded senses", store.len());
        Ok(store)
    }

    pub fn embedded_cedict() -> Cedict {
        Cedict::from_text(include_str!("../data/cedict_sample.u8"))
    }

    pub fn embedded_readings(language_tag: &str) -> ReadingTable {
        match language_tag {
            "eng" => ReadingTable::from_tsv(include_str!("../data/ipa_eng.tsv")),
            "cmn" => ReadingTable::from_tsv(include_str!("../data/pinyin_cmn.tsv")),
            _ => ReadingTable::new(),
        }
    }

    /// Build the lexical resources described by `config`. Files that fail to
    /// load are logged and skipped.
    pub fn load(config: &Config) -> LexicalResources {
        let dict_config = &config.dictionary;
        if !dict_config.enabled {
            tracing::warn!("Dictionary disabled, every term resolves to an empty candidate");
            return LexicalResources::default();
        }
        let embedded = dict_config.use_embedded;

        let mut senses = if embedded {
            Self::embedded_senses().unwrap_or_else(|e| {
                tracing::error!("Failed to load embedded senses: {}", e);
                SenseStore::new()
            })
        } else {
            SenseStore::new()
        };
        for path in &dict_config.sense_paths {
            match SenseStore::load_from_file(&config.resolve_path(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional senses from: {}", path);
                    senses = senses.merge(additional);
                }
                Err(e) => tracing::warn!("Failed to load senses from {}: {}", path, e),
            }
        }

        let mut cedict = if embedded { Self::embedded_cedict() } else { Cedict::new() };
        for path in &dict_config.cedict_paths {
            match Cedict::load_from_file(&config.resolve_path(path)) {
                Ok(additional) => {
                    tracing::info!("Merging additional dictionary from: {}", path);
                    cedict = cedict.merge(additional);
                }
                Err(e) => tracing::warn!("Failed to load dictionary from {}: {}", path, e),
            }
        }

        let mut builder = LexicalResources::builder()
            .senses(senses)
            .dictionary("cmn", cedict);

        for tag in ["eng", "cmn"] {
            let mut table = if embedded {
                Self::embedded_readings(tag)
            } else {
                ReadingTable::new()
            };
            let paths = dict_config.reading_paths.get(tag).into_iter().flatten();
            for path in paths {
                match ReadingTable::load_from_file(&config.resolve_path(path)) {
                    Ok(additional) => table = table.merge(additional),
                    Err(e) => tracing::warn!("Failed to load readings from {}: {}", path, e),
                }
            }
            builder = builder.pronunciation(tag, table);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use tango_core::{BilingualDictionary, SenseInventory};

    use super::*;

    #[test]
    fn embedded_data_parses() {
        let senses = LexiconLoader::embedded_senses().unwrap();
        assert!(!senses.is_empty());
        assert!(LexiconLoader::embedded_cedict().get("研究员").is_some());
        assert!(!LexiconLoader::embedded_readings("cmn").is_empty());
    }

    #[test]
    fn disabled_dictionary_has_no_backends() {
        let mut config = Config::default();
        config.dictionary.enabled = false;
        let resources = LexiconLoader::load(&config);
        assert!(resources.senses().is_err());
        assert!(resources.dictionary("cmn").is_err());
    }

    #[test]
    fn missing_user_files_do_not_stop_loading() {
        let mut config = Config::default();
        config.dictionary.sense_paths = vec!["/nonexistent/senses.json".into()];
        config.dictionary.cedict_paths = vec!["/nonexistent/cedict.u8".into()];

        let resources = LexiconLoader::load(&config);
        let senses = resources.senses().unwrap().lookup_senses("run", "eng").unwrap();
        assert!(!senses.is_empty());
        assert!(resources.dictionary("cmn").unwrap().lookup_headword("中国").unwrap().is_some());
    }

    #[test]
    fn user_files_extend_embedded_data() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("extra.u8"),
            "貓 猫 [mao1] /cat/CL:隻|只[zhi1]/\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.data_dir = Some(dir.path().display().to_string());
        config.dictionary.cedict_paths = vec!["extra.u8".into()];

        let resources = LexiconLoader::load(&config);
        let entry = resources.dictionary("cmn").unwrap().lookup_headword("猫").unwrap().unwrap();
        assert_eq!(entry.romanization, "mao1");
    }
}
