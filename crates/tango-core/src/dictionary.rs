use std::collections::HashMap;

use crate::error::LookupError;

/// Polysemy source keyed by term and language tag
pub trait SenseInventory: Send + Sync {
    /// All senses of `term`, in source order
    fn lookup_senses(&self, term: &str, language_tag: &str) -> Result<Vec<Sense>, LookupError>;
}

/// Headword dictionary into the learner's language
pub trait BilingualDictionary: Send + Sync {
    fn lookup_headword(&self, term: &str) -> Result<Option<HeadwordEntry>, LookupError>;
}

/// Pronunciation source
pub trait PronunciationGenerator: Send + Sync {
    /// Candidate pronunciations, empty if the term is out of vocabulary
    fn transliterate(&self, term: &str) -> Result<Vec<String>, LookupError>;

    /// Best-guess reading of a single character
    fn char_reading(&self, c: char) -> Result<Option<String>, LookupError>;
}

/// One distinct meaning returned by a sense inventory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sense {
    pub gloss: String,
    pub examples: Vec<String>,
    pub pos_code: String,
    pub lemmas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadwordEntry {
    pub definitions: Vec<String>,
    pub romanization: String,
}

/// Handle to every lexical backend, built once at startup and passed by
/// reference to the annotators.
#[derive(Default)]
pub struct LexicalResources {
    senses: Option<Box<dyn SenseInventory>>,
    dictionaries: HashMap<String, Box<dyn BilingualDictionary>>,
    pronunciations: HashMap<String, Box<dyn PronunciationGenerator>>,
}

impl LexicalResources {
    pub fn builder() -> LexicalResourcesBuilder {
        LexicalResourcesBuilder::default()
    }

    pub fn senses(&self) -> Result<&dyn SenseInventory, LookupError> {
        self.senses
            .as_deref()
            .ok_or_else(|| LookupError::Unavailable("sense inventory".to_string()))
    }

    pub fn dictionary(&self, language_tag: &str) -> Result<&dyn BilingualDictionary, LookupError> {
        self.dictionaries
            .get(language_tag)
            .map(|d| &**d)
            .ok_or_else(|| LookupError::Unavailable(format!("{language_tag} dictionary")))
    }

    pub fn pronunciation(
        &self,
        language_tag: &str,
    ) -> Result<&dyn PronunciationGenerator, LookupError> {
        self.pronunciations
            .get(language_tag)
            .map(|p| &**p)
            .ok_or_else(|| LookupError::Unavailable(format!("{language_tag} pronunciation")))
    }
}

#[derive(Default)]
pub struct LexicalResourcesBuilder {
    inner: LexicalResources,
}

impl LexicalResourcesBuilder {
    pub fn senses(mut self, senses: impl SenseInventory + 'static) -> Self {
        self.inner.senses = Some(Box::new(senses));
        self
    }

    pub fn dictionary(
        mut self,
        language_tag: &str,
        dictionary: impl BilingualDictionary + 'static,
    ) -> Self {
        self.inner
            .dictionaries
            .insert(language_tag.to_string(), Box::new(dictionary));
        self
    }

    pub fn pronunciation(
        mut self,
        language_tag: &str,
        generator: impl PronunciationGenerator + 'static,
    ) -> Self {
        self.inner
            .pronunciations
            .insert(language_tag.to_string(), Box::new(generator));
        self
    }

    pub fn build(self) -> LexicalResources {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoHeadwords;

    impl BilingualDictionary for NoHeadwords {
        fn lookup_headword(&self, _term: &str) -> Result<Option<HeadwordEntry>, LookupError> {
            Ok(None)
        }
    }

    #[test]
    fn missing_backends_are_unavailable() {
        let resources = LexicalResources::builder().dictionary("cmn", NoHeadwords).build();

        assert!(resources.dictionary("cmn").is_ok());
        assert!(matches!(
            resources.dictionary("jpn"),
            Err(LookupError::Unavailable(_))
        ));
        assert!(matches!(resources.senses(), Err(LookupError::Unavailable(_))));
        assert!(resources.pronunciation("eng").is_err());
    }
}
