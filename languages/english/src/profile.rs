use tango_core::{
    AnnotationCandidate, FieldKey, LanguageProfile, LexicalResources, LookupError, PosPolicy,
    PronunciationGenerator, Term, sense_candidates,
};

const LANGUAGE_TAG: &str = "eng";

const FIELDS: &[FieldKey] = &[
    FieldKey::Definition,
    FieldKey::Ipa,
    FieldKey::PartOfSpeech,
    FieldKey::Synonyms,
    FieldKey::Examples,
    FieldKey::Notes,
];

/// English profile: one candidate per sense, IPA shared by all of them
#[derive(Debug, Default)]
pub struct EnglishProfile;

impl EnglishProfile {
    pub fn new() -> Self {
        Self
    }

    /// `/rən; rʌn/`, or empty when the term is out of vocabulary
    fn ipa(&self, term: &Term, resources: &LexicalResources) -> String {
        let readings = resources
            .pronunciation(LANGUAGE_TAG)
            .and_then(|generator| readings(generator, term.as_str()));

        match readings {
            Ok(readings) if !readings.is_empty() => format!("/{}/", readings.join("; ")),
            Ok(_) => {
                tracing::debug!("No IPA for '{}'", term);
                String::new()
            }
            Err(e) => {
                tracing::warn!("IPA lookup for '{}' failed: {}", term, e);
                String::new()
            }
        }
    }
}

/// Whole-term readings, falling back to the first reading of each word for
/// phrases. A phrase with any unknown word has no reading.
fn readings(generator: &dyn PronunciationGenerator, term: &str) -> Result<Vec<String>, LookupError> {
    let whole = generator.transliterate(term)?;
    if !whole.is_empty() {
        return Ok(whole);
    }

    let words: Vec<&str> = term.split_whitespace().collect();
    if words.len() < 2 {
        return Ok(Vec::new());
    }

    let mut parts = Vec::with_capacity(words.len());
    for word in words {
        match generator.transliterate(word)?.into_iter().next() {
            Some(reading) => parts.push(reading),
            None => return Ok(Vec::new()),
        }
    }
    Ok(vec![parts.join(" ")])
}

impl LanguageProfile for EnglishProfile {
    fn id(&self) -> &str {
        "english"
    }

    fn name(&self) -> &str {
        "English"
    }

    fn language_tag(&self) -> &str {
        LANGUAGE_TAG
    }

    fn field_keys(&self) -> &[FieldKey] {
        FIELDS
    }

    fn resolve(&self, term: &Term, resources: &LexicalResources) -> Vec<AnnotationCandidate> {
        let ipa = self.ipa(term, resources);

        let mut candidates: Vec<AnnotationCandidate> =
            sense_candidates(term, LANGUAGE_TAG, resources, PosPolicy::Strict)
                .into_iter()
                .map(|candidate| candidate.with_text(FieldKey::Ipa, ipa.clone()))
                .collect();

        if candidates.is_empty() {
            candidates.push(AnnotationCandidate::blank().with_text(FieldKey::Ipa, ipa));
        }

        candidates
    }
}
