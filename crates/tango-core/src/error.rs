/// Failure of an external lexical service.
///
/// Always recovered where the service is called and treated as "no data".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("No {0} backend is configured")]
    Unavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Failure while building a single candidate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnnotateError {
    #[error("Unmapped part-of-speech code: {code}")]
    UnmappedPartOfSpeech { code: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No language profiles registered")]
    NoProfiles,

    #[error("Unknown language profile: {0}")]
    UnknownProfile(String),
}
