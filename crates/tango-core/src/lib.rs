pub mod annotate;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod preprocess;
pub mod queue;
pub mod resolver;
pub mod session;
pub mod types;

pub use annotate::{Emphasis, annotate, sense_candidates};
pub use dictionary::{
    BilingualDictionary, HeadwordEntry, LexicalResources, PronunciationGenerator, Sense,
    SenseInventory,
};
pub use error::{AnnotateError, LookupError, SessionError};
pub use language::{LanguageProfile, PosPolicy, map_part_of_speech};
pub use queue::{Pop, TermQueue};
pub use resolver::{ExamplesOpened, Phase, ResolutionState, Resolver};
pub use session::{FieldView, Intent, Outcome, Session, SessionView};
pub use types::{AnnotationCandidate, FieldKey, FieldValue, FinishedCard, Term};
