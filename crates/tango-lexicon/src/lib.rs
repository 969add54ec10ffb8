//! File-backed lexical sources: a WordNet-shaped sense inventory, CC-CEDICT
//! and TSV reading tables, with small embedded samples.

pub mod cedict;
pub mod error;
pub mod loader;
pub mod readings;
pub mod senses;

pub use cedict::{Cedict, CedictEntry};
pub use error::LoadError;
pub use loader::LexiconLoader;
pub use readings::ReadingTable;
pub use senses::SenseStore;
