pub mod profile;

pub use profile::EnglishProfile;
