//! Mandarin support: CC-CEDICT text cleanup, pinyin tone marks and the
//! Chinese language profile.

pub mod normalize;
pub mod pinyin;
pub mod profile;

pub use normalize::normalize;
pub use pinyin::numbered_to_accented;
pub use profile::ChineseProfile;
