use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default term preprocessor
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Canonical composition (NFC), so IME variants of the same glyph compare equal
        let text: String = text.nfc().collect();

        // Case folding
        text.to_lowercase()
    }
}

pub struct TermPreprocessor;
impl Preprocessor for TermPreprocessor {}
