use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default query cleanup before lookup
    fn process(&self, text: &str) -> String {
        let mut text = text.trim().to_string();

        if text.is_empty() {
            return text;
        }

        // Unicode normalization (NFC, the form dictd indexes use)
        text = text.nfc().collect();

        // Queries are single terms; fold stray line endings away
        text = text.replace(['\n', '\r'], " ").trim().to_string();

        text
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
