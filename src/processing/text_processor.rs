//! Text normalization

use regex::Regex;

pub struct TextProcessor {
    whitespace_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");

        Self { whitespace_regex }
    }

    /// Collapse whitespace, drop everything but ASCII letters, digits and
    /// spaces, lowercase and trim.
    ///
    /// Total over all inputs and idempotent: the second collapse removes the
    /// double spaces left behind by dropped characters.
    pub fn normalize(&self, text: &str) -> String {
        let collapsed = self.whitespace_regex.replace_all(text, " ");

        let alphanumeric: String = collapsed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
            .collect();

        self.whitespace_regex
            .replace_all(&alphanumeric, " ")
            .trim()
            .to_ascii_lowercase()
    }
}

/// Normalize with a throwaway processor
pub fn normalize(text: &str) -> String {
    TextProcessor::new().normalize(text)
}
