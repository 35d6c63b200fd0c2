use once_cell::sync::Lazy;
use regex::Regex;

use super::stop_words::is_stop_word;

// Runs of two or more word characters; punctuation acts as a boundary.
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    remove_stop_words: bool,
}

impl Tokenizer {
    pub fn new(remove_stop_words: bool) -> Self {
        Self { remove_stop_words }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_REGEX
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !(self.remove_stop_words && is_stop_word(token)))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        let tokens = Tokenizer::new(false).tokenize("URGENT! Click-here, NOW.");
        assert_eq!(tokens, vec!["urgent", "click", "here", "now"]);
    }

    #[test]
    fn drops_single_character_tokens_and_stop_words() {
        let tokens = Tokenizer::default().tokenize("Meeting reminder for tomorrow at 10 AM. I'm in");
        assert_eq!(tokens, vec!["meeting", "reminder", "tomorrow", "10"]);
    }

    #[test]
    fn keeps_stop_words_when_disabled() {
        let tokens = Tokenizer::new(false).tokenize("call me at 3");
        assert_eq!(tokens, vec!["call", "me", "at"]);
    }
}
