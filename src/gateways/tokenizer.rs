/*!
 * Rule-based word tokenizer.
 *
 * Splits each line into words and punctuation marks, separates English
 * contractions (`"don't"` -> `"do"`, `"n't"`), pads hyphens so they stand
 * alone, and emits a `"\n"` token after every line so paragraph breaks
 * survive into layout.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::Tokenizer;
use crate::layout::punctuation::{CONTRACTION_NEGATION, NEWLINE};

// Words may carry inner apostrophes; every other non-space character is its own token
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w]+(?:['’][\w]+)*|[^\w\s]").expect("token pattern is valid")
});

/// Tokenizer built on a single regular expression
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    /// Create a new tokenizer
    pub fn new() -> Self {
        Self
    }

    fn push_word(word: &str, language: &str, tokens: &mut Vec<String>) {
        let normalized = word.replace('’', "'");
        if language != "eng" {
            tokens.push(normalized);
            return;
        }

        let lower = normalized.to_lowercase();
        if lower == CONTRACTION_NEGATION {
            tokens.push(normalized);
        } else if lower.len() > 3 && lower.ends_with(CONTRACTION_NEGATION) {
            let split = normalized.len() - 3;
            tokens.push(normalized[..split].to_string());
            tokens.push(normalized[split..].to_string());
        } else if let Some(pos) = normalized.find('\'') {
            // Clitics such as 's, 're, 'll, 've, 'd
            tokens.push(normalized[..pos].to_string());
            tokens.push(normalized[pos..].to_string());
        } else {
            tokens.push(normalized);
        }
    }
}

impl Tokenizer for RuleTokenizer {
    fn tokenize(&self, text: &str, language: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let padded = text.replace('-', " - ");
        for line in padded.lines() {
            for m in TOKEN_REGEX.find_iter(line) {
                let piece = m.as_str();
                if piece.chars().next().is_some_and(char::is_alphanumeric) {
                    Self::push_word(piece, language, &mut tokens);
                } else {
                    tokens.push(piece.to_string());
                }
            }
            tokens.push(NEWLINE.to_string());
        }
        tokens
    }
}
