/*!
 * Symbol translation.
 *
 * - `resolver`: finds the lexicon key for a surface word
 * - `memory`: per-document seen/changed state and sticky disambiguation
 * - `policy`: which tokens are eligible and how each occurrence is shown
 * - `session`: drives a whole document from text to pages
 */

use crate::gateways::PosTag;

pub use self::memory::{DefinitionChoices, TranslationMemory};
pub use self::policy::{GlyphPlan, PartsOfSpeech, TranslationPolicy};
pub use self::resolver::{LexemeResolver, ResolvedLexeme};
pub use self::session::{GlyphChoice, Rendition, SessionSettings, TokenOutcome, TranslationSession};

pub mod memory;
pub mod policy;
pub mod resolver;
pub mod session;

/// A surface token with its tag and position in the token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub tag: PosTag,
    pub index: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, tag: impl Into<PosTag>, index: usize) -> Self {
        Self {
            text: text.into(),
            tag: tag.into(),
            index,
        }
    }

    /// Build a token stream from `(text, tag)` pairs
    pub fn sequence(pairs: &[(&str, &str)]) -> Vec<Token> {
        pairs
            .iter()
            .enumerate()
            .map(|(index, (text, tag))| Token::new(*text, *tag, index))
            .collect()
    }
}
