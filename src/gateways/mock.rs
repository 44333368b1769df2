/*!
 * Deterministic gateway implementations for testing.
 *
 * - `BoxRenderer`: text and symbols are solid rectangles of predictable size
 * - `FixedTagger`: tags looked up from a word -> tag table
 * - `FailingGateway`: every call fails with `GatewayError::Unavailable`
 * - `ScriptedChooser`: answers from a script and counts how often it was asked
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{DefinitionChooser, GlyphRenderer, Morphology, Synonyms, Tagger};
use crate::errors::{GatewayError, RenderError};
use crate::gateways::{CoarsePos, PosTag};
use crate::layout::glyph::Glyph;

/// Renders text as `chars * font_size / 2` x `font_size` black boxes and
/// symbols as fixed-size boxes
#[derive(Debug, Clone)]
pub struct BoxRenderer {
    symbol_width: u32,
    symbol_height: u32,
    missing: HashSet<String>,
}

impl Default for BoxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxRenderer {
    pub fn new() -> Self {
        Self {
            symbol_width: 40,
            symbol_height: 40,
            missing: HashSet::new(),
        }
    }

    /// Size of every symbol before scaling
    pub fn with_symbol_size(mut self, width: u32, height: u32) -> Self {
        self.symbol_width = width;
        self.symbol_height = height;
        self
    }

    /// Pretend the asset `id` does not exist
    pub fn with_missing(mut self, id: &str) -> Self {
        self.missing.insert(id.to_string());
        self
    }

    /// Width of a rendered text glyph
    pub fn text_width(text: &str, font_size: u32) -> u32 {
        (text.chars().count() as u32 * font_size / 2).max(1)
    }
}

impl GlyphRenderer for BoxRenderer {
    fn render_text(&self, text: &str, font_size: u32) -> Result<Glyph, RenderError> {
        let text = text.trim();
        if text.is_empty() || font_size == 0 {
            return Err(RenderError::EmptyText);
        }
        Ok(Glyph::filled(Self::text_width(text, font_size), font_size, 0))
    }

    fn load_symbol(&self, id: &str, max_width: u32, max_height: u32) -> Result<Glyph, RenderError> {
        if self.missing.contains(id) {
            return Err(RenderError::MissingAsset(id.to_string()));
        }
        Ok(Glyph::filled(self.symbol_width, self.symbol_height, 0).fit_within(max_width, max_height))
    }
}

/// Tags words from a fixed table; unknown words get the default tag
#[derive(Debug, Clone)]
pub struct FixedTagger {
    tags: HashMap<String, String>,
    default_tag: String,
}

impl FixedTagger {
    pub fn new(default_tag: &str) -> Self {
        Self {
            tags: HashMap::new(),
            default_tag: default_tag.to_string(),
        }
    }

    /// Tag `word` (compared lower-cased) with `tag`
    pub fn with(mut self, word: &str, tag: &str) -> Self {
        self.tags.insert(word.to_lowercase(), tag.to_string());
        self
    }
}

impl Tagger for FixedTagger {
    fn tag(&self, tokens: &[String], _language: &str) -> Result<Vec<PosTag>, GatewayError> {
        Ok(tokens
            .iter()
            .map(|token| {
                let tag = self
                    .tags
                    .get(&token.to_lowercase())
                    .unwrap_or(&self.default_tag);
                PosTag::new(tag.as_str())
            })
            .collect())
    }
}

/// A collaborator that is always unavailable
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingGateway;

impl FailingGateway {
    fn error() -> GatewayError {
        GatewayError::Unavailable("mock gateway is down".to_string())
    }
}

impl Tagger for FailingGateway {
    fn tag(&self, _tokens: &[String], _language: &str) -> Result<Vec<PosTag>, GatewayError> {
        Err(Self::error())
    }
}

impl Morphology for FailingGateway {
    fn singularize(&self, _word: &str, _language: &str) -> Result<String, GatewayError> {
        Err(Self::error())
    }

    fn lemmatize(&self, _word: &str, _language: &str) -> Result<String, GatewayError> {
        Err(Self::error())
    }

    fn predicative(&self, _word: &str, _language: &str) -> Result<String, GatewayError> {
        Err(Self::error())
    }
}

impl Synonyms for FailingGateway {
    fn synonyms(
        &self,
        _word: &str,
        _pos: Option<CoarsePos>,
        _language: &str,
    ) -> Result<Vec<Vec<String>>, GatewayError> {
        Err(Self::error())
    }
}

/// Answers with the scripted indices in order (repeating the last one)
#[derive(Debug, Clone)]
pub struct ScriptedChooser {
    answers: Vec<usize>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedChooser {
    pub fn new(answers: Vec<usize>) -> Self {
        Self {
            answers,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times the chooser was asked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DefinitionChooser for ScriptedChooser {
    fn choose(&self, _lexeme: &str, _candidate_labels: &[String]) -> usize {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(call)
            .or_else(|| self.answers.last())
            .copied()
            .unwrap_or(0)
    }
}
