/*!
 * Collaborator interfaces used by the translation core.
 *
 * Everything the core does not compute itself goes through one of these
 * traits, so implementations can be swapped freely:
 * - `Tokenizer`: splits running text into tokens
 * - `Tagger`: assigns one part-of-speech tag per token
 * - `Morphology`: singular, infinitive and predicative forms
 * - `Synonyms`: ordered synonym groups (synsets)
 * - `GlyphRenderer`: rasterizes text and loads symbol images
 * - `DefinitionChooser`: picks a symbol for an ambiguous word
 * - `PageSink`: receives finished documents
 *
 * Gateway failures are reported as `GatewayError`; the core treats any of
 * them as "no information" and never aborts a document because of one.
 */

use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::{GatewayError, RenderError, SinkError};
use crate::layout::document::Document;
use crate::layout::glyph::Glyph;

pub mod chooser;
pub mod mock;
pub mod morphology;
pub mod renderer;
pub mod sink;
pub mod synonyms;
pub mod tagger;
pub mod tokenizer;

pub use chooser::{ConsoleChooser, FirstCandidate};
pub use morphology::{EnglishMorphology, IdentityMorphology, InflectionTable};
pub use renderer::RasterRenderer;
pub use sink::{DocumentHandle, MemorySink, PngDirectorySink};
pub use synonyms::{NoSynonyms, Thesaurus};
pub use tagger::{CoarsePos, HeuristicTagger, PosTag};
pub use tokenizer::RuleTokenizer;

/// Splits text into surface tokens; newlines become standalone `"\n"` tokens
pub trait Tokenizer: Send + Sync + Debug {
    /// Tokenize `text` written in `language` (ISO 639-3)
    fn tokenize(&self, text: &str, language: &str) -> Vec<String>;
}

/// Part-of-speech tagger
pub trait Tagger: Send + Sync + Debug {
    /// Tag every token; the result has the same length and order as `tokens`
    fn tag(&self, tokens: &[String], language: &str) -> Result<Vec<PosTag>, GatewayError>;
}

/// Morphological normalization
///
/// Each operation returns the input unchanged when no normalization applies.
pub trait Morphology: Send + Sync + Debug {
    /// Singular form of a noun
    fn singularize(&self, word: &str, language: &str) -> Result<String, GatewayError>;

    /// Infinitive (lemma) of a verb
    fn lemmatize(&self, word: &str, language: &str) -> Result<String, GatewayError>;

    /// Base (predicative) form of an adjective
    fn predicative(&self, word: &str, language: &str) -> Result<String, GatewayError>;
}

/// Synonym lookup
pub trait Synonyms: Send + Sync + Debug {
    /// Synsets for `word`, each an ordered list of lemma strings.
    ///
    /// `pos` of `None` means "any part of speech".
    fn synonyms(
        &self,
        word: &str,
        pos: Option<CoarsePos>,
        language: &str,
    ) -> Result<Vec<Vec<String>>, GatewayError>;
}

/// Rasterization of plain text and loading of symbol images
pub trait GlyphRenderer: Send + Sync + Debug {
    /// Render `text` at `font_size` pixels
    fn render_text(&self, text: &str, font_size: u32) -> Result<Glyph, RenderError>;

    /// Load the symbol image `id`, scaled down to fit `max_width` x `max_height`
    fn load_symbol(&self, id: &str, max_width: u32, max_height: u32) -> Result<Glyph, RenderError>;
}

/// Disambiguation strategy for words with several candidate symbols
pub trait DefinitionChooser: Send + Sync + Debug {
    /// Return the 0-based index of the chosen candidate.
    ///
    /// Out-of-range answers are clamped to the first candidate by the caller.
    fn choose(&self, lexeme: &str, candidate_labels: &[String]) -> usize;
}

/// Destination for finished documents
pub trait PageSink {
    /// Emit all pages of `document`
    fn emit(&mut self, document: &Document) -> Result<DocumentHandle, SinkError>;
}

/// The full set of collaborators a translation session talks to
#[derive(Debug, Clone)]
pub struct Gateways {
    pub tokenizer: Arc<dyn Tokenizer>,
    pub tagger: Arc<dyn Tagger>,
    pub morphology: Arc<dyn Morphology>,
    pub synonyms: Arc<dyn Synonyms>,
    pub renderer: Arc<dyn GlyphRenderer>,
    pub chooser: Arc<dyn DefinitionChooser>,
}

impl Gateways {
    /// Built-in collaborators: rule tokenizer, heuristic tagger, English
    /// morphology, no synonyms, first-candidate disambiguation
    pub fn builtin(renderer: Arc<dyn GlyphRenderer>) -> Self {
        Self {
            tokenizer: Arc::new(RuleTokenizer::new()),
            tagger: Arc::new(HeuristicTagger::new()),
            morphology: Arc::new(EnglishMorphology),
            synonyms: Arc::new(NoSynonyms),
            renderer,
            chooser: Arc::new(FirstCandidate),
        }
    }

    /// Replace the tagger
    pub fn with_tagger(mut self, tagger: Arc<dyn Tagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Replace the morphology gateway
    pub fn with_morphology(mut self, morphology: Arc<dyn Morphology>) -> Self {
        self.morphology = morphology;
        self
    }

    /// Replace the synonym gateway
    pub fn with_synonyms(mut self, synonyms: Arc<dyn Synonyms>) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Replace the disambiguation strategy
    pub fn with_chooser(mut self, chooser: Arc<dyn DefinitionChooser>) -> Self {
        self.chooser = chooser;
        self
    }
}
