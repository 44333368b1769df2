/*!
 * Translation session.
 *
 * A session owns the lexicon, the collaborators and the translation memory
 * for a sequence of documents in one language. Each document is tokenized,
 * tagged, resolved token by token, turned into glyphs according to the
 * substitution policy, laid out and finally wrapped with a title page.
 *
 * Per-token failures never abort a document: a missing symbol or a failed
 * gateway call degrades that token to plain text.
 */

use log::{debug, info, warn};
use std::sync::Arc;

use super::Token;
use super::memory::{DefinitionChoices, TranslationMemory};
use super::policy::{GlyphPlan, TranslationPolicy, plan_glyph};
use super::resolver::{LexemeResolver, ResolvedLexeme};
use crate::errors::{LayoutError, RenderError};
use crate::gateways::{Gateways, PosTag};
use crate::language_utils::DEFAULT_LANGUAGE;
use crate::layout::alphabet::{alphabet_cell, arrange_cells};
use crate::layout::document::{Document, DocumentAssembler, default_title};
use crate::layout::engine::{LayoutConfig, LayoutEngine, LayoutItem, Page};
use crate::layout::glyph::Glyph;
use crate::layout::punctuation::{NEWLINE, is_punctuation};
use crate::lexicon::{Lexicon, SymbolId};

/// Symbol affixed to plural nouns unless configured otherwise
pub const DEFAULT_PLURAL_INDICATOR: &str = "indicator_(plural).png";

/// Everything about a session that is not a collaborator
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// ISO 639-3 code handed to every gateway
    pub language: String,
    pub layout: LayoutConfig,
    pub policy: TranslationPolicy,
    /// Symbol appended to plural nouns; `None` disables the marker
    pub plural_indicator: Option<SymbolId>,
    pub page_numbers: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            layout: LayoutConfig::default(),
            policy: TranslationPolicy::default(),
            plural_indicator: Some(DEFAULT_PLURAL_INDICATOR.to_string()),
            page_numbers: true,
        }
    }
}

/// Which glyph a token ended up with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphChoice {
    /// Paragraph break, no glyph
    Newline,
    /// The surface form rendered as text
    Text,
    /// A symbol, possibly subtitled and with a plural marker
    Symbol {
        id: SymbolId,
        subtitle: bool,
        plural: bool,
    },
}

impl GlyphChoice {
    pub fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol { .. })
    }
}

/// What happened to one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutcome {
    pub token: Token,
    pub resolved: ResolvedLexeme,
    pub choice: GlyphChoice,
}

/// Laid out pages plus the per-token decisions that produced them
#[derive(Debug, Clone)]
pub struct Rendition {
    pub pages: Vec<Page>,
    pub outcomes: Vec<TokenOutcome>,
}

/// Translates documents for one language
#[derive(Debug)]
pub struct TranslationSession {
    lexicon: Arc<Lexicon>,
    gateways: Gateways,
    settings: SessionSettings,
    engine: LayoutEngine,
    memory: TranslationMemory,
}

impl TranslationSession {
    /// Create a session; fails when the page geometry cannot hold a line
    pub fn new(
        lexicon: Arc<Lexicon>,
        gateways: Gateways,
        settings: SessionSettings,
    ) -> Result<Self, LayoutError> {
        let engine = LayoutEngine::new(settings.layout)?;
        Ok(Self {
            lexicon,
            gateways,
            settings,
            engine,
            memory: TranslationMemory::new(),
        })
    }

    /// Share sticky disambiguation choices with other sessions
    pub fn with_choices(mut self, choices: DefinitionChoices) -> Self {
        self.memory = TranslationMemory::with_choices(choices);
        self
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn memory(&self) -> &TranslationMemory {
        &self.memory
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn resolver(&self) -> LexemeResolver<'_> {
        LexemeResolver::new(
            &self.lexicon,
            self.gateways.morphology.as_ref(),
            self.gateways.synonyms.as_ref(),
            &self.settings.language,
        )
    }

    /// Resolve a token as written (lookup is case-insensitive)
    pub fn resolve(&self, token: &Token) -> ResolvedLexeme {
        self.resolver().resolve(&token.text.to_lowercase(), &token.tag)
    }

    /// Tokenize and tag `text`.
    ///
    /// A failing tagger leaves every token untagged; a tagger returning the
    /// wrong number of tags is padded with untagged entries.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let language = &self.settings.language;
        let words = self.gateways.tokenizer.tokenize(text, language);
        let mut tags = match self.gateways.tagger.tag(&words, language) {
            Ok(tags) => tags,
            Err(e) => {
                warn!("Tagging failed, continuing without tags: {}", e);
                Vec::new()
            }
        };
        if tags.len() != words.len() && !tags.is_empty() {
            warn!(
                "Tagger returned {} tags for {} tokens",
                tags.len(),
                words.len()
            );
        }
        tags.resize(words.len(), PosTag::untagged());

        words
            .into_iter()
            .zip(tags)
            .enumerate()
            .map(|(index, (text, tag))| Token::new(text, tag, index))
            .collect()
    }

    /// Untagged tokens count as nouns, so languages without a tagger still
    /// get substitutions
    fn is_eligible(&self, word: &str, tag: &PosTag) -> bool {
        word != NEWLINE
            && !is_punctuation(word)
            && self.settings.policy.parts_of_speech.contains(&tag.or_noun())
    }

    /// Text glyph for `surface`; unrenderable text becomes a blank box
    fn text_glyph(&self, surface: &str) -> Glyph {
        let font_size = self.settings.layout.font_size;
        match self.gateways.renderer.render_text(surface, font_size) {
            Ok(glyph) => glyph,
            Err(e) => {
                debug!("Rendering '{}' as blank: {}", surface.escape_debug(), e);
                Glyph::blank(font_size, font_size)
            }
        }
    }

    /// Candidate symbol for `lexeme`, asking for a definition when ambiguous
    fn symbol_id(&self, lexeme: &str) -> Option<SymbolId> {
        let entry = self.lexicon.lookup(lexeme)?;
        let index = if entry.is_ambiguous() {
            self.memory.choose_definition(
                lexeme,
                &entry.candidate_labels(),
                self.gateways.chooser.as_ref(),
            )
        } else {
            0
        };
        entry.candidate(index).cloned()
    }

    fn symbol_glyph(&self, id: &str, surface: &str, subtitle: bool) -> Result<Glyph, RenderError> {
        let layout = &self.settings.layout;
        let renderer = &self.gateways.renderer;
        let max_width = layout.page_width / 2;

        if !subtitle {
            return renderer.load_symbol(id, max_width, layout.symbol_height());
        }

        let caption = renderer
            .render_text(&surface.to_uppercase(), layout.subtitle_font_size())?
            .trimmed();
        let gap = layout.subtitle_gap();
        let max_height = layout
            .line_height()
            .saturating_sub(caption.height() + gap)
            .clamp(1, layout.symbol_height());
        let symbol = renderer.load_symbol(id, max_width, max_height)?;
        Ok(symbol.with_subtitle(&caption, gap))
    }

    /// Append the plural marker; a missing marker leaves the glyph as is
    fn with_plural_marker(&self, glyph: Glyph) -> (Glyph, bool) {
        let Some(marker_id) = &self.settings.plural_indicator else {
            return (glyph, false);
        };
        let size = self.settings.layout.font_size;
        match self.gateways.renderer.load_symbol(marker_id, size, size) {
            Ok(marker) => (glyph.with_suffix(&marker), true),
            Err(e) => {
                warn!("Plural indicator unavailable: {}", e);
                (glyph, false)
            }
        }
    }

    /// Choose the glyph for one token and update the memory
    fn select_glyph(&mut self, token: &Token, resolved: &ResolvedLexeme) -> (Glyph, GlyphChoice) {
        if token.text == NEWLINE {
            return (Glyph::empty(), GlyphChoice::Newline);
        }
        let Some(lexeme) = resolved.lexeme() else {
            return (self.text_glyph(&token.text), GlyphChoice::Text);
        };

        let subtitle = match plan_glyph(&mut self.memory, lexeme, &self.settings.policy) {
            GlyphPlan::Text => return (self.text_glyph(&token.text), GlyphChoice::Text),
            GlyphPlan::Symbol { subtitle } => subtitle,
        };

        let Some(id) = self.symbol_id(lexeme) else {
            warn!("'{}' has no symbol in the lexicon", lexeme);
            return (self.text_glyph(&token.text), GlyphChoice::Text);
        };

        let glyph = match self.symbol_glyph(&id, &token.text, subtitle) {
            Ok(glyph) => glyph,
            Err(e) => {
                warn!("Falling back to text for '{}': {}", token.text, e);
                return (self.text_glyph(&token.text), GlyphChoice::Text);
            }
        };
        if subtitle {
            self.memory.mark_changed(lexeme);
        }

        let (glyph, plural) = if token.tag.is_plural_noun() {
            self.with_plural_marker(glyph)
        } else {
            (glyph, false)
        };
        (glyph, GlyphChoice::Symbol { id, subtitle, plural })
    }

    /// Turn tagged tokens into pages.
    ///
    /// Seen/changed marks start empty for every call; sticky definition
    /// choices carry over.
    pub fn render_tokens(&mut self, tokens: &[Token]) -> Rendition {
        self.memory.reset();

        let mut items = Vec::with_capacity(tokens.len());
        let mut outcomes = Vec::with_capacity(tokens.len());
        for token in tokens {
            let word = token.text.to_lowercase();
            let resolved = if self.is_eligible(&word, &token.tag) {
                self.resolver().resolve(&word, &token.tag)
            } else {
                ResolvedLexeme::None
            };

            let (glyph, choice) = self.select_glyph(token, &resolved);
            debug!("Token {} '{}' -> {:?}", token.index, token.text.escape_debug(), choice);
            items.push(LayoutItem::new(word, glyph));
            outcomes.push(TokenOutcome {
                token: token.clone(),
                resolved,
                choice,
            });
        }

        let pages = self.engine.layout(&items);
        let symbols = outcomes.iter().filter(|o| o.choice.is_symbol()).count();
        info!(
            "Rendered {} tokens ({} as symbols) on {} pages",
            tokens.len(),
            symbols,
            pages.len()
        );
        Rendition { pages, outcomes }
    }

    /// Translate `text` into a document with a title page.
    ///
    /// The title defaults to the first characters of the text.
    pub fn translate(&mut self, text: &str, title: Option<&str>) -> Document {
        let tokens = self.tokenize(text);
        let rendition = self.render_tokens(&tokens);
        let title = title
            .map(str::to_string)
            .unwrap_or_else(|| default_title(text));

        DocumentAssembler::new(
            self.gateways.renderer.as_ref(),
            self.settings.layout,
            self.settings.page_numbers,
        )
        .assemble(&title, rendition.pages)
    }

    fn legend_cell(&self, word: &str) -> Glyph {
        let layout = &self.settings.layout;
        let cell_size = layout.alphabet_cell_size();
        let blank = || Glyph::blank(cell_size, cell_size);

        let lower = word.trim().to_lowercase();
        let resolved = self.resolver().resolve(&lower, &PosTag::new("NN"));
        let Some(id) = resolved.lexeme().and_then(|lexeme| self.symbol_id(lexeme)) else {
            debug!("No legend symbol for '{}'", word);
            return blank();
        };

        let gap = layout.subtitle_gap();
        let renderer = &self.gateways.renderer;
        let symbol = renderer.load_symbol(&id, cell_size, cell_size * 2 / 5 - gap);
        let label = renderer.render_text(&word.trim().to_uppercase(), layout.subtitle_font_size());
        match (symbol, label) {
            (Ok(symbol), Ok(label)) => alphabet_cell(&symbol, &label.trimmed(), cell_size, gap),
            (Err(e), _) | (_, Err(e)) => {
                warn!("Legend cell for '{}' left blank: {}", word, e);
                blank()
            }
        }
    }

    /// Legend sheet of `words`, `columns` cells per row
    pub fn draw_alphabet<S: AsRef<str>>(&self, words: &[S], columns: usize) -> Glyph {
        let cells: Vec<Glyph> = words.iter().map(|w| self.legend_cell(w.as_ref())).collect();
        arrange_cells(&cells, self.settings.layout.alphabet_cell_size(), columns)
    }
}
