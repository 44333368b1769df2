/*!
 * Lexeme resolution.
 *
 * A surface word is resolved to a lexicon key by trying, in order:
 * 1. the word itself,
 * 2. its singular, infinitive and predicative forms,
 * 3. the lemmas of its synsets, in gateway order.
 *
 * Synonyms are matched against the lexicon as-is (no further
 * normalization). The resolver holds no state, so resolving the same word
 * twice always gives the same answer.
 */

use log::{debug, warn};

use crate::errors::GatewayError;
use crate::gateways::{CoarsePos, Morphology, PosTag, Synonyms};
use crate::lexicon::Lexicon;

/// Outcome of resolving one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedLexeme {
    /// The word or one of its normalized forms is a lexicon key
    Direct(String),
    /// A synonym of the word is a lexicon key
    Synonym(String),
    /// Nothing matched
    None,
}

impl ResolvedLexeme {
    /// The lexicon key, if any
    pub fn lexeme(&self) -> Option<&str> {
        match self {
            Self::Direct(lexeme) | Self::Synonym(lexeme) => Some(lexeme),
            Self::None => None,
        }
    }

    pub fn is_translatable(&self) -> bool {
        !matches!(self, Self::None)
    }
}

type Normalizer = fn(&dyn Morphology, &str, &str) -> Result<String, GatewayError>;

/// A failed gateway call counts as "no normalization"
fn absorb(operation: &str, word: &str, result: Result<String, GatewayError>) -> Option<String> {
    match result {
        Ok(form) => Some(form),
        Err(e) => {
            warn!("{} failed for '{}': {}", operation, word, e);
            None
        }
    }
}

/// Resolves words against a lexicon with help from morphology and synonyms
#[derive(Debug, Clone, Copy)]
pub struct LexemeResolver<'a> {
    lexicon: &'a Lexicon,
    morphology: &'a dyn Morphology,
    synonyms: &'a dyn Synonyms,
    language: &'a str,
}

impl<'a> LexemeResolver<'a> {
    pub fn new(
        lexicon: &'a Lexicon,
        morphology: &'a dyn Morphology,
        synonyms: &'a dyn Synonyms,
        language: &'a str,
    ) -> Self {
        Self {
            lexicon,
            morphology,
            synonyms,
            language,
        }
    }

    /// Resolve a lower-cased word tagged `tag`
    pub fn resolve(&self, word: &str, tag: &PosTag) -> ResolvedLexeme {
        if word.is_empty() {
            return ResolvedLexeme::None;
        }
        if self.lexicon.contains(word) {
            return ResolvedLexeme::Direct(word.to_string());
        }

        if let Some(lexeme) = self.normalized(word) {
            debug!("Resolved '{}' to '{}' by normalization", word, lexeme);
            return ResolvedLexeme::Direct(lexeme);
        }

        if let Some(lexeme) = self.synonym(word, tag.coarse()) {
            debug!("Resolved '{}' to synonym '{}'", word, lexeme);
            return ResolvedLexeme::Synonym(lexeme);
        }

        ResolvedLexeme::None
    }

    /// First of singular, infinitive, predicative that is a lexicon key
    fn normalized(&self, word: &str) -> Option<String> {
        let m = self.morphology;
        let lang = self.language;
        let attempts: [(&str, Normalizer); 3] = [
            ("Singularization", |m: &dyn Morphology, w: &str, l: &str| {
                m.singularize(w, l)
            }),
            ("Lemmatization", |m: &dyn Morphology, w: &str, l: &str| {
                m.lemmatize(w, l)
            }),
            ("Predicative reduction", |m: &dyn Morphology, w: &str, l: &str| {
                m.predicative(w, l)
            }),
        ];

        attempts.iter().find_map(|(operation, normalize)| {
            absorb(operation, word, normalize(m, word, lang))
                .filter(|form| form != word && self.lexicon.contains(form))
        })
    }

    fn synsets(&self, word: &str, pos: Option<CoarsePos>) -> Vec<Vec<String>> {
        match self.synonyms.synonyms(word, pos, self.language) {
            Ok(synsets) => synsets,
            Err(e) => {
                warn!("Synonym lookup failed for '{}': {}", word, e);
                Vec::new()
            }
        }
    }

    /// First synset lemma that is a lexicon key
    fn synonym(&self, word: &str, pos: CoarsePos) -> Option<String> {
        let mut synsets = self.synsets(word, Some(pos));
        if synsets.is_empty() {
            synsets = self.synsets(word, None);
        }

        synsets
            .into_iter()
            .flatten()
            .find(|lemma| self.lexicon.contains(lemma))
    }
}
