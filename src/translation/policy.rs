/*!
 * Substitution policy.
 *
 * `PartsOfSpeech` decides which tagged tokens may be replaced at all;
 * `plan_glyph` decides, for an eligible lexeme, whether this occurrence is
 * shown as text, as a symbol with its subtitle, or as a bare symbol.
 */

use std::collections::HashSet;

use super::memory::TranslationMemory;
use crate::gateways::PosTag;

pub const NOUN_TAGS: &[&str] = &["NN", "NNS"];
pub const VERB_TAGS: &[&str] = &["VB", "VBD", "VBG", "VBN"];
pub const ADJECTIVE_TAGS: &[&str] = &["JJ", "JJR", "JJS"];

/// Penn Treebank tags outside the noun/verb/adjective groups above
pub const OTHER_TAGS: &[&str] = &[
    "CC", "CD", "DT", "EX", "FW", "IN", "LS", "MD", "NNP", "NNPS", "PDT", "POS", "PRP", "PRP$",
    "RB", "RBR", "RBS", "RP", "SYM", "TO", "UH", "VBP", "VBZ", "WDT", "WP", "WP$", "WRB",
];

/// Set of tags eligible for substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartsOfSpeech {
    tags: HashSet<String>,
}

impl Default for PartsOfSpeech {
    /// Nouns, verbs and adjectives
    fn default() -> Self {
        Self::from_toggles(true, true, true, false)
    }
}

impl PartsOfSpeech {
    /// Build the set from per-group toggles
    pub fn from_toggles(nouns: bool, verbs: bool, adjectives: bool, other: bool) -> Self {
        let groups = [
            (nouns, NOUN_TAGS),
            (verbs, VERB_TAGS),
            (adjectives, ADJECTIVE_TAGS),
            (other, OTHER_TAGS),
        ];
        let tags = groups
            .iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, tags)| tags.iter().map(|t| t.to_string()))
            .collect();
        Self { tags }
    }

    /// Explicit tag set
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn nouns_only() -> Self {
        Self::from_toggles(true, false, false, false)
    }

    pub fn contains(&self, tag: &PosTag) -> bool {
        self.tags.contains(tag.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Options that change which glyph a token gets
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranslationPolicy {
    /// Substitute symbols from the first occurrence on
    pub fast_translate: bool,
    /// Show the subtitle on every symbol, not just the first
    pub sub_all: bool,
    pub parts_of_speech: PartsOfSpeech,
}

/// How one occurrence of an eligible lexeme is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphPlan {
    Text,
    Symbol { subtitle: bool },
}

/// Decide how to show this occurrence of `lexeme`, marking it seen if needed.
///
/// `changed` is not marked here; the caller marks it once a subtitled
/// symbol was actually produced.
pub fn plan_glyph(memory: &mut TranslationMemory, lexeme: &str, policy: &TranslationPolicy) -> GlyphPlan {
    if !policy.fast_translate && !memory.is_seen(lexeme) {
        memory.mark_seen(lexeme);
        return GlyphPlan::Text;
    }
    GlyphPlan::Symbol {
        subtitle: policy.sub_all || !memory.is_changed(lexeme),
    }
}
