/*!
 * Symbol lexicon.
 *
 * The lexicon maps a dictionary-form word to the symbol image(s) that
 * depict it. Ambiguous words list several candidate symbols; which one is
 * used is a disambiguation decision recorded by the translation memory.
 *
 * The lexicon is loaded once per language and is immutable afterwards, so
 * it is shared between documents behind an `Arc`.
 */

use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::LexiconError;

/// Symbol identifier (an image file name relative to the symbol directory)
pub type SymbolId = String;

/// What a lexicon key maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolEntry {
    /// Exactly one symbol
    Single(SymbolId),
    /// Several candidate symbols in lexicon order
    Ambiguous(Vec<SymbolId>),
}

impl SymbolEntry {
    /// All candidates of this entry, in order
    pub fn candidates(&self) -> &[SymbolId] {
        match self {
            Self::Single(id) => std::slice::from_ref(id),
            Self::Ambiguous(ids) => ids,
        }
    }

    /// Candidate at `index`, falling back to the first candidate
    pub fn candidate(&self, index: usize) -> Option<&SymbolId> {
        let candidates = self.candidates();
        candidates.get(index).or_else(|| candidates.first())
    }

    /// Whether the entry needs a disambiguation decision
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(ids) if ids.len() > 1)
    }

    /// Human readable labels for the candidates (file extension stripped)
    pub fn candidate_labels(&self) -> Vec<String> {
        self.candidates()
            .iter()
            .map(|id| symbol_label(id))
            .collect()
    }
}

/// Label shown to a user for a symbol id, e.g. `"bank_(river).png"` -> `"bank_(river)"`
pub fn symbol_label(id: &str) -> String {
    match id.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem.to_string(),
        _ => id.to_string(),
    }
}

// On-disk representation: `"word": "id.png"` or `"word": ["a.png", "b.png"]`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    One(String),
    Many(Vec<String>),
}

/// Immutable word -> symbol mapping for one language
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, SymbolEntry>,
}

impl Lexicon {
    /// Create an empty lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lexicon from already-typed entries
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SymbolEntry)>,
        K: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Build a lexicon of unambiguous `word -> symbol` pairs
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::from_entries(
            pairs
                .into_iter()
                .map(|(word, id)| (word, SymbolEntry::Single(id.to_string()))),
        )
    }

    /// Parse a lexicon from a JSON object
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let raw: HashMap<String, RawEntry> =
            serde_json::from_str(json).map_err(|e| LexiconError::Parse(e.to_string()))?;
        Self::from_raw(raw)
    }

    /// Load a lexicon from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let file = File::open(path.as_ref())?;
        let raw: HashMap<String, RawEntry> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| LexiconError::Parse(e.to_string()))?;
        let lexicon = Self::from_raw(raw)?;
        info!(
            "Loaded lexicon with {} entries from {:?}",
            lexicon.len(),
            path.as_ref()
        );
        Ok(lexicon)
    }

    fn from_raw(raw: HashMap<String, RawEntry>) -> Result<Self, LexiconError> {
        let mut entries = HashMap::with_capacity(raw.len());
        for (word, entry) in raw {
            let entry = match entry {
                RawEntry::One(id) => SymbolEntry::Single(id),
                RawEntry::Many(mut ids) => match ids.len() {
                    0 => return Err(LexiconError::EmptyEntry(word)),
                    1 => SymbolEntry::Single(ids.remove(0)),
                    _ => SymbolEntry::Ambiguous(ids),
                },
            };
            entries.insert(word, entry);
        }
        debug!("Parsed {} lexicon entries", entries.len());
        Ok(Self { entries })
    }

    /// Whether `word` is a lexicon key (case-sensitive)
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Symbol catalog lookup
    pub fn lookup(&self, lexeme: &str) -> Option<&SymbolEntry> {
        self.entries.get(lexeme)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
