/*!
 * Synonym gateways.
 *
 * `Thesaurus` reads synsets from a JSON file of the form
 *
 * ```json
 * {
 *   "automobile": [
 *     {"pos": "noun", "lemmas": ["car", "auto", "machine"]}
 *   ]
 * }
 * ```
 *
 * Synsets are returned in file order, and lemmas within a synset keep
 * their order too; the resolver relies on that ordering.
 */

use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::Synonyms;
use super::tagger::CoarsePos;
use crate::errors::{GatewayError, LexiconError};

/// A gateway that knows no synonyms at all
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSynonyms;

impl Synonyms for NoSynonyms {
    fn synonyms(
        &self,
        _word: &str,
        _pos: Option<CoarsePos>,
        _language: &str,
    ) -> Result<Vec<Vec<String>>, GatewayError> {
        Ok(Vec::new())
    }
}

/// One group of interchangeable lemmas
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Synset {
    /// Part of speech the group belongs to; `None` matches any query
    #[serde(default)]
    pub pos: Option<CoarsePos>,
    /// Lemmas in preference order
    pub lemmas: Vec<String>,
}

/// Synonym dictionary loaded from JSON
#[derive(Debug, Default, Clone)]
pub struct Thesaurus {
    synsets: HashMap<String, Vec<Synset>>,
}

impl Thesaurus {
    /// Build a thesaurus from in-memory synsets
    pub fn from_synsets<I>(synsets: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<Synset>)>,
    {
        Self {
            synsets: synsets.into_iter().collect(),
        }
    }

    /// Parse a thesaurus from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let synsets: HashMap<String, Vec<Synset>> =
            serde_json::from_str(json).map_err(|e| LexiconError::Parse(e.to_string()))?;
        Ok(Self { synsets })
    }

    /// Load a thesaurus from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path.as_ref())?;
        let thesaurus = Self::from_json_str(&content)?;
        info!(
            "Loaded thesaurus with {} headwords from {:?}",
            thesaurus.synsets.len(),
            path.as_ref()
        );
        Ok(thesaurus)
    }
}

impl Synonyms for Thesaurus {
    fn synonyms(
        &self,
        word: &str,
        pos: Option<CoarsePos>,
        _language: &str,
    ) -> Result<Vec<Vec<String>>, GatewayError> {
        let Some(synsets) = self.synsets.get(word) else {
            return Ok(Vec::new());
        };

        Ok(synsets
            .iter()
            .filter(|synset| match (pos, synset.pos) {
                (Some(wanted), Some(actual)) => wanted == actual,
                _ => true,
            })
            .map(|synset| synset.lemmas.clone())
            .collect())
    }
}
