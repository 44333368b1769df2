/*!
 * Morphology gateways.
 *
 * - `IdentityMorphology` never changes a word.
 * - `EnglishMorphology` applies irregular tables and suffix rules.
 * - `InflectionTable` maps inflected forms to lexemes from a JSON file,
 *   which is how languages without built-in rules are supported.
 */

use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::Morphology;
use crate::errors::{GatewayError, LexiconError};

/// Returns every word unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityMorphology;

impl Morphology for IdentityMorphology {
    fn singularize(&self, word: &str, _language: &str) -> Result<String, GatewayError> {
        Ok(word.to_string())
    }

    fn lemmatize(&self, word: &str, _language: &str) -> Result<String, GatewayError> {
        Ok(word.to_string())
    }

    fn predicative(&self, word: &str, _language: &str) -> Result<String, GatewayError> {
        Ok(word.to_string())
    }
}

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("people", "person"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("oxen", "ox"),
    ("lice", "louse"),
    ("dice", "die"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("lives", "life"),
];

const IRREGULAR_VERBS: &[(&str, &str)] = &[
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("does", "do"),
    ("did", "do"),
    ("done", "do"),
    ("goes", "go"),
    ("went", "go"),
    ("gone", "go"),
    ("ran", "run"),
    ("saw", "see"),
    ("seen", "see"),
    ("took", "take"),
    ("taken", "take"),
    ("made", "make"),
    ("said", "say"),
    ("got", "get"),
    ("gotten", "get"),
    ("came", "come"),
    ("knew", "know"),
    ("known", "know"),
    ("thought", "think"),
    ("sat", "sit"),
    ("ate", "eat"),
    ("eaten", "eat"),
    ("fell", "fall"),
    ("fallen", "fall"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("told", "tell"),
    ("felt", "feel"),
    ("left", "leave"),
    ("kept", "keep"),
    ("began", "begin"),
    ("begun", "begin"),
    ("wrote", "write"),
    ("written", "write"),
    ("stood", "stand"),
    ("heard", "hear"),
    ("brought", "bring"),
    ("bought", "buy"),
    ("caught", "catch"),
    ("taught", "teach"),
    ("built", "build"),
    ("sent", "send"),
    ("spent", "spend"),
    ("lost", "lose"),
    ("held", "hold"),
    ("met", "meet"),
    ("paid", "pay"),
    ("sold", "sell"),
    ("won", "win"),
    ("drew", "draw"),
    ("drawn", "draw"),
    ("grew", "grow"),
    ("grown", "grow"),
    ("threw", "throw"),
    ("thrown", "throw"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("rode", "ride"),
    ("ridden", "ride"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("broke", "break"),
    ("broken", "break"),
    ("chose", "choose"),
    ("chosen", "choose"),
    ("woke", "wake"),
    ("sang", "sing"),
    ("sung", "sing"),
    ("swam", "swim"),
    ("drank", "drink"),
    ("drunk", "drink"),
];

const IRREGULAR_ADJECTIVES: &[(&str, &str)] = &[
    ("better", "good"),
    ("best", "good"),
    ("well", "good"),
    ("worse", "bad"),
    ("worst", "bad"),
    ("more", "much"),
    ("most", "much"),
    ("less", "little"),
    ("least", "little"),
    ("further", "far"),
    ("furthest", "far"),
    ("farther", "far"),
    ("farthest", "far"),
];

fn lookup(table: &[(&str, &str)], word: &str) -> Option<String> {
    table
        .iter()
        .find(|(form, _)| *form == word)
        .map(|(_, base)| (*base).to_string())
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Restore the base of a stem left after removing `-ing`, `-ed`, `-er` or `-est`:
/// `runn` -> `run`, `mak` -> `make`, `walk` -> `walk`
fn restore_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    if n >= 2 && chars[n - 1] == chars[n - 2] && !is_vowel(chars[n - 1]) {
        // Doubled final consonant, except where English keeps it
        if matches!(chars[n - 1], 'l' | 's' | 'z' | 'f') {
            return stem.to_string();
        }
        return chars[..n - 1].iter().collect();
    }
    if n == 3
        && !is_vowel(chars[0])
        && is_vowel(chars[1])
        && !is_vowel(chars[2])
        && !matches!(chars[2], 'w' | 'x' | 'y')
    {
        return format!("{}e", stem);
    }
    if n > 3 && ["at", "iz", "ov", "iv", "ak", "ut"].iter().any(|s| stem.ends_with(s)) {
        return format!("{}e", stem);
    }
    stem.to_string()
}

/// Rule-based English morphology
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishMorphology;

impl EnglishMorphology {
    fn check_language(language: &str) -> Result<(), GatewayError> {
        if language == "eng" {
            Ok(())
        } else {
            Err(GatewayError::Unsupported {
                gateway: "EnglishMorphology",
                language: language.to_string(),
            })
        }
    }

    fn singular(word: &str) -> String {
        if let Some(base) = lookup(IRREGULAR_PLURALS, word) {
            return base;
        }
        let len = word.chars().count();
        if len > 4 && word.ends_with("ies") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if len > 4 && word.ends_with("ves") {
            return format!("{}f", &word[..word.len() - 3]);
        }
        if len > 3
            && ["ches", "shes", "sses", "xes", "zes"]
                .iter()
                .any(|suffix| word.ends_with(suffix))
        {
            return word[..word.len() - 2].to_string();
        }
        if len > 2 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us") {
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }

    fn infinitive(word: &str) -> String {
        if let Some(base) = lookup(IRREGULAR_VERBS, word) {
            return base;
        }
        let len = word.chars().count();
        if len > 4 && word.ends_with("ing") {
            return restore_stem(&word[..word.len() - 3]);
        }
        if len > 4 && word.ends_with("ied") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if len > 3 && word.ends_with("ed") {
            return restore_stem(&word[..word.len() - 2]);
        }
        if len > 3 && word.ends_with("ies") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if len > 3
            && ["ches", "shes", "sses", "xes", "zes", "oes"]
                .iter()
                .any(|suffix| word.ends_with(suffix))
        {
            return word[..word.len() - 2].to_string();
        }
        if len > 2 && word.ends_with('s') && !word.ends_with("ss") {
            return word[..word.len() - 1].to_string();
        }
        word.to_string()
    }

    fn base_adjective(word: &str) -> String {
        if let Some(base) = lookup(IRREGULAR_ADJECTIVES, word) {
            return base;
        }
        let len = word.chars().count();
        if len > 5 && word.ends_with("iest") {
            return format!("{}y", &word[..word.len() - 4]);
        }
        if len > 4 && word.ends_with("ier") {
            return format!("{}y", &word[..word.len() - 3]);
        }
        if len > 4 && word.ends_with("est") {
            return restore_stem(&word[..word.len() - 3]);
        }
        if len > 3 && word.ends_with("er") {
            return restore_stem(&word[..word.len() - 2]);
        }
        word.to_string()
    }
}

impl Morphology for EnglishMorphology {
    fn singularize(&self, word: &str, language: &str) -> Result<String, GatewayError> {
        Self::check_language(language)?;
        Ok(Self::singular(word))
    }

    fn lemmatize(&self, word: &str, language: &str) -> Result<String, GatewayError> {
        Self::check_language(language)?;
        Ok(Self::infinitive(word))
    }

    fn predicative(&self, word: &str, language: &str) -> Result<String, GatewayError> {
        Self::check_language(language)?;
        Ok(Self::base_adjective(word))
    }
}

#[derive(Debug, Default, Deserialize)]
struct InflectionFile {
    #[serde(default)]
    plurals: HashMap<String, String>,
    #[serde(default)]
    verbs: HashMap<String, String>,
    #[serde(default)]
    adjectives: HashMap<String, String>,
}

/// Morphology backed by explicit inflected-form tables.
///
/// The JSON file has up to three objects, each mapping an inflected form to
/// its base form:
///
/// ```json
/// { "plurals": {"gatos": "gato"}, "verbs": {"corre": "correr"}, "adjectives": {} }
/// ```
#[derive(Debug, Default, Clone)]
pub struct InflectionTable {
    plurals: HashMap<String, String>,
    verbs: HashMap<String, String>,
    adjectives: HashMap<String, String>,
}

impl InflectionTable {
    /// Empty tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plural -> singular mapping
    pub fn with_plural(mut self, form: &str, base: &str) -> Self {
        self.plurals.insert(form.to_string(), base.to_string());
        self
    }

    /// Add a verb form -> infinitive mapping
    pub fn with_verb(mut self, form: &str, base: &str) -> Self {
        self.verbs.insert(form.to_string(), base.to_string());
        self
    }

    /// Add an adjective form -> predicative mapping
    pub fn with_adjective(mut self, form: &str, base: &str) -> Self {
        self.adjectives.insert(form.to_string(), base.to_string());
        self
    }

    /// Parse tables from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, LexiconError> {
        let file: InflectionFile =
            serde_json::from_str(json).map_err(|e| LexiconError::Parse(e.to_string()))?;
        Ok(Self {
            plurals: file.plurals,
            verbs: file.verbs,
            adjectives: file.adjectives,
        })
    }

    /// Load tables from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let content = fs::read_to_string(path.as_ref())?;
        let table = Self::from_json_str(&content)?;
        info!(
            "Loaded inflection table from {:?} ({} plurals, {} verb forms, {} adjective forms)",
            path.as_ref(),
            table.plurals.len(),
            table.verbs.len(),
            table.adjectives.len()
        );
        Ok(table)
    }

    fn base(table: &HashMap<String, String>, word: &str) -> String {
        table.get(word).cloned().unwrap_or_else(|| word.to_string())
    }
}

impl Morphology for InflectionTable {
    fn singularize(&self, word: &str, _language: &str) -> Result<String, GatewayError> {
        Ok(Self::base(&self.plurals, word))
    }

    fn lemmatize(&self, word: &str, _language: &str) -> Result<String, GatewayError> {
        Ok(Self::base(&self.verbs, word))
    }

    fn predicative(&self, word: &str, _language: &str) -> Result<String, GatewayError> {
        Ok(Self::base(&self.adjectives, word))
    }
}
