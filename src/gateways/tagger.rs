/*!
 * Part-of-speech tags and a heuristic English tagger.
 *
 * Tags follow the Penn Treebank tag set. The built-in tagger combines a
 * closed-class word list with suffix rules and a little left context; it is
 * good enough to decide which words are nouns, verbs or adjectives, which
 * is all the translation policy needs.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Tagger;
use crate::errors::GatewayError;
use crate::layout::punctuation::NEWLINE;

/// Coarse part of speech understood by the synonym gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoarsePos {
    Noun,
    Verb,
    Adjective,
}

/// A Penn Treebank part-of-speech tag such as `NN` or `VBD`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosTag(String);

impl PosTag {
    /// Wrap a raw tag string
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Tag used for tokens the tagger said nothing about
    pub fn untagged() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_untagged(&self) -> bool {
        self.0.is_empty()
    }

    /// The tag an untagged token is treated as: a singular noun
    pub fn or_noun(&self) -> PosTag {
        if self.is_untagged() {
            Self::new("NN")
        } else {
            self.clone()
        }
    }

    /// Any noun tag (`NN`, `NNS`, `NNP`, `NNPS`)
    pub fn is_noun(&self) -> bool {
        self.0.starts_with("NN")
    }

    /// Plural common noun (`NNS`)
    pub fn is_plural_noun(&self) -> bool {
        self.0 == "NNS"
    }

    /// Any verb tag (`VB`, `VBD`, `VBG`, `VBN`, `VBP`, `VBZ`)
    pub fn is_verb(&self) -> bool {
        self.0.starts_with("VB")
    }

    /// Any adjective tag (`JJ`, `JJR`, `JJS`)
    pub fn is_adjective(&self) -> bool {
        self.0.starts_with("JJ")
    }

    /// Coarse part of speech for synonym lookup.
    ///
    /// Only nouns, verbs and adjectives have synsets of their own; every
    /// other tag (adverbs included) is looked up as a noun.
    pub fn coarse(&self) -> CoarsePos {
        if self.is_verb() {
            CoarsePos::Verb
        } else if self.is_adjective() {
            CoarsePos::Adjective
        } else {
            CoarsePos::Noun
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PosTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "every", "each", "some", "any", "no",
    "another", "all", "both", "either", "neither",
];
const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "myself",
    "yourself", "himself", "herself", "itself", "ourselves", "themselves", "someone",
    "something", "nothing", "everyone", "everything", "anyone", "anything",
];
const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];
const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "from", "up", "down", "of", "off", "over",
    "under", "since", "without", "within", "along", "across", "behind", "beyond", "near",
    "if", "because", "while", "although", "though", "than", "as", "like", "until", "upon",
];
const CONJUNCTIONS: &[&str] = &["and", "or", "but", "nor", "yet", "so"];
const MODALS: &[&str] = &[
    "can", "could", "may", "might", "must", "shall", "should", "will", "would", "ca", "wo",
];
const WH_WORDS: &[(&str, &str)] = &[
    ("who", "WP"),
    ("whom", "WP"),
    ("what", "WP"),
    ("whose", "WP$"),
    ("which", "WDT"),
    ("when", "WRB"),
    ("where", "WRB"),
    ("why", "WRB"),
    ("how", "WRB"),
];
const ADVERBS: &[&str] = &[
    "not", "n't", "very", "too", "also", "just", "now", "then", "here", "there", "never",
    "always", "often", "soon", "again", "still", "already", "almost", "quite", "well",
];
const AUXILIARIES: &[(&str, &str)] = &[
    ("be", "VB"),
    ("am", "VBP"),
    ("are", "VBP"),
    ("is", "VBZ"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("have", "VBP"),
    ("has", "VBZ"),
    ("had", "VBD"),
    ("do", "VBP"),
    ("does", "VBZ"),
    ("did", "VBD"),
    ("'s", "VBZ"),
    ("'re", "VBP"),
    ("'m", "VBP"),
    ("'ve", "VBP"),
    ("'ll", "MD"),
    ("'d", "MD"),
];
const IRREGULAR_PAST: &[&str] = &[
    "ran", "went", "saw", "took", "made", "said", "got", "came", "knew", "thought", "sat",
    "ate", "fell", "gave", "found", "told", "felt", "left", "kept", "began", "wrote", "stood",
    "heard", "brought", "bought", "caught", "taught", "built", "sent", "spent", "lost",
    "held", "met", "paid", "sold", "won", "drew", "grew", "threw", "flew", "drove", "rode",
    "spoke", "broke", "chose", "woke", "sang", "swam", "drank",
];

/// Closed-class lookup plus suffix heuristics
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTagger;

impl HeuristicTagger {
    /// Create a new tagger
    pub fn new() -> Self {
        Self
    }

    fn punctuation_tag(token: &str) -> Option<&'static str> {
        let tag = match token {
            NEWLINE => "SYM",
            "." | "?" | "!" => ".",
            "," => ",",
            ":" | ";" | "-" | "--" | "..." => ":",
            "(" | "[" | "{" => "(",
            ")" | "]" | "}" => ")",
            "\"" | "“" | "„" | "‘" | "`" | "``" => "``",
            "”" | "’" | "''" => "''",
            "$" => "$",
            "#" => "#",
            _ if token.chars().all(|c| !c.is_alphanumeric()) => "SYM",
            _ => return None,
        };
        Some(tag)
    }

    fn lexical_tag(token: &str, previous: Option<&str>, sentence_start: bool) -> String {
        let lower = token.to_lowercase();
        let word = lower.as_str();

        if let Some(tag) = Self::punctuation_tag(token) {
            return tag.to_string();
        }
        if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            return "CD".to_string();
        }
        if let Some((_, tag)) = AUXILIARIES.iter().find(|(w, _)| *w == word) {
            return (*tag).to_string();
        }
        if let Some((_, tag)) = WH_WORDS.iter().find(|(w, _)| *w == word) {
            return (*tag).to_string();
        }

        let closed = if DETERMINERS.contains(&word) {
            Some("DT")
        } else if PRONOUNS.contains(&word) {
            Some("PRP")
        } else if POSSESSIVES.contains(&word) {
            Some("PRP$")
        } else if word == "to" {
            Some("TO")
        } else if PREPOSITIONS.contains(&word) {
            Some("IN")
        } else if CONJUNCTIONS.contains(&word) {
            Some("CC")
        } else if MODALS.contains(&word) {
            Some("MD")
        } else if ADVERBS.contains(&word) {
            Some("RB")
        } else {
            None
        };
        if let Some(tag) = closed {
            return tag.to_string();
        }

        // Base form after "to" or a modal
        if matches!(previous, Some("TO") | Some("MD")) {
            return "VB".to_string();
        }

        if !sentence_start && token.chars().next().is_some_and(char::is_uppercase) {
            return "NNP".to_string();
        }
        if IRREGULAR_PAST.contains(&word) {
            return "VBD".to_string();
        }

        Self::suffix_tag(word, previous).to_string()
    }

    fn suffix_tag(word: &str, previous: Option<&str>) -> &'static str {
        let after_determiner = matches!(previous, Some("DT") | Some("PRP$") | Some("JJ"));
        let len = word.chars().count();

        if len > 4 && word.ends_with("ing") {
            if after_determiner { "NN" } else { "VBG" }
        } else if len > 3 && word.ends_with("ed") {
            if matches!(previous, Some("VBZ") | Some("VBP") | Some("VBD")) {
                "VBN"
            } else {
                "VBD"
            }
        } else if len > 3 && word.ends_with("ly") {
            "RB"
        } else if len > 4 && word.ends_with("est") {
            "JJS"
        } else if [
            "ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish",
        ]
        .iter()
        .any(|suffix| len > suffix.len() + 2 && word.ends_with(suffix))
        {
            "JJ"
        } else if len > 3
            && word.ends_with('s')
            && !["ss", "us", "is", "ous"].iter().any(|s| word.ends_with(s))
        {
            if matches!(previous, Some("PRP") | Some("NNP")) {
                "VBZ"
            } else {
                "NNS"
            }
        } else if matches!(previous, Some("PRP")) {
            "VBP"
        } else {
            "NN"
        }
    }
}

impl Tagger for HeuristicTagger {
    fn tag(&self, tokens: &[String], language: &str) -> Result<Vec<PosTag>, GatewayError> {
        if language != "eng" {
            return Err(GatewayError::Unsupported {
                gateway: "HeuristicTagger",
                language: language.to_string(),
            });
        }

        let mut tags: Vec<PosTag> = Vec::with_capacity(tokens.len());
        let mut sentence_start = true;
        for token in tokens {
            let previous = tags.last().map(PosTag::as_str);
            let tag = Self::lexical_tag(token, previous, sentence_start);
            sentence_start = matches!(tag.as_str(), "." | "SYM" | "``");
            tags.push(PosTag::new(tag));
        }
        Ok(tags)
    }
}
