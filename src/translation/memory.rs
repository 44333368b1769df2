/*!
 * Translation memory.
 *
 * Tracks, per lexeme, whether it has been seen in the current document and
 * whether it has already been shown as a symbol with its subtitle. Both
 * sets only grow while a document is translated and are cleared before the
 * next one.
 *
 * Disambiguation choices outlive documents: they are stored in
 * `DefinitionChoices`, a shared map that every document of a session (and
 * every worker in folder mode) reads and extends.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::gateways::DefinitionChooser;

/// Sticky disambiguation choices, shared between documents
#[derive(Debug, Clone, Default)]
pub struct DefinitionChoices {
    chosen: Arc<RwLock<HashMap<String, usize>>>,
}

impl DefinitionChoices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored choice for `lexeme`
    pub fn get(&self, lexeme: &str) -> Option<usize> {
        self.chosen.read().get(lexeme).copied()
    }

    /// Store `index` unless a choice already exists; returns the stored choice
    pub fn insert_if_absent(&self, lexeme: &str, index: usize) -> usize {
        *self
            .chosen
            .write()
            .entry(lexeme.to_string())
            .or_insert(index)
    }

    pub fn len(&self) -> usize {
        self.chosen.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.read().is_empty()
    }
}

/// Per-document seen/changed state plus the shared sticky choices
#[derive(Debug, Default)]
pub struct TranslationMemory {
    seen: HashSet<String>,
    changed: HashSet<String>,
    choices: DefinitionChoices,
}

impl TranslationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory that shares sticky choices with other memories
    pub fn with_choices(choices: DefinitionChoices) -> Self {
        Self {
            seen: HashSet::new(),
            changed: HashSet::new(),
            choices,
        }
    }

    pub fn is_seen(&self, lexeme: &str) -> bool {
        self.seen.contains(lexeme)
    }

    pub fn mark_seen(&mut self, lexeme: &str) {
        self.seen.insert(lexeme.to_string());
    }

    pub fn is_changed(&self, lexeme: &str) -> bool {
        self.changed.contains(lexeme)
    }

    pub fn mark_changed(&mut self, lexeme: &str) {
        self.changed.insert(lexeme.to_string());
    }

    /// Forget seen/changed lexemes; sticky choices are kept
    pub fn reset(&mut self) {
        self.seen.clear();
        self.changed.clear();
    }

    pub fn choices(&self) -> &DefinitionChoices {
        &self.choices
    }

    /// Index of the candidate to use for `lexeme`.
    ///
    /// A single candidate never consults the chooser. Otherwise a stored
    /// choice wins; a new choice is clamped to the first candidate when out
    /// of range and stored before it is returned.
    pub fn choose_definition(
        &self,
        lexeme: &str,
        candidate_labels: &[String],
        chooser: &dyn DefinitionChooser,
    ) -> usize {
        if candidate_labels.len() <= 1 {
            return 0;
        }
        if let Some(index) = self.choices.get(lexeme) {
            return if index < candidate_labels.len() { index } else { 0 };
        }

        let mut index = chooser.choose(lexeme, candidate_labels);
        if index >= candidate_labels.len() {
            debug!(
                "Choice {} for '{}' is out of range, using the first candidate",
                index, lexeme
            );
            index = 0;
        }
        self.choices.insert_if_absent(lexeme, index)
    }
}
