/*!
 * Disambiguation strategies for words with several candidate symbols.
 */

use log::warn;
use std::io::{self, BufRead, Write};

use super::DefinitionChooser;

/// Always picks the first candidate, used when interactive choice is off
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstCandidate;

impl DefinitionChooser for FirstCandidate {
    fn choose(&self, _lexeme: &str, _candidate_labels: &[String]) -> usize {
        0
    }
}

/// Asks on the terminal which candidate to use
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleChooser;

impl ConsoleChooser {
    /// Parse a 1-based answer into a 0-based index
    pub fn parse_answer(answer: &str, candidates: usize) -> Option<usize> {
        match answer.trim().parse::<usize>() {
            Ok(n) if n >= 1 && n <= candidates => Some(n - 1),
            _ => None,
        }
    }
}

impl DefinitionChooser for ConsoleChooser {
    fn choose(&self, lexeme: &str, candidate_labels: &[String]) -> usize {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = writeln!(out, "\"{}\" has {} meanings:", lexeme, candidate_labels.len());
        for (i, label) in candidate_labels.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, label);
        }
        let _ = write!(out, "Choose a number for \"{}\": ", lexeme);
        let _ = out.flush();
        drop(out);

        let mut answer = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut answer) {
            warn!("Failed to read definition choice for '{}': {}", lexeme, e);
            return 0;
        }

        match Self::parse_answer(&answer, candidate_labels.len()) {
            Some(index) => index,
            None => {
                warn!(
                    "Invalid choice '{}' for '{}', using the first meaning",
                    answer.trim(),
                    lexeme
                );
                0
            }
        }
    }
}
