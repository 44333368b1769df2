//! Punctuation classes used by spacing and line-wrap decisions.
//!
//! `-` and `"` are both opening and closing.

/// Marks that attach to the token after them
pub const OPENING: &[&str] = &["(", "\"", "-", "“", "‘", "„"];

/// Marks that attach to the token before them
pub const CLOSING: &[&str] = &[".", ",", ";", ":", "?", "!", ")", "\"", "-", "”", "’"];

/// Line and paragraph boundary token
pub const NEWLINE: &str = "\n";

/// Negation fragment split off contractions ("do" + "n't")
pub const CONTRACTION_NEGATION: &str = "n't";

pub fn is_opening(token: Option<&str>) -> bool {
    token.is_some_and(|t| OPENING.contains(&t))
}

pub fn is_closing(token: Option<&str>) -> bool {
    token.is_some_and(|t| CLOSING.contains(&t))
}

pub fn is_newline(token: Option<&str>) -> bool {
    token == Some(NEWLINE)
}

/// Any punctuation mark; these are never replaced by symbols
pub fn is_punctuation(token: &str) -> bool {
    token == "'" || OPENING.contains(&token) || CLOSING.contains(&token)
}
