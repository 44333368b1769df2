/*!
 * Error types for the pictoscribe application.
 *
 * This module contains custom error types for the different parts of the
 * translation pipeline, using the thiserror crate for ergonomic error definitions.
 *
 * Per-token errors (`GatewayError`, `RenderError`) are absorbed by the
 * translation session and degrade to a plain-text rendering. Session-level
 * errors (`LexiconError`, `LayoutError`, `SinkError`) are surfaced to the caller.
 */

use thiserror::Error;

/// Errors returned by external collaborators (tagger, morphology, synonyms)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The collaborator could not be reached or failed internally
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),

    /// The collaborator has no information about this word
    #[error("Unknown word: {0}")]
    UnknownWord(String),

    /// The collaborator does not support the requested language
    #[error("{gateway} does not support language '{language}'")]
    Unsupported {
        /// Name of the gateway
        gateway: &'static str,
        /// Requested language
        language: String,
    },
}

/// Errors that can occur while loading a lexicon
#[derive(Error, Debug)]
pub enum LexiconError {
    /// Error reading the lexicon file
    #[error("Failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing the lexicon file
    #[error("Failed to parse lexicon: {0}")]
    Parse(String),

    /// An entry lists no symbol at all
    #[error("Lexicon entry '{0}' has no symbol candidates")]
    EmptyEntry(String),
}

/// Errors that can occur while producing a glyph
#[derive(Error, Debug)]
pub enum RenderError {
    /// The symbol image does not exist
    #[error("Missing symbol asset: {0}")]
    MissingAsset(String),

    /// The symbol image exists but could not be decoded
    #[error("Failed to decode symbol '{id}': {message}")]
    Decode {
        /// Symbol identifier
        id: String,
        /// Decoder message
        message: String,
    },

    /// Nothing to render
    #[error("Cannot render empty text")]
    EmptyText,
}

/// Errors raised by the layout engine configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Page or font geometry that can never hold a single line
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),
}

/// Errors raised when handing finished pages to a sink
#[derive(Error, Debug)]
pub enum SinkError {
    /// Error writing a page
    #[error("Failed to write page: {0}")]
    Io(#[from] std::io::Error),

    /// Error encoding a page
    #[error("Failed to encode page: {0}")]
    Encode(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from a collaborator
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Error loading the lexicon
    #[error("Lexicon error: {0}")]
    Lexicon(#[from] LexiconError),

    /// Error producing a glyph
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Error in layout geometry
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error emitting pages
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
