/*!
 * # Pictoscribe - symbol-supported text layout
 *
 * A Rust library that turns running text into fixed-size pages on which
 * content words are replaced by pictographic symbols.
 *
 * ## Features
 *
 * - Word-to-symbol resolution through direct lookup, morphological
 *   normalization and synonym fallback
 * - Progressive substitution: text first, then a subtitled symbol, then a
 *   bare symbol, per word and per document
 * - Sticky disambiguation of words with several candidate symbols
 * - Greedy line and page breaking that keeps punctuation with its word
 * - Title pages, page numbers and symbol legends
 * - Concurrent translation of whole folders
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `lexicon`: Word to symbol mapping
 * - `gateways`: Collaborator traits and their built-in implementations:
 *   - `gateways::tokenizer`, `gateways::tagger`: Tokens and part-of-speech tags
 *   - `gateways::morphology`, `gateways::synonyms`: Word normalization
 *   - `gateways::renderer`: Text rasterization and symbol images
 *   - `gateways::sink`: Page output
 * - `translation`: Symbol substitution:
 *   - `translation::resolver`: Lexeme resolution
 *   - `translation::memory`: Per-document state and sticky choices
 *   - `translation::policy`: Substitution policy
 *   - `translation::session`: Whole-document driver
 * - `layout`: Glyphs, line and page breaking, document assembly
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod gateways;
pub mod language_utils;
pub mod layout;
pub mod lexicon;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, GatewayError, LayoutError, LexiconError, RenderError, SinkError};
pub use gateways::Gateways;
pub use language_utils::{get_language_name, language_codes_match, resolve_language};
pub use layout::{Document, Glyph, LayoutConfig, Page};
pub use lexicon::{Lexicon, SymbolEntry};
pub use translation::{TranslationPolicy, TranslationSession};
