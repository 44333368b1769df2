/*!
 * Page layout.
 *
 * - `glyph`: raster units and compositing
 * - `punctuation`: punctuation classes that steer spacing and wrapping
 * - `engine`: greedy line and page breaking
 * - `document`: title page and page numbers
 * - `alphabet`: symbol legend sheets
 */

pub mod alphabet;
pub mod document;
pub mod engine;
pub mod glyph;
pub mod punctuation;

pub use document::{Document, DocumentAssembler};
pub use engine::{LayoutConfig, LayoutCursor, LayoutEngine, LayoutItem, Page, Placement};
pub use glyph::Glyph;
