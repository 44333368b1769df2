/*!
 * Greedy page layout.
 *
 * Glyphs are placed left to right on fixed-height lines. Each step decides
 * the gap after the glyph, whether the glyph starts a new line (overflow,
 * a punctuation pair that would not fit, or a paragraph break) and whether
 * the line still fits on the current page, then composites the glyph.
 *
 * Lookahead only inspects the next two items; the cursor advances by
 * exactly one item per step.
 */

use log::debug;
use std::mem;

use super::glyph::{Glyph, fit_dimensions};
use super::punctuation::{CONTRACTION_NEGATION, is_closing, is_newline, is_opening};
use crate::errors::LayoutError;

/// Gap used instead of the default space next to punctuation
pub const MIN_SPACE_PX: u32 = 2;

/// Line height as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: u32 = 3;

/// Page geometry and font size, all in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub page_width: u32,
    pub page_height: u32,
    pub font_size: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 816,
            page_height: 1056,
            font_size: 30,
        }
    }
}

impl LayoutConfig {
    pub fn new(page_width: u32, page_height: u32, font_size: u32) -> Self {
        Self {
            page_width,
            page_height,
            font_size,
        }
    }

    /// Reject geometry that can never hold a single line
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.font_size == 0 {
            return Err(LayoutError::InvalidGeometry(
                "font size must be positive".to_string(),
            ));
        }
        if self.page_width == 0 || self.page_height == 0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "page size {}x{} has a zero dimension",
                self.page_width, self.page_height
            )));
        }
        match self.font_size.checked_mul(LINE_HEIGHT_FACTOR) {
            Some(line_height) if line_height <= self.page_height => {}
            _ => {
                return Err(LayoutError::InvalidGeometry(format!(
                    "page height {} cannot hold one line at font size {}",
                    self.page_height, self.font_size
                )));
            }
        }
        if self.paragraph_indent() >= self.page_width {
            return Err(LayoutError::InvalidGeometry(format!(
                "page width {} leaves no room after a paragraph indent of {}",
                self.page_width,
                self.paragraph_indent()
            )));
        }
        Ok(())
    }

    /// Default gap between glyphs
    pub fn space(&self) -> u32 {
        (self.font_size as f32 / 1.5).floor() as u32
    }

    pub fn line_height(&self) -> u32 {
        self.font_size.saturating_mul(LINE_HEIGHT_FACTOR)
    }

    /// Indent of the first line of a paragraph
    pub fn paragraph_indent(&self) -> u32 {
        self.font_size
    }

    /// Number of lines that fit on one page
    pub fn lines_per_page(&self) -> u32 {
        self.page_height / self.line_height().max(1)
    }

    /// Largest height of a bare symbol
    pub fn symbol_height(&self) -> u32 {
        self.font_size.saturating_mul(5) / 2
    }

    /// Font size of subtitles and legend labels
    pub fn subtitle_font_size(&self) -> u32 {
        (self.font_size - self.font_size / 2).max(1)
    }

    /// Gap between a symbol and its subtitle
    pub fn subtitle_gap(&self) -> u32 {
        (self.font_size / 10).max(1)
    }

    /// Side of one legend cell
    pub fn alphabet_cell_size(&self) -> u32 {
        self.font_size.saturating_mul(5)
    }

    /// Gap after `this`, given the two tokens that follow it.
    ///
    /// Rules are tried in order and the first match wins.
    pub fn space_after(&self, this: &str, next1: Option<&str>, next2: Option<&str>) -> u32 {
        let this = Some(this);
        if next1 == Some(CONTRACTION_NEGATION) {
            MIN_SPACE_PX
        } else if is_closing(this) && is_closing(next1) {
            MIN_SPACE_PX
        } else if is_closing(next2) && !is_opening(next1) {
            MIN_SPACE_PX
        } else if is_opening(next1) || is_closing(this) {
            self.space()
        } else if is_closing(next1) || is_opening(this) {
            MIN_SPACE_PX
        } else {
            self.space()
        }
    }
}

/// Where a glyph landed on a page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Index of the item in the laid out sequence
    pub item: usize,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// A fixed-size page canvas
#[derive(Clone, Debug)]
pub struct Page {
    canvas: Glyph,
    placements: Vec<Placement>,
}

impl Page {
    /// White page
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            canvas: Glyph::blank(width, height),
            placements: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub fn canvas(&self) -> &Glyph {
        &self.canvas
    }

    /// Content glyphs in placement order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Composite a content glyph and record its placement
    pub fn place(&mut self, glyph: &Glyph, x: u32, y: u32, item: usize) {
        if glyph.is_empty() {
            return;
        }
        self.canvas.paste(glyph, x as i64, y as i64);
        self.placements.push(Placement {
            item,
            x,
            y,
            width: glyph.width(),
            height: glyph.height(),
        });
    }

    /// Composite decoration (titles, page numbers) without recording it
    pub fn stamp(&mut self, glyph: &Glyph, x: u32, y: u32) {
        self.canvas.paste(glyph, x as i64, y as i64);
    }
}

/// One unit to lay out: the lower-cased token and the glyph chosen for it
#[derive(Clone, Debug)]
pub struct LayoutItem {
    pub text: String,
    pub glyph: Glyph,
}

impl LayoutItem {
    pub fn new(text: impl Into<String>, glyph: Glyph) -> Self {
        Self {
            text: text.into(),
            glyph,
        }
    }
}

/// Position of the next placement on the current page
#[derive(Debug)]
pub struct LayoutCursor {
    pub indent: u32,
    pub line_no: u32,
    page: Page,
}

impl LayoutCursor {
    fn new(cfg: &LayoutConfig) -> Self {
        Self {
            indent: cfg.paragraph_indent(),
            line_no: 0,
            page: Page::blank(cfg.page_width, cfg.page_height),
        }
    }

    fn break_line(&mut self, indent: u32) {
        self.indent = indent;
        self.line_no += 1;
    }

    /// Finalize the current page and continue on a fresh one
    fn start_next_page(&mut self, cfg: &LayoutConfig) -> Page {
        self.line_no = 0;
        mem::replace(&mut self.page, Page::blank(cfg.page_width, cfg.page_height))
    }

    fn into_page(self) -> Page {
        self.page
    }
}

/// Lays out glyph sequences into pages
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    cfg: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(cfg: LayoutConfig) -> Result<Self, LayoutError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    /// Glyph size after scaling down to fit one line of the page
    fn fitted_size(&self, glyph: &Glyph) -> (u32, u32) {
        fit_dimensions(
            glyph.width(),
            glyph.height(),
            self.cfg.page_width,
            self.cfg.line_height(),
        )
    }

    /// Lay out `items` in order; always returns at least one page
    pub fn layout(&self, items: &[LayoutItem]) -> Vec<Page> {
        let cfg = &self.cfg;
        let line_height = cfg.line_height();
        let widths: Vec<u32> = items.iter().map(|i| self.fitted_size(&i.glyph).0).collect();
        let text_at = |i: usize| items.get(i).map(|item| item.text.as_str());
        let width_at = |i: usize| widths.get(i).copied().unwrap_or(0);

        let mut pages = Vec::new();
        let mut cursor = LayoutCursor::new(cfg);

        for (idx, item) in items.iter().enumerate() {
            let this = Some(item.text.as_str());
            let next1 = text_at(idx + 1);
            let next2 = text_at(idx + 2);
            let space = cfg.space_after(&item.text, next1, next2);
            let width = widths[idx];
            let x_inc = cursor.indent + width;

            if x_inc > cfg.page_width {
                cursor.break_line(0);
            } else if is_closing(next2) || is_opening(next1) {
                let ahead = x_inc + width_at(idx + 1) + space * 2 + width_at(idx + 2);
                if ahead > cfg.page_width {
                    debug!("Keeping '{}' with the punctuation after it", item.text);
                    cursor.break_line(0);
                }
            } else if is_newline(this) {
                cursor.break_line(cfg.paragraph_indent());
            }

            if (cursor.line_no + 1).saturating_mul(line_height) > cfg.page_height {
                pages.push(cursor.start_next_page(cfg));
            }

            let (w, h) = self.fitted_size(&item.glyph);
            let y = cursor.line_no * line_height;
            if (w, h) == (item.glyph.width(), item.glyph.height()) {
                cursor.page.place(&item.glyph, cursor.indent, y, idx);
            } else {
                cursor.page.place(&item.glyph.fit_within(w, h), cursor.indent, y, idx);
            }
            cursor.indent += width + space;
        }

        pages.push(cursor.into_page());
        debug!("Laid out {} items on {} pages", items.len(), pages.len());
        pages
    }
}
