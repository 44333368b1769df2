/*!
 * Document assembly: title page and page numbers around laid out pages.
 */

use log::{debug, warn};

use super::engine::{LayoutConfig, Page};
use crate::gateways::GlyphRenderer;

/// Length of the title derived from the text when none is given
pub const DEFAULT_TITLE_CHARS: usize = 20;

/// Page numbers are only printed on documents longer than this
const PAGE_NUMBER_MIN_PAGES: usize = 2;

/// A finished document; the first page is the title page
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Pages after the title page
    pub fn content_pages(&self) -> &[Page] {
        self.pages.get(1..).unwrap_or(&[])
    }
}

/// Title derived from the first characters of the text
pub fn default_title(text: &str) -> String {
    text.chars()
        .take(DEFAULT_TITLE_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Wraps content pages with a title page and page numbers
#[derive(Debug)]
pub struct DocumentAssembler<'a> {
    renderer: &'a dyn GlyphRenderer,
    config: LayoutConfig,
    page_numbers: bool,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(renderer: &'a dyn GlyphRenderer, config: LayoutConfig, page_numbers: bool) -> Self {
        Self {
            renderer,
            config,
            page_numbers,
        }
    }

    /// Title centred horizontally at one third of the page height
    pub fn title_page(&self, title: &str) -> Page {
        let mut page = Page::blank(self.config.page_width, self.config.page_height);
        if title.trim().is_empty() {
            return page;
        }
        match self.renderer.render_text(title, self.config.font_size) {
            Ok(glyph) => {
                let glyph = glyph
                    .trimmed()
                    .fit_within(self.config.page_width, self.config.page_height);
                let x = (self.config.page_width - glyph.width()) / 2;
                let y = (self.config.page_height / 3).min(self.config.page_height - glyph.height());
                page.stamp(&glyph, x, y);
            }
            Err(e) => warn!("Could not render title '{}': {}", title, e),
        }
        page
    }

    fn stamp_page_number(&self, page: &mut Page, number: usize) {
        let font_size = self.config.font_size;
        let glyph = match self.renderer.render_text(&number.to_string(), font_size) {
            Ok(glyph) => glyph.trimmed(),
            Err(e) => {
                warn!("Could not render page number {}: {}", number, e);
                return;
            }
        };
        let x = page.width().saturating_sub(glyph.width()) / 2;
        let y = page
            .height()
            .saturating_sub(glyph.height())
            .saturating_sub(font_size / 2);
        page.stamp(&glyph, x, y);
    }

    /// Prepend the title page and number every page after it
    pub fn assemble(&self, title: &str, content: Vec<Page>) -> Document {
        let mut pages = Vec::with_capacity(content.len() + 1);
        pages.push(self.title_page(title));
        pages.extend(content);

        if self.page_numbers && pages.len() > PAGE_NUMBER_MIN_PAGES {
            for (number, page) in pages.iter_mut().enumerate().skip(1) {
                self.stamp_page_number(page, number);
            }
        }

        debug!("Assembled '{}' with {} pages", title, pages.len());
        Document {
            title: title.to_string(),
            pages,
        }
    }
}
