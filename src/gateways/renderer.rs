/*!
 * Raster glyph renderer.
 *
 * Text is drawn with the embedded-graphics mono fonts into a grayscale
 * buffer and scaled to the requested font size. Symbols are PNG files in
 * a directory, composited onto white and scaled down to fit the
 * requested box.
 */

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use log::debug;
use std::path::{Path, PathBuf};

use super::GlyphRenderer;
use crate::errors::RenderError;
use crate::layout::glyph::{BLACK, Glyph, WHITE, fit_dimensions};

// Cell size of FONT_10X20
const CELL_WIDTH: u32 = 10;
const CELL_HEIGHT: u32 = 20;

/// Grayscale buffer that embedded-graphics can draw on
struct GrayCanvas {
    image: GrayImage,
}

impl GrayCanvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            image: GrayImage::from_pixel(width, height, WHITE),
        }
    }
}

impl OriginDimensions for GrayCanvas {
    fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }
}

impl DrawTarget for GrayCanvas {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let w = self.image.width() as i32;
        let h = self.image.height() as i32;
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= w || point.y >= h {
                continue;
            }
            if color.is_on() {
                self.image.put_pixel(point.x as u32, point.y as u32, BLACK);
            }
        }
        Ok(())
    }
}

/// The mono font only covers ASCII
fn normalize_for_font(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '“' | '”' | '„' => '"',
            '‘' | '’' => '\'',
            '–' | '—' => '-',
            c if c.is_ascii() => c,
            _ => '?',
        })
        .collect()
}

/// Blend an RGBA pixel over white and convert to luma
fn flatten_over_white(r: u8, g: u8, b: u8, a: u8) -> u8 {
    let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
    let alpha = a as u32;
    ((luma * alpha + 255 * (255 - alpha)) / 255) as u8
}

/// Renders text with a bitmap font and loads symbols from a directory
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    symbol_dir: PathBuf,
}

impl RasterRenderer {
    /// Create a renderer reading symbol images from `symbol_dir`
    pub fn new<P: AsRef<Path>>(symbol_dir: P) -> Self {
        Self {
            symbol_dir: symbol_dir.as_ref().to_path_buf(),
        }
    }

    pub fn symbol_dir(&self) -> &Path {
        &self.symbol_dir
    }

    /// Draw `text` at the native font size; the glyph is one cell tall
    fn draw_native(text: &str) -> GrayImage {
        let width = CELL_WIDTH * text.chars().count() as u32;
        let mut canvas = GrayCanvas::new(width, CELL_HEIGHT);
        let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut canvas);
        canvas.image
    }
}

impl GlyphRenderer for RasterRenderer {
    /// Text glyphs are `2 * font_size` tall with the text in the lower half,
    /// so text sits near the middle of a line that also holds symbols.
    fn render_text(&self, text: &str, font_size: u32) -> Result<Glyph, RenderError> {
        let text = normalize_for_font(text.trim());
        if text.is_empty() || font_size == 0 {
            return Err(RenderError::EmptyText);
        }

        let native = Self::draw_native(&text);
        let scaled_width = (native.width() * font_size).div_ceil(CELL_HEIGHT).max(1);
        let scaled = imageops::resize(&native, scaled_width, font_size, FilterType::Triangle);

        let mut glyph = Glyph::blank(scaled_width, font_size * 2);
        glyph.paste(&Glyph::new(scaled), 0, font_size as i64);
        Ok(glyph.trimmed_horizontal())
    }

    fn load_symbol(&self, id: &str, max_width: u32, max_height: u32) -> Result<Glyph, RenderError> {
        let path = self.symbol_dir.join(id);
        if !path.is_file() {
            return Err(RenderError::MissingAsset(path.display().to_string()));
        }

        let decoded = image::open(&path).map_err(|e| RenderError::Decode {
            id: id.to_string(),
            message: e.to_string(),
        })?;
        let rgba = decoded.to_rgba8();
        let gray = GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            Luma([flatten_over_white(r, g, b, a)])
        });

        let (w, h) = fit_dimensions(gray.width(), gray.height(), max_width, max_height);
        debug!(
            "Loaded symbol {} ({}x{} -> {}x{})",
            id,
            gray.width(),
            gray.height(),
            w,
            h
        );
        Ok(Glyph::new(gray).fit_within(w, h).trimmed())
    }
}
