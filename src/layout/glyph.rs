/*!
 * Glyphs: the raster unit placed on a page.
 *
 * A glyph is a grayscale image on a white background. Ink is anything
 * darker than `INK_THRESHOLD`. Compound glyphs (symbol over subtitle,
 * symbol with plural marker) are built here so that every glyph handed to
 * the layout engine is a single rectangle.
 */

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

/// Pixels darker than this count as ink when trimming
pub const INK_THRESHOLD: u8 = 205;

/// Page background
pub const WHITE: Luma<u8> = Luma([255]);

/// Ink colour used for rendered text
pub const BLACK: Luma<u8> = Luma([0]);

/// Largest `(width, height)` with the same aspect ratio that fits the bounds.
///
/// Never enlarges; never returns a zero dimension for a non-empty input.
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    let ratio = f64::min(
        max_width as f64 / width as f64,
        max_height as f64 / height as f64,
    );
    let w = ((width as f64 * ratio).floor() as u32).clamp(1, max_width.max(1));
    let h = ((height as f64 * ratio).floor() as u32).clamp(1, max_height.max(1));
    (w, h)
}

/// A rectangular raster image
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    image: GrayImage,
}

impl Glyph {
    pub fn new(image: GrayImage) -> Self {
        Self { image }
    }

    /// White rectangle
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(GrayImage::from_pixel(width, height, WHITE))
    }

    /// Zero-sized glyph, used for newlines
    pub fn empty() -> Self {
        Self::blank(0, 0)
    }

    /// Rectangle filled with `luma`
    pub fn filled(width: u32, height: u32, luma: u8) -> Self {
        Self::new(GrayImage::from_pixel(width, height, Luma([luma])))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the glyph covers no pixels at all
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    pub fn into_image(self) -> GrayImage {
        self.image
    }

    /// Bounding box `(left, top, right, bottom)` of the ink, exclusive on the right/bottom
    pub fn ink_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in self.image.enumerate_pixels() {
            if pixel.0[0] >= INK_THRESHOLD {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x + 1, y + 1),
                Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x + 1), b.max(y + 1)),
            });
        }
        bounds
    }

    /// Whether any pixel is ink
    pub fn has_ink(&self) -> bool {
        self.image.pixels().any(|p| p.0[0] < INK_THRESHOLD)
    }

    fn cropped(&self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::new(imageops::crop_imm(&self.image, x, y, width, height).to_image())
    }

    /// Crop to the ink bounding box; glyphs without ink are returned unchanged
    pub fn trimmed(&self) -> Self {
        match self.ink_bounds() {
            Some((l, t, r, b)) => self.cropped(l, t, r - l, b - t),
            None => self.clone(),
        }
    }

    /// Crop away empty columns only, keeping the full height
    pub fn trimmed_horizontal(&self) -> Self {
        match self.ink_bounds() {
            Some((l, _, r, _)) => self.cropped(l, 0, r - l, self.height()),
            None => self.clone(),
        }
    }

    /// Copy `other` onto this glyph with its top-left corner at `(x, y)`.
    ///
    /// Pixels outside this glyph are clipped.
    pub fn paste(&mut self, other: &Glyph, x: i64, y: i64) {
        if other.is_empty() {
            return;
        }
        imageops::replace(&mut self.image, &other.image, x, y);
    }

    /// Downscale (never enlarge) to fit within `max_width` x `max_height`
    pub fn fit_within(&self, max_width: u32, max_height: u32) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        let (w, h) = fit_dimensions(self.width(), self.height(), max_width, max_height);
        if (w, h) == (self.width(), self.height()) {
            return self.clone();
        }
        Self::new(imageops::resize(&self.image, w, h, FilterType::Triangle))
    }

    /// Stack this glyph over `subtitle`, both horizontally centred, `gap` pixels apart
    pub fn with_subtitle(&self, subtitle: &Glyph, gap: u32) -> Self {
        let width = self.width().max(subtitle.width());
        let height = self.height() + gap + subtitle.height();
        let mut compound = Self::blank(width, height);
        compound.paste(self, ((width - self.width()) / 2) as i64, 0);
        compound.paste(
            subtitle,
            ((width - subtitle.width()) / 2) as i64,
            (self.height() + gap) as i64,
        );
        compound
    }

    /// Affix `marker` to the right of this glyph, both vertically centred
    pub fn with_suffix(&self, marker: &Glyph) -> Self {
        let width = self.width() + marker.width();
        let height = self.height().max(marker.height());
        let mut compound = Self::blank(width, height);
        compound.paste(self, 0, ((height - self.height()) / 2) as i64);
        compound.paste(
            marker,
            self.width() as i64,
            ((height - marker.height()) / 2) as i64,
        );
        compound
    }
}
