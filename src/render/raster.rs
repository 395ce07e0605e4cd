use super::{Anchor, Color, GLYPH_ADVANCE, Surface, anchored_x, text_width};
use crate::errors::AppError;
use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// RGB canvas drawing text with the 8x8 bitmap fonts, stretched to the requested size.
pub struct RasterSurface {
    image: RgbImage,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, Rgb([255, 255, 255])),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_png(self) -> Result<Vec<u8>, AppError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn put(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= i64::from(self.image.width()) || y >= i64::from(self.image.height()) {
            return;
        }
        self.image
            .put_pixel(x as u32, y as u32, Rgb([color.0, color.1, color.2]));
    }

    fn glyph(&mut self, x: f32, y: f32, size: f32, ch: char, color: Color) {
        let rows = glyph_rows(ch);
        let cell_w = size * GLYPH_ADVANCE;
        let (x0, y0) = (x.round() as i64, y.round() as i64);
        for row in 0..size.ceil() as i64 {
            let gy = (((row as f32 + 0.5) / size) * 8.0) as usize;
            let bits = rows[gy.min(7)];
            for col in 0..cell_w.ceil() as i64 {
                let gx = (((col as f32 + 0.5) / cell_w) * 8.0) as usize;
                if bits >> gx.min(7) & 1 == 1 {
                    self.put(x0 + col, y0 + row, color);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let (x0, y0) = (x.round() as i64, y.round() as i64);
        let (x1, y1) = ((x + w).round() as i64, (y + h).round() as i64);
        for py in y0..y1.max(y0 + 1) {
            for px in x0..x1.max(x0 + 1) {
                self.put(px, py, color);
            }
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, text: &str, color: Color, anchor: Anchor) {
        let start = anchored_x(x, text_width(text, size), anchor);
        let advance = size * GLYPH_ADVANCE;
        for (index, ch) in text.chars().enumerate() {
            self.glyph(start + index as f32 * advance, y, size, ch, color);
        }
    }
}

fn glyph_rows(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .unwrap_or([0; 8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inked(surface: &RasterSurface) -> usize {
        surface
            .image()
            .pixels()
            .filter(|pixel| pixel.0 != [255, 255, 255])
            .count()
    }

    #[test]
    fn accented_glyphs_have_ink() {
        assert_ne!(glyph_rows('é'), [0; 8]);
        assert_ne!(glyph_rows('a'), [0; 8]);
        assert_eq!(glyph_rows(' '), [0; 8]);
    }

    #[test]
    fn text_stays_inside_its_box() {
        let mut surface = RasterSurface::new(100, 40);
        surface.text(10.0, 10.0, 16.0, "ok", Color::INK, Anchor::Start);
        assert!(inked(&surface) > 0);
        for (x, y, pixel) in surface.image().enumerate_pixels() {
            if pixel.0 != [255, 255, 255] {
                assert!((10..30).contains(&x), "x={x}");
                assert!((10..26).contains(&y), "y={y}");
            }
        }
    }

    #[test]
    fn drawing_off_canvas_is_clipped() {
        let mut surface = RasterSurface::new(20, 20);
        surface.fill_rect(-5.0, -5.0, 50.0, 50.0, Color::BAR);
        surface.text(-100.0, 200.0, 30.0, "hors", Color::INK, Anchor::End);
        assert_eq!(inked(&surface), 400);
    }
}
