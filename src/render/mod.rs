//! Word cloud and histogram rendering.
//!
//! Layouts are computed once and drawn onto a [`Surface`]: SVG for the live admin view,
//! an RGB raster for the PNG written at archive time.

pub mod cloud;
pub mod histogram;
pub mod raster;
pub mod svg;

use crate::errors::AppError;

pub use cloud::CloudLayout;
pub use histogram::Histogram;
pub use raster::RasterSurface;
pub use svg::SvgSurface;

/// Horizontal advance of one glyph, as a fraction of the font size.
pub const GLYPH_ADVANCE: f32 = 0.6;

pub const CLOUD_WIDTH: u32 = 800;
pub const CLOUD_HEIGHT: u32 = 400;
pub const HISTOGRAM_WIDTH: u32 = 500;
pub const HISTOGRAM_HEIGHT: u32 = 300;
pub const COMBINED_WIDTH: u32 = 1200;
pub const COMBINED_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const INK: Color = Color(38, 38, 38);
    pub const AXIS: Color = Color(90, 90, 90);
    pub const BAR: Color = Color(31, 119, 180);

    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Area {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn intersects(&self, other: &Area, gap: f32) -> bool {
        self.x < other.right() + gap
            && other.x < self.right() + gap
            && self.y < other.bottom() + gap
            && other.y < self.bottom() + gap
    }

    pub fn contains(&self, other: &Area) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color);

    /// Draws a single line of text whose box is `size` tall with its top edge at `y`.
    /// `anchor` positions the box horizontally relative to `x`.
    fn text(&mut self, x: f32, y: f32, size: f32, text: &str, color: Color, anchor: Anchor);
}

pub fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * GLYPH_ADVANCE
}

pub fn anchored_x(x: f32, width: f32, anchor: Anchor) -> f32 {
    match anchor {
        Anchor::Start => x,
        Anchor::Middle => x - width / 2.0,
        Anchor::End => x - width,
    }
}

pub fn render_cloud_svg(words: &[String]) -> String {
    let cloud = CloudLayout::generate(&words.join(" "), CLOUD_WIDTH, CLOUD_HEIGHT);
    let mut surface = SvgSurface::new(CLOUD_WIDTH, CLOUD_HEIGHT, "Nuage de mots");
    cloud.draw(&mut surface, 0.0, 0.0, 1.0);
    surface.finish()
}

pub fn render_histogram_svg(words: &[String]) -> String {
    let histogram = Histogram::from_words(words);
    let mut surface = SvgSurface::new(HISTOGRAM_WIDTH, HISTOGRAM_HEIGHT, "Histogramme des mots");
    let area = Area::new(0.0, 0.0, HISTOGRAM_WIDTH as f32, HISTOGRAM_HEIGHT as f32);
    surface.fill_rect(area.x, area.y, area.w, area.h, Color::WHITE);
    histogram.draw(&mut surface, area, 12.0, None);
    surface.finish()
}

/// Word cloud on the left, histogram on the right, both with titles.
pub fn draw_combined<S: Surface>(surface: &mut S, cloud: &CloudLayout, histogram: &Histogram) {
    let panel = COMBINED_WIDTH as f32 / 2.0;
    let height = COMBINED_HEIGHT as f32;
    surface.fill_rect(0.0, 0.0, COMBINED_WIDTH as f32, height, Color::WHITE);

    let scale = (panel - 40.0) / cloud.width as f32;
    let cloud_height = cloud.height as f32 * scale;
    let top = (height - cloud_height) / 2.0;
    surface.text(panel / 2.0, top - 34.0, 18.0, "Nuage de mots", Color::INK, Anchor::Middle);
    cloud.draw(surface, 20.0, top, scale);

    let area = Area::new(panel + 10.0, 20.0, panel - 30.0, height - 40.0);
    histogram.draw(surface, area, 14.0, Some("Histogramme des mots"));
}

pub fn render_combined_png(words: &[String]) -> Result<Vec<u8>, AppError> {
    let cloud = CloudLayout::generate(&words.join(" "), CLOUD_WIDTH, CLOUD_HEIGHT);
    let histogram = Histogram::from_words(words);
    let mut surface = RasterSurface::new(COMBINED_WIDTH, COMBINED_HEIGHT);
    draw_combined(&mut surface, &cloud, &histogram);
    surface.into_png()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(Color(31, 119, 180).hex(), "#1f77b4");
        assert_eq!(Color(0, 0, 0).hex(), "#000000");
    }

    #[test]
    fn area_gap_counts_as_overlap() {
        let a = Area::new(0.0, 0.0, 10.0, 10.0);
        let b = Area::new(12.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b, 1.0));
        assert!(a.intersects(&b, 3.0));
    }

    #[test]
    fn live_svgs_mention_each_word() {
        let list = words(&["innovante", "originale", "innovante"]);
        let cloud = render_cloud_svg(&list);
        assert!(cloud.starts_with("<svg"));
        assert!(cloud.contains(">innovante<"));

        let histogram = render_histogram_svg(&list);
        assert!(histogram.contains(">originale<"));
        assert!(histogram.contains(">Nombre de votes<"));
    }

    #[test]
    fn combined_png_has_signature() {
        let png = render_combined_png(&words(&["inspirée", "ingénieuse"])).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}
