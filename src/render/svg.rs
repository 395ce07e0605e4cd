use super::{Anchor, Color, Surface};
use std::fmt::Write;

pub struct SvgSurface {
    width: u32,
    height: u32,
    label: String,
    body: String,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32, label: &str) -> Self {
        Self {
            width,
            height,
            label: escape(label),
            body: String::new(),
        }
    }

    pub fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="100%" role="img" aria-label="{label}">{body}</svg>"#,
            w = self.width,
            h = self.height,
            label = self.label,
            body = self.body,
        )
    }
}

impl Surface for SvgSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        let _ = write!(
            self.body,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{}"/>"#,
            color.hex()
        );
    }

    fn text(&mut self, x: f32, y: f32, size: f32, text: &str, color: Color, anchor: Anchor) {
        let anchor = match anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        // Baseline sits at roughly 80% of the box for monospace faces.
        let baseline = y + size * 0.8;
        let _ = write!(
            self.body,
            r#"<text x="{x:.1}" y="{baseline:.1}" font-size="{size:.1}" font-family="monospace" fill="{}" text-anchor="{anchor}">{}</text>"#,
            color.hex(),
            escape(text)
        );
    }
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
