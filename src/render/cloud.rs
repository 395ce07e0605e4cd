use super::{Anchor, Area, Color, Surface, text_width};
use crate::words::count_words;
use std::f32::consts::TAU;

const MIN_FONT: f32 = 12.0;
const SHRINK: f32 = 0.9;
const GAP: f32 = 4.0;
/// Radius gained per spiral turn.
const SPIRAL_PITCH: f32 = 3.0;
/// Approximate arc length between two probed positions.
const SPIRAL_STRIDE: f32 = 2.0;

const PALETTE: [Color; 8] = [
    Color(68, 1, 84),
    Color(70, 50, 126),
    Color(54, 92, 141),
    Color(39, 127, 142),
    Color(31, 161, 135),
    Color(74, 193, 109),
    Color(160, 218, 57),
    Color(200, 110, 40),
];

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub count: usize,
    /// Top-left corner of the word's box.
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Color,
}

impl PlacedWord {
    pub fn bounds(&self) -> Area {
        Area::new(self.x, self.y, text_width(&self.text, self.size), self.size)
    }
}

#[derive(Debug, Clone)]
pub struct CloudLayout {
    pub width: u32,
    pub height: u32,
    pub words: Vec<PlacedWord>,
}

impl CloudLayout {
    /// Lays out the distinct words of `text`, most frequent first, each sized by its share
    /// of the top count and placed on a spiral around the centre. Words that do not fit even
    /// at the minimum size are left out.
    pub fn generate(text: &str, width: u32, height: u32) -> Self {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut counts = count_words(&tokens);
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let canvas = Area::new(0.0, 0.0, width as f32, height as f32);
        let max_font = height as f32 / 4.0;
        let top = counts.first().map(|(_, count)| *count).unwrap_or(1) as f32;

        let mut words: Vec<PlacedWord> = Vec::with_capacity(counts.len());
        for (rank, (text, count)) in counts.into_iter().enumerate() {
            let mut size = max_font * (0.5 + 0.5 * count as f32 / top);
            while size >= MIN_FONT {
                let box_w = text_width(&text, size);
                if let Some((x, y)) = find_spot(&canvas, box_w, size, &words) {
                    words.push(PlacedWord {
                        text,
                        count,
                        x,
                        y,
                        size,
                        color: PALETTE[rank % PALETTE.len()],
                    });
                    break;
                }
                size *= SHRINK;
            }
        }

        Self {
            width,
            height,
            words,
        }
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, x: f32, y: f32, scale: f32) {
        surface.fill_rect(
            x,
            y,
            self.width as f32 * scale,
            self.height as f32 * scale,
            Color::WHITE,
        );
        for word in &self.words {
            surface.text(
                x + word.x * scale,
                y + word.y * scale,
                word.size * scale,
                &word.text,
                word.color,
                Anchor::Start,
            );
        }
    }
}

fn find_spot(canvas: &Area, w: f32, h: f32, placed: &[PlacedWord]) -> Option<(f32, f32)> {
    if w > canvas.w || h > canvas.h {
        return None;
    }

    let (cx, cy) = (canvas.w / 2.0, canvas.h / 2.0);
    let aspect = canvas.w / canvas.h;
    let max_radius = (cx / aspect).hypot(cy) + SPIRAL_PITCH;

    let mut angle = 0.0f32;
    loop {
        let radius = SPIRAL_PITCH * angle / TAU;
        if radius > max_radius {
            return None;
        }

        let candidate = Area::new(
            cx + radius * aspect * angle.cos() - w / 2.0,
            cy + radius * angle.sin() - h / 2.0,
            w,
            h,
        );
        if canvas.contains(&candidate)
            && !placed
                .iter()
                .any(|word| word.bounds().intersects(&candidate, GAP))
        {
            return Some((candidate.x, candidate.y));
        }

        angle += SPIRAL_STRIDE / radius.max(SPIRAL_STRIDE);
    }
}
