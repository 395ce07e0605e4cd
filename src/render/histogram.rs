use super::{Anchor, Area, Color, Surface, text_width};
use crate::words::count_words;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    /// Distinct words with their vote counts, in order of first appearance.
    pub bars: Vec<(String, usize)>,
}

impl Histogram {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            bars: count_words(words),
        }
    }

    pub fn max_count(&self) -> usize {
        self.bars.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }

    /// Integer tick positions from zero up to the first tick at or above the top count.
    pub fn ticks(&self) -> Vec<usize> {
        let max = self.max_count().max(1);
        let step = tick_step(max);
        let last = max.div_ceil(step) * step;
        (0..=last).step_by(step).collect()
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, area: Area, font: f32, title: Option<&str>) {
        let title_height = if title.is_some() { font * 2.2 } else { 0.0 };
        if let Some(title) = title {
            surface.text(
                area.x + area.w / 2.0,
                area.y,
                font * 1.3,
                title,
                Color::INK,
                Anchor::Middle,
            );
        }

        let ticks = self.ticks();
        let axis_max = ticks.last().copied().unwrap_or(1).max(1) as f32;
        let label_width = self
            .bars
            .iter()
            .map(|(word, _)| text_width(word, font))
            .fold(text_width("Mots", font), f32::max);
        let annotation_width = text_width(&self.max_count().to_string(), font) + font;

        let plot = Area::new(
            area.x + label_width + font,
            area.y + title_height + font * 1.8,
            (area.w - label_width - font - annotation_width).max(1.0),
            (area.h - title_height - font * 1.8 - font * 3.4).max(1.0),
        );

        surface.text(area.x, plot.y - font * 1.6, font, "Mots", Color::AXIS, Anchor::Start);

        if !self.bars.is_empty() {
            let slot = plot.h / self.bars.len() as f32;
            for (index, (word, count)) in self.bars.iter().enumerate() {
                let top = plot.bottom() - (index as f32 + 1.0) * slot;
                let bar_w = *count as f32 / axis_max * plot.w;
                let middle = top + slot / 2.0 - font / 2.0;
                surface.fill_rect(plot.x, top + slot * 0.1, bar_w, slot * 0.8, Color::BAR);
                surface.text(plot.x - font * 0.5, middle, font, word, Color::INK, Anchor::End);
                surface.text(
                    plot.x + bar_w + 3.0,
                    middle,
                    font,
                    &count.to_string(),
                    Color::INK,
                    Anchor::Start,
                );
            }
        }

        surface.fill_rect(plot.x, plot.y, 1.0, plot.h, Color::AXIS);
        surface.fill_rect(plot.x, plot.bottom(), plot.w, 1.0, Color::AXIS);
        for tick in &ticks {
            let x = plot.x + *tick as f32 / axis_max * plot.w;
            surface.fill_rect(x, plot.bottom(), 1.0, font * 0.4, Color::AXIS);
            surface.text(
                x,
                plot.bottom() + font * 0.6,
                font,
                &tick.to_string(),
                Color::AXIS,
                Anchor::Middle,
            );
        }
        surface.text(
            plot.x + plot.w / 2.0,
            plot.bottom() + font * 2.2,
            font,
            "Nombre de votes",
            Color::AXIS,
            Anchor::Middle,
        );
    }
}

/// Smallest step among 1, 2, 5 x 10^k that keeps the axis to at most ten intervals.
pub fn tick_step(max: usize) -> usize {
    let mut magnitude = 1usize;
    loop {
        for factor in [1, 2, 5] {
            let step = factor * magnitude;
            if max.div_ceil(step) <= 10 {
                return step;
            }
        }
        magnitude *= 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SvgSurface;

    #[test]
    fn bars_follow_first_appearance() {
        let histogram = Histogram::from_words(&["originale", "inspirée", "originale"]);
        assert_eq!(
            histogram.bars,
            vec![("originale".to_string(), 2), ("inspirée".to_string(), 1)]
        );
        assert_eq!(histogram.max_count(), 2);
    }

    #[test]
    fn ticks_are_integers_covering_the_top_count() {
        let histogram = Histogram::from_words(&["a", "a", "a"]);
        assert_eq!(histogram.ticks(), vec![0, 1, 2, 3]);

        let many: Vec<String> = std::iter::repeat_n("a".to_string(), 37).collect();
        let ticks = Histogram::from_words(&many).ticks();
        assert_eq!(ticks, vec![0, 5, 10, 15, 20, 25, 30, 35, 40]);
    }

    #[test]
    fn tick_steps_stay_nice() {
        assert_eq!(tick_step(1), 1);
        assert_eq!(tick_step(10), 1);
        assert_eq!(tick_step(11), 2);
        assert_eq!(tick_step(20), 2);
        assert_eq!(tick_step(21), 5);
        assert_eq!(tick_step(51), 10);
        assert_eq!(tick_step(1500), 200);
    }

    #[test]
    fn empty_histogram_still_draws_axes() {
        let histogram = Histogram::from_words::<&str>(&[]);
        assert_eq!(histogram.ticks(), vec![0, 1]);

        let mut surface = SvgSurface::new(200, 100, "vide");
        histogram.draw(&mut surface, Area::new(0.0, 0.0, 200.0, 100.0), 10.0, None);
        let svg = surface.finish();
        assert!(svg.contains(">Nombre de votes<"));
        assert!(!svg.contains(r##"fill="#1f77b4""##));
    }

    #[test]
    fn each_bar_is_annotated_with_its_count() {
        let histogram = Histogram::from_words(&["innovante", "innovante", "originale"]);
        let mut surface = SvgSurface::new(400, 300, "votes");
        histogram.draw(&mut surface, Area::new(0.0, 0.0, 400.0, 300.0), 12.0, Some("Titre"));
        let svg = surface.finish();
        assert!(svg.contains(">innovante<"));
        assert!(svg.contains(">originale<"));
        assert!(svg.contains(">Titre<"));
        assert_eq!(svg.matches(r##"fill="#1f77b4""##).count(), 2);
    }
}
