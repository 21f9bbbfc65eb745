//! Text measurement capability.
//!
//! Hit-testing and selection boxes for text need the rendered width of each
//! line, which only the host's rendering backend knows exactly. The core asks
//! through [`TextMeasure`]; [`MonospaceMeasure`] is a deterministic stand-in
//! for hosts without a backend and for tests.

use crate::consts::MONOSPACE_ADVANCE;

/// Font parameters of a text element.
#[derive(Debug, Clone, PartialEq)]
pub struct Font<'a> {
    pub size: f64,
    pub family: &'a str,
    pub style: &'a str,
    pub weight: &'a str,
}

impl Font<'_> {
    /// CSS shorthand, e.g. `normal normal 16px monospace`.
    #[must_use]
    pub fn css(&self) -> String {
        format!("{} {} {}px {}", self.style, self.weight, self.size, self.family)
    }
}

/// Measures the rendered width of a single line of text.
pub trait TextMeasure {
    fn line_width(&self, line: &str, font: &Font<'_>) -> f64;
}

/// Fixed-advance measurer: every glyph is `0.6 × font size` wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonospaceMeasure;

impl TextMeasure for MonospaceMeasure {
    #[allow(clippy::cast_precision_loss)]
    fn line_width(&self, line: &str, font: &Font<'_>) -> f64 {
        line.chars().count() as f64 * font.size * MONOSPACE_ADVANCE
    }
}

/// Width of the widest line and total height (`lines × font size`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn block_size(lines: &[String], font: &Font<'_>, measure: &dyn TextMeasure) -> (f64, f64) {
    let width = lines
        .iter()
        .map(|line| measure.line_width(line, font))
        .fold(0.0, f64::max);
    (width, lines.len() as f64 * font.size)
}
