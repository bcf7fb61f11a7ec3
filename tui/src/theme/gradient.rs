//! Gradient Ramps
//!
//! Colors blended between two endpoints in CIE L*u*v*, which keeps the
//! perceived lightness steps even across the ramp.

use palette::white_point::D65;
use palette::{FromColor, IntoColor, Luv, Mix, Srgb};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::{Rgb, GRADIENT_END, GRADIENT_START};

/// Shortest text worth coloring with a gradient
pub const MIN_GRADIENT_LEN: usize = 3;

/// Build `len` colors stepping from `from` towards `to`
///
/// Step `i` blends at `i / len`, so the first color is exactly `from` and the
/// last stops one step short of `to`.
pub fn gradient_ramp(len: usize, from: Rgb, to: Rgb) -> Vec<Rgb> {
    let start = to_luv(from);
    let end = to_luv(to);

    (0..len)
        .map(|i| {
            let step = start.mix(end, i as f64 / len as f64);
            let rgb: Srgb<u8> = Srgb::<f64>::from_color(step).into_format();
            Rgb::new(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Color each character of `text` along the brand gradient
///
/// Text shorter than [`MIN_GRADIENT_LEN`] characters comes back as a single
/// span in the base style.
pub fn gradient_text(base: Style, text: &str) -> Line<'static> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < MIN_GRADIENT_LEN {
        return Line::from(Span::styled(text.to_string(), base));
    }

    let spans: Vec<Span<'static>> = chars
        .iter()
        .zip(gradient_ramp(chars.len(), GRADIENT_START, GRADIENT_END))
        .map(|(ch, color)| Span::styled(ch.to_string(), base.fg(color.into())))
        .collect();
    Line::from(spans)
}

fn to_luv(rgb: Rgb) -> Luv<D65, f64> {
    Srgb::new(rgb.r, rgb.g, rgb.b).into_format::<f64>().into_color()
}
