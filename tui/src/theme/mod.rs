//! Theme and Colors
//!
//! Brand colors for the cycling characters, terminal color-capability
//! detection, and the shared [`Styles`] handed to the animation.

pub mod gradient;

use std::env;

use crossterm::style::{Attribute, Color as CtColor, ContentStyle};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

pub use gradient::{gradient_ramp, gradient_text, MIN_GRADIENT_LEN};

// ============================================================================
// Brand Palette
// ============================================================================

/// Opaque 24-bit color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Gradient start - hot pink
pub const GRADIENT_START: Rgb = Rgb::new(0xF9, 0x67, 0xDC);

/// Gradient end - violet
pub const GRADIENT_END: Rgb = Rgb::new(0x6B, 0x50, 0xFF);

/// Muted mauve for placeholders that cycle forever (no gradient)
pub const CYCLING_MAUVE: Color = Color::Rgb(0xAF, 0x87, 0xAF);

/// The same mauve in the 256-color palette
pub const CYCLING_MAUVE_256: Color = Color::Indexed(139);

// ============================================================================
// Color Capability
// ============================================================================

/// Color tiers needed to show the brand gradient (24-bit RGB)
pub const TRUE_COLOR_TIERS: u32 = 1 << 24;

/// Terminal color profile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorProfile {
    /// No color output
    Mono,
    /// Standard 16 ANSI colors
    Ansi16,
    /// Extended 256-color palette
    Ansi256,
    /// Full 24-bit RGB color
    TrueColor,
}

/// Environment inputs used for color detection
#[derive(Clone, Debug, Default)]
pub struct ColorEnv {
    pub no_color: bool,
    pub term: String,
    pub colorterm: String,
}

impl ColorEnv {
    /// Read the inputs from the process environment
    pub fn from_env() -> Self {
        Self {
            no_color: env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()),
            term: env::var("TERM").unwrap_or_default(),
            colorterm: env::var("COLORTERM").unwrap_or_default(),
        }
    }
}

impl ColorProfile {
    /// Detect the profile of the attached terminal
    pub fn detect() -> Self {
        Self::detect_from(&ColorEnv::from_env())
    }

    /// Detect the profile from explicit inputs
    pub fn detect_from(env: &ColorEnv) -> Self {
        let term = env.term.to_lowercase();
        let colorterm = env.colorterm.to_lowercase();

        if env.no_color || term == "dumb" {
            return Self::Mono;
        }

        if colorterm.contains("truecolor") || colorterm.contains("24bit") || term.contains("direct") {
            Self::TrueColor
        } else if term.contains("256color") {
            Self::Ansi256
        } else {
            Self::Ansi16
        }
    }

    /// Raw number of colors the profile can show
    pub const fn color_tiers(self) -> u32 {
        match self {
            Self::Mono => 0,
            Self::Ansi16 => 16,
            Self::Ansi256 => 256,
            Self::TrueColor => TRUE_COLOR_TIERS,
        }
    }

    pub const fn supports_true_color(self) -> bool {
        self.color_tiers() >= TRUE_COLOR_TIERS
    }
}

// ============================================================================
// Shared Styles
// ============================================================================

/// Read-only styling context shared by everything the animation renders
#[derive(Clone, Debug, PartialEq)]
pub struct Styles {
    /// Style for placeholders that cycle forever when no gradient applies
    pub cycling_chars: Style,
    /// Color capability the styles were built for
    pub profile: ColorProfile,
}

impl Styles {
    /// Build styles suited to `profile`
    pub fn new(profile: ColorProfile) -> Self {
        let cycling_chars = match profile {
            ColorProfile::TrueColor => Style::default().fg(CYCLING_MAUVE),
            ColorProfile::Ansi256 => Style::default().fg(CYCLING_MAUVE_256),
            ColorProfile::Ansi16 => Style::default().fg(Color::Magenta),
            ColorProfile::Mono => Style::default(),
        };
        Self {
            cycling_chars,
            profile,
        }
    }

    /// Styles for the detected terminal
    pub fn detect() -> Self {
        Self::new(ColorProfile::detect())
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self::new(ColorProfile::Ansi16)
    }
}

// ============================================================================
// ANSI Output
// ============================================================================

/// Render a line as text with embedded SGR escape sequences
pub fn ansi_line(line: &Line<'_>) -> String {
    let mut out = String::new();
    for span in &line.spans {
        let style = line.style.patch(span.style);
        if style == Style::default() {
            out.push_str(&span.content);
            continue;
        }
        out.push_str(&content_style(style).apply(span.content.as_ref()).to_string());
    }
    out
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle {
        foreground_color: style.fg.map(crossterm_color),
        background_color: style.bg.map(crossterm_color),
        ..ContentStyle::default()
    };
    if style.add_modifier.contains(Modifier::BOLD) {
        content.attributes.set(Attribute::Bold);
    }
    if style.add_modifier.contains(Modifier::DIM) {
        content.attributes.set(Attribute::Dim);
    }
    if style.add_modifier.contains(Modifier::ITALIC) {
        content.attributes.set(Attribute::Italic);
    }
    content
}

fn crossterm_color(color: Color) -> CtColor {
    match color {
        Color::Reset => CtColor::Reset,
        Color::Black => CtColor::Black,
        Color::Red => CtColor::DarkRed,
        Color::Green => CtColor::DarkGreen,
        Color::Yellow => CtColor::DarkYellow,
        Color::Blue => CtColor::DarkBlue,
        Color::Magenta => CtColor::DarkMagenta,
        Color::Cyan => CtColor::DarkCyan,
        Color::Gray => CtColor::Grey,
        Color::DarkGray => CtColor::DarkGrey,
        Color::LightRed => CtColor::Red,
        Color::LightGreen => CtColor::Green,
        Color::LightYellow => CtColor::Yellow,
        Color::LightBlue => CtColor::Blue,
        Color::LightMagenta => CtColor::Magenta,
        Color::LightCyan => CtColor::Cyan,
        Color::White => CtColor::White,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
        Color::Indexed(i) => CtColor::AnsiValue(i),
    }
}
