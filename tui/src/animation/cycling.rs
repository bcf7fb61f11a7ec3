//! Cycling Characters Controller
//!
//! Owns the shared start instant and the row of [`CyclingChar`]s: a prefix of
//! placeholders that cycle forever, then one character per rune of the label.
//! Each primary tick recomputes every glyph; the first tick on which every
//! label character has settled kicks off the [`Ellipsis`].

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use super::ellipsis::Ellipsis;
use super::glyph::{CharState, CyclingChar};
use super::{Cmd, Msg};
use crate::theme::{
    self, gradient_ramp, Styles, GRADIENT_END, GRADIENT_START, MIN_GRADIENT_LEN, TRUE_COLOR_TIERS,
};

/// Primary cadence (~22fps)
pub const CHAR_CYCLING_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 22);

/// Upper bound on placeholder characters
pub const MAX_CYCLING_CHARS: usize = 120;

/// Pause between the label resolving and the first ellipsis frame
pub const ELLIPSIS_PAUSE: Duration = Duration::from_millis(220);

/// Separator placed between the placeholders and the label
const LABEL_GAP: char = ' ';

/// Initial delays are drawn as `0..INITIAL_DELAY_STEPS` units
const INITIAL_DELAY_STEPS: u32 = 8;
const INITIAL_DELAY_UNIT: Duration = Duration::from_millis(60);

/// Label lifetimes are drawn as `0..LIFETIME_STEPS` units
const LIFETIME_STEPS: u32 = 5;
const LIFETIME_UNIT: Duration = Duration::from_millis(180);

/// The cycling-characters animation
#[derive(Debug)]
pub struct CyclingChars {
    start: Instant,
    chars: Vec<CyclingChar>,
    /// One style per placeholder, only in truecolor with enough placeholders
    ramp: Vec<Style>,
    /// Label runes including the leading gap, if any
    label: Vec<char>,
    ellipsis: Ellipsis,
    ellipsis_started: bool,
    styles: Styles,
    rng: StdRng,
}

impl CyclingChars {
    /// Create the animation, starting its clock now
    ///
    /// `initial_chars` is clamped to [`MAX_CYCLING_CHARS`].
    pub fn new(initial_chars: usize, label: &str, styles: &Styles) -> Self {
        Self::with_rng(initial_chars, label, styles, StdRng::from_entropy())
    }

    /// Create the animation with an explicit random source
    pub fn with_rng(initial_chars: usize, label: &str, styles: &Styles, mut rng: StdRng) -> Self {
        let n = initial_chars.min(MAX_CYCLING_CHARS);

        let mut label_runes = Vec::with_capacity(label.chars().count() + 1);
        if n > 0 {
            label_runes.push(LABEL_GAP);
        }
        label_runes.extend(label.chars());

        // Gradient only when the terminal has enough color tiers to show it
        // and there are enough placeholders for the ramp to read as one.
        let gradient_capable = styles.profile.color_tiers() >= TRUE_COLOR_TIERS;
        let ramp = if n >= MIN_GRADIENT_LEN && gradient_capable {
            gradient_ramp(n, GRADIENT_START, GRADIENT_END)
                .into_iter()
                .map(|color| Style::default().fg(color.into()))
                .collect()
        } else {
            Vec::new()
        };

        let mut chars = Vec::with_capacity(n + label_runes.len());
        for _ in 0..n {
            chars.push(CyclingChar::forever(random_delay(
                &mut rng,
                INITIAL_DELAY_STEPS,
                INITIAL_DELAY_UNIT,
            )));
        }
        for &rune in &label_runes {
            let initial_delay = random_delay(&mut rng, INITIAL_DELAY_STEPS, INITIAL_DELAY_UNIT);
            let lifetime = random_delay(&mut rng, LIFETIME_STEPS, LIFETIME_UNIT);
            chars.push(CyclingChar::settling(rune, initial_delay, lifetime));
        }

        tracing::debug!(
            placeholders = n,
            requested = initial_chars,
            label_len = label_runes.len(),
            gradient = !ramp.is_empty(),
            "Created cycling chars"
        );

        Self {
            start: Instant::now(),
            chars,
            ramp,
            label: label_runes,
            ellipsis: Ellipsis::new(),
            ellipsis_started: false,
            styles: styles.clone(),
            rng,
        }
    }

    /// The first primary tick
    pub fn init(&self) -> Cmd {
        step_chars()
    }

    /// Handle a tick at the current instant
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update_at(msg, Instant::now())
    }

    /// Handle a tick as if it arrived at `now`
    ///
    /// A primary tick always schedules the next primary tick. On the tick
    /// where the label finishes resolving it also schedules the ellipsis.
    pub fn update_at(&mut self, msg: Msg, now: Instant) -> Option<Cmd> {
        match msg {
            Msg::StepChars => {
                for ch in &mut self.chars {
                    ch.step(self.start, now, &mut self.rng);
                }

                let mut ellipsis = None;
                if !self.ellipsis_started && self.label_resolved(now) {
                    self.ellipsis_started = true;
                    tracing::debug!(
                        elapsed_ms = now.saturating_duration_since(self.start).as_millis() as u64,
                        "Label resolved, starting ellipsis"
                    );
                    ellipsis = Some(Cmd::tick(ELLIPSIS_PAUSE, Msg::Ellipsis(self.ellipsis.tick())));
                }

                Cmd::batch([Some(step_chars()), ellipsis])
            }
            Msg::Ellipsis(tick) => self.ellipsis.update(tick),
        }
    }

    /// Whether every label character has reached end-of-life at `now`
    fn label_resolved(&self, now: Instant) -> bool {
        self.chars[self.placeholder_count()..]
            .iter()
            .all(|ch| ch.state(self.start, now) == CharState::EndOfLife)
    }

    /// Current frame as styled spans, ellipsis last
    pub fn line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.chars.len() + 1);
        for (i, ch) in self.chars.iter().enumerate() {
            let glyph = ch.current_value().to_string();
            let style = match self.ramp.get(i) {
                Some(style) => Some(*style),
                None if ch.cycles_forever() => Some(self.styles.cycling_chars),
                None => None,
            };
            spans.push(match style {
                Some(style) => Span::styled(glyph, style),
                None => Span::raw(glyph),
            });
        }
        spans.push(Span::raw(self.ellipsis.view()));
        Line::from(spans)
    }

    /// Current frame as text with embedded ANSI styling
    pub fn view(&self) -> String {
        theme::ansi_line(&self.line())
    }

    /// Current frame with styling stripped
    pub fn plain_text(&self) -> String {
        self.line()
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    pub fn chars(&self) -> &[CyclingChar] {
        &self.chars
    }

    /// Number of forever-cycling placeholders at the front of the row
    pub fn placeholder_count(&self) -> usize {
        self.chars.len() - self.label.len()
    }

    /// Label runes, including the leading gap when placeholders exist
    pub fn label(&self) -> &[char] {
        &self.label
    }

    /// Gradient styles bound to the placeholder positions
    pub fn ramp(&self) -> &[Style] {
        &self.ramp
    }

    pub fn ellipsis_started(&self) -> bool {
        self.ellipsis_started
    }

    /// Current ellipsis frame text
    pub fn ellipsis_view(&self) -> &'static str {
        self.ellipsis.view()
    }
}

impl Widget for &CyclingChars {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}

fn step_chars() -> Cmd {
    Cmd::tick(CHAR_CYCLING_INTERVAL, Msg::StepChars)
}

fn random_delay(rng: &mut impl Rng, steps: u32, unit: Duration) -> Duration {
    unit * rng.gen_range(0..steps)
}
