//! Cycling Characters Animation
//!
//! A row of glyphs that flicker through a random alphabet before settling
//! into a label, followed by an animated ellipsis once the label resolves.
//!
//! # Design
//!
//! The animation never sleeps or spawns anything. The host delivers [`Msg`]
//! ticks, the controller answers with [`Cmd`] values describing the next
//! ticks to schedule, and the host decides when to fire them. Every glyph's
//! state is derived from `(start, now)`, so a late or skipped tick never
//! desynchronises the row.
//!
//! ```text
//! host timer ──Msg::StepChars──▶ CyclingChars::update ──Cmd──▶ host timer
//!                                      │
//!                                      └─(label resolved)─▶ Ellipsis ticks
//! ```

mod cycling;
mod ellipsis;
mod glyph;

use std::time::Duration;

pub use cycling::{CyclingChars, CHAR_CYCLING_INTERVAL, ELLIPSIS_PAUSE, MAX_CYCLING_CHARS};
pub use ellipsis::{Ellipsis, EllipsisTick, ELLIPSIS_FRAMES, ELLIPSIS_INTERVAL};
pub use glyph::{CharState, CyclingChar, CHAR_RUNES, INITIAL_GLYPH};

/// Tick messages understood by the animation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
    /// Primary cadence: recompute every glyph
    StepChars,
    /// Ellipsis sub-animation cadence
    Ellipsis(EllipsisTick),
}

/// A scheduled follow-up returned to the host
///
/// Commands are plain data. The host owns the clock and is responsible for
/// delivering `msg` back to the animation once `after` has elapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cmd {
    /// Deliver `msg` after `after`
    Tick { after: Duration, msg: Msg },
    /// Several commands issued together
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Schedule a single message
    #[must_use]
    pub fn tick(after: Duration, msg: Msg) -> Self {
        Self::Tick { after, msg }
    }

    /// Combine optional commands, dropping the empty ones
    ///
    /// Returns `None` when nothing is left and the bare command when only one
    /// remains.
    pub fn batch(cmds: impl IntoIterator<Item = Option<Cmd>>) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = cmds.into_iter().flatten().collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Self::Batch(cmds)),
        }
    }

    /// Flatten into `(delay, message)` pairs in issue order
    pub fn into_ticks(self) -> Vec<(Duration, Msg)> {
        match self {
            Self::Tick { after, msg } => vec![(after, msg)],
            Self::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_ticks).collect(),
        }
    }
}
