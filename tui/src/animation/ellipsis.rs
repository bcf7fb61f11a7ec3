//! Ellipsis Spinner
//!
//! The small "", ".", "..", "..." indicator that trails the label once it has
//! resolved.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::{Cmd, Msg};

/// Frames shown in order, looping
pub const ELLIPSIS_FRAMES: [&str; 4] = ["", ".", "..", "..."];

/// Time between ellipsis frames (~3fps)
pub const ELLIPSIS_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 3);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Tick addressed to one spinner instance
///
/// `tag` pins the tick to one position in the spinner's tick chain, so a
/// duplicated or stale tick is dropped instead of speeding the spinner up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EllipsisTick {
    id: u64,
    tag: u64,
}

/// Ellipsis spinner state
#[derive(Debug)]
pub struct Ellipsis {
    id: u64,
    tag: u64,
    frame: usize,
}

impl Ellipsis {
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            frame: 0,
        }
    }

    /// The tick that advances this spinner from its current frame
    pub fn tick(&self) -> EllipsisTick {
        EllipsisTick {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Advance one frame if the tick belongs to this spinner
    ///
    /// Returns the next tick to schedule, or `None` when the tick was not
    /// ours.
    pub fn update(&mut self, tick: EllipsisTick) -> Option<Cmd> {
        if tick.id != self.id || tick.tag != self.tag {
            return None;
        }

        self.frame = (self.frame + 1) % ELLIPSIS_FRAMES.len();
        self.tag += 1;

        Some(Cmd::tick(ELLIPSIS_INTERVAL, Msg::Ellipsis(self.tick())))
    }

    /// Current frame text
    pub fn view(&self) -> &'static str {
        ELLIPSIS_FRAMES[self.frame]
    }
}

impl Default for Ellipsis {
    fn default() -> Self {
        Self::new()
    }
}
