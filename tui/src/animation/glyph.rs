//! Cycling Character
//!
//! A single animated glyph. Its state is never stored: it is recomputed from
//! the shared start instant and the current instant on every tick.

use std::time::{Duration, Instant};

use rand::Rng;

/// Alphabet that cycling glyphs are drawn from
pub const CHAR_RUNES: [char; 40] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', //
    'a', 'b', 'c', 'd', 'e', 'f', //
    'A', 'B', 'C', 'D', 'E', 'F', //
    '~', '!', '@', '#', '$', '£', '€', '%', '^', '&', '*', '(', ')', '+', '=', '_', '-', '?',
];

/// Glyph shown while a character waits for its initial delay
pub const INITIAL_GLYPH: char = '.';

/// Lifecycle state of a single character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharState {
    /// Still inside the initial delay
    Initial,
    /// Showing a random glyph every tick
    Cycling,
    /// Settled on its final glyph for good
    EndOfLife,
}

/// A single animated character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CyclingChar {
    /// `None` cycles forever
    final_value: Option<char>,
    current_value: char,
    initial_delay: Duration,
    lifetime: Duration,
}

impl CyclingChar {
    /// A placeholder that never settles
    pub fn forever(initial_delay: Duration) -> Self {
        Self {
            final_value: None,
            current_value: INITIAL_GLYPH,
            initial_delay,
            lifetime: Duration::ZERO,
        }
    }

    /// A label character that settles on `final_value`
    pub fn settling(final_value: char, initial_delay: Duration, lifetime: Duration) -> Self {
        Self {
            final_value: Some(final_value),
            current_value: INITIAL_GLYPH,
            initial_delay,
            lifetime,
        }
    }

    /// Derive the state at `now` for an animation that began at `start`
    ///
    /// Only the initial delay gates the move to end-of-life. The lifetime is
    /// kept on the character but does not postpone settling.
    pub fn state(&self, start: Instant, now: Instant) -> CharState {
        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.initial_delay {
            return CharState::Initial;
        }
        if self.final_value.is_some() && elapsed > self.initial_delay {
            return CharState::EndOfLife;
        }
        CharState::Cycling
    }

    /// Recompute the displayed glyph and return the state it was derived from
    pub fn step<R: Rng + ?Sized>(&mut self, start: Instant, now: Instant, rng: &mut R) -> CharState {
        let state = self.state(start, now);
        self.current_value = match state {
            CharState::Initial => INITIAL_GLYPH,
            CharState::Cycling => random_rune(rng),
            CharState::EndOfLife => self.final_value.unwrap_or(self.current_value),
        };
        state
    }

    /// Glyph currently on screen
    pub fn current_value(&self) -> char {
        self.current_value
    }

    /// Glyph this character settles on, if any
    pub fn final_value(&self) -> Option<char> {
        self.final_value
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Whether this is a placeholder that never settles
    pub fn cycles_forever(&self) -> bool {
        self.final_value.is_none()
    }
}

fn random_rune<R: Rng + ?Sized>(rng: &mut R) -> char {
    CHAR_RUNES[rng.gen_range(0..CHAR_RUNES.len())]
}
