//! Main Application
//!
//! The App hosts the animation inside a one-line inline viewport:
//! - Timer queue that fires the animation's scheduled ticks
//! - Event loop (keyboard)
//! - Drawing after every handled message
//!
//! The animation itself never touches the clock or the terminal; everything
//! time-related goes through [`TimerQueue`].

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::animation::{Cmd, CyclingChars, Msg};
use crate::config::AnimationConfig;
use crate::theme::Styles;

/// How long to wait for input when no tick is pending
const IDLE_WAIT: Duration = Duration::from_secs(1);

/// Pending ticks ordered by deadline
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(Instant, Msg)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue every tick in `cmd`, relative to `now`
    pub fn schedule(&mut self, cmd: Cmd, now: Instant) {
        for (after, msg) in cmd.into_ticks() {
            self.pending.push((now + after, msg));
        }
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return every message due at `now`, earliest first
    pub fn drain_due(&mut self, now: Instant) -> Vec<Msg> {
        let mut due: Vec<(Instant, Msg)> = Vec::new();
        self.pending.retain(|&(deadline, msg)| {
            if deadline <= now {
                due.push((deadline, msg));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, msg)| msg).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// The animation being shown
    animation: CyclingChars,
    /// Ticks waiting to fire
    timers: TimerQueue,
    /// Styles the animation was built with
    styles: Styles,
}

impl App {
    /// Create a new App from resolved configuration
    pub fn new(config: &AnimationConfig) -> Self {
        let styles = Styles::new(config.color.resolve());
        tracing::debug!(profile = ?styles.profile, "Resolved color profile");

        Self {
            running: true,
            animation: CyclingChars::new(config.placeholder_count, &config.label, &styles),
            timers: TimerQueue::new(),
            styles,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        self.timers.schedule(self.animation.init(), Instant::now());
        self.render(terminal)?;

        while self.running {
            let deadline = self
                .timers
                .next_deadline()
                .unwrap_or_else(|| Instant::now() + IDLE_WAIT);

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    match maybe_event {
                        // Only handle Press events (not Release or Repeat)
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.handle_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => self.running = false,
                    }
                }

                _ = tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)) => {
                    self.fire_due(Instant::now());
                }
            }

            self.render(terminal)?;
        }

        Ok(())
    }

    /// Deliver every due tick to the animation and enqueue what it asks for
    pub fn fire_due(&mut self, now: Instant) {
        for msg in self.timers.drain_due(now) {
            if let Some(cmd) = self.animation.update_at(msg, now) {
                self.timers.schedule(cmd, now);
            }
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            _ => {}
        }
    }

    fn render(&self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(&self.animation, frame.area()))?;
        Ok(())
    }

    pub fn animation(&self) -> &CyclingChars {
        &self.animation
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
