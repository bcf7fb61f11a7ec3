//! Cycling Chars - loading animation for text terminals
//!
//! A row of characters flickers through a random alphabet before settling
//! into a label, then an ellipsis starts ticking to show that work is still
//! in progress.
//!
//! # Architecture
//!
//! - **Animation**: per-character lifecycles derived from a shared clock,
//!   the controller that steps them, and the ellipsis sub-animation
//! - **Theme**: brand gradient, color-capability detection, ANSI output
//! - **Config**: TOML file, environment and CLI overrides
//! - **App**: host event loop that fires the animation's scheduled ticks

pub mod animation;
pub mod app;
pub mod config;
pub mod theme;

pub use animation::{Cmd, CyclingChars, Msg};
pub use app::App;
pub use theme::Styles;
