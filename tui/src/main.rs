//! Cycling Chars Entry Point
//!
//! Shows the cycling-characters animation on a single terminal line until a
//! quit key is pressed.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults
//! cycling-chars
//!
//! # Longer placeholder run and a custom label
//! cycling-chars --count 40 --label Thinking
//!
//! # Force 256 colors
//! CYCLING_CHARS_COLOR=ansi256 cycling-chars
//!
//! # Verbose logging (stderr)
//! RUST_LOG=debug cycling-chars
//! ```
//!
//! Press `q`, `Esc` or `Ctrl-C` to stop.

use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::{Terminal, TerminalOptions, Viewport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cycling_chars::config::{load_config_from_path, ColorMode, ConfigOverrides, ConfigSource};
use cycling_chars::theme::{ansi_line, gradient_text};
use cycling_chars::App;

/// Cycling-characters loading animation for text terminals
#[derive(Parser, Debug)]
#[command(name = "cycling-chars")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Placeholder characters before the label (max 120)
    #[arg(short = 'n', long, env = "CYCLING_CHARS_COUNT", value_name = "N")]
    count: Option<usize>,

    /// Label the animation resolves to
    #[arg(short = 'l', long, env = "CYCLING_CHARS_LABEL", value_name = "TEXT")]
    label: Option<String>,

    /// Color mode
    #[arg(long, env = "CYCLING_CHARS_COLOR", value_enum, ignore_case = true, value_name = "MODE")]
    color: Option<ColorMode>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "CYCLING_CHARS_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Convert into config overrides, noting whether any value came from the
    /// command line or only from the environment
    fn into_overrides(self, matches: &ArgMatches) -> ConfigOverrides {
        let from_cli = ["count", "label", "color"]
            .iter()
            .any(|id| matches.value_source(id) == Some(ValueSource::CommandLine));

        ConfigOverrides {
            config_path: self.config,
            placeholder_count: self.count,
            label: self.label,
            color: self.color,
            source: if from_cli { ConfigSource::Cli } else { ConfigSource::Env },
        }
    }
}

/// Parse arguments (and `CYCLING_CHARS_*` variables) into config overrides
fn parse_overrides<I, T>(argv: I) -> Result<ConfigOverrides, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Args::command().try_get_matches_from(argv)?;
    let args = Args::from_arg_matches(&matches)?;
    Ok(args.into_overrides(&matches))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let overrides = parse_overrides(std::env::args_os()).unwrap_or_else(|e| e.exit());

    // Logs go to stderr so they never land inside the animation line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(EnvFilter::from_default_env())
        .init();

    let mut config = load_config_from_path(overrides.config_path())?;
    overrides.apply(&mut config);
    tracing::debug!(source = %config.source(), ?config, "Configuration resolved");

    // Nothing to animate without a terminal: just print the label
    if !io::stdout().is_terminal() {
        println!("{}", config.label);
        return Ok(());
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(1),
        },
    )?;

    let mut app = App::new(&config);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    result?;

    if app.styles().profile.supports_true_color() {
        println!("{}", ansi_line(&gradient_text(Style::default(), &config.label)));
    } else {
        println!("{}", config.label);
    }

    Ok(())
}
