//! TOML Configuration File Support
//!
//! Loads the animation settings from `~/.config/cycling-chars/config.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (`CYCLING_CHARS_*`)
//! 3. TOML configuration file
//! 4. Default values
//!
//! The binary's argument parser reads both CLI flags and environment
//! variables and hands them over as [`ConfigOverrides`].
//!
//! # Example Configuration
//!
//! ```toml
//! [animation]
//! placeholder_count = 16
//! label = "Thinking"
//!
//! [display]
//! color = "auto"   # auto | truecolor | ansi256 | ansi16 | none
//! ```

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::ColorProfile;

/// Placeholder count used when nothing else is configured
pub const DEFAULT_PLACEHOLDER_COUNT: usize = 12;

/// Label used when nothing else is configured
pub const DEFAULT_LABEL: &str = "Generating";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML, including unknown color modes
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// Color Mode
// =============================================================================

/// How to pick the terminal color profile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Detect from the environment
    #[default]
    Auto,
    /// 24-bit RGB
    #[serde(alias = "24bit")]
    #[value(name = "truecolor", alias = "24bit")]
    TrueColor,
    /// 256-color palette
    #[serde(alias = "256")]
    #[value(name = "ansi256", alias = "256")]
    Ansi256,
    /// 16 standard colors
    #[serde(alias = "16")]
    #[value(name = "ansi16", alias = "16")]
    Ansi16,
    /// No color at all
    #[serde(alias = "mono", alias = "off")]
    #[value(aliases = ["mono", "off"])]
    None,
}

impl ColorMode {
    /// Resolve to a concrete profile, detecting when set to `Auto`
    pub fn resolve(self) -> ColorProfile {
        match self {
            Self::Auto => ColorProfile::detect(),
            Self::TrueColor => ColorProfile::TrueColor,
            Self::Ansi256 => ColorProfile::Ansi256,
            Self::Ansi16 => ColorProfile::Ansi16,
            Self::None => ColorProfile::Mono,
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Animation section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationToml {
    /// Number of forever-cycling placeholder characters
    pub placeholder_count: Option<usize>,

    /// Label the animation resolves to
    pub label: Option<String>,
}

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Color mode: auto, truecolor, ansi256, ansi16 or none
    pub color: Option<ColorMode>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigToml {
    /// Animation configuration section
    pub animation: AnimationToml,

    /// Display configuration section
    pub display: DisplayToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved animation configuration
#[derive(Clone, Debug)]
pub struct AnimationConfig {
    /// Requested placeholder count (the animation clamps it)
    pub placeholder_count: usize,

    /// Label the animation resolves to
    pub label: String,

    /// Color mode
    pub color: ColorMode,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    pub(crate) source: ConfigSource,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            placeholder_count: DEFAULT_PLACEHOLDER_COUNT,
            label: DEFAULT_LABEL.to_string(),
            color: ColorMode::Auto,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl AnimationConfig {
    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/cycling-chars/config.toml` or
/// `~/.config/cycling-chars/config.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("cycling-chars").join("config.toml"))
}

/// Load configuration from a specific path
///
/// Environment variables and CLI flags are layered on top afterwards through
/// [`ConfigOverrides`].
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed.
/// A missing config file is not an error (defaults are used).
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<AnimationConfig, ConfigError> {
    let mut config = AnimationConfig::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: ConfigToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut AnimationConfig, toml: &ConfigToml) {
    if let Some(count) = toml.animation.placeholder_count {
        config.placeholder_count = count;
    }
    if let Some(ref label) = toml.animation.label {
        config.label = label.clone();
    }
    if let Some(color) = toml.display.color {
        config.color = color;
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI and environment overrides to configuration
///
/// Use this after [`load_config_from_path`] to apply the overrides.
#[derive(Clone, Debug)]
pub struct ConfigOverrides {
    /// Config file path override
    pub config_path: Option<PathBuf>,

    /// Placeholder count override
    pub placeholder_count: Option<usize>,

    /// Label override
    pub label: Option<String>,

    /// Color mode override
    pub color: Option<ColorMode>,

    /// Where the overrides came from
    pub source: ConfigSource,
}

impl Default for ConfigOverrides {
    fn default() -> Self {
        Self {
            config_path: None,
            placeholder_count: None,
            label: None,
            color: None,
            source: ConfigSource::Cli,
        }
    }
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set placeholder count override
    #[must_use]
    pub fn with_placeholder_count(mut self, count: usize) -> Self {
        self.placeholder_count = Some(count);
        self
    }

    /// Set label override
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set color mode override
    #[must_use]
    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = Some(color);
        self
    }

    /// Set config file path override
    #[must_use]
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Record where the overrides came from (CLI unless set)
    #[must_use]
    pub fn with_source(mut self, source: ConfigSource) -> Self {
        self.source = source;
        self
    }

    /// Config file to load: the override if given, otherwise the default
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config_path.clone().or_else(default_config_path)
    }

    /// Apply overrides to a configuration
    pub fn apply(&self, config: &mut AnimationConfig) {
        if self.placeholder_count.is_some() || self.label.is_some() || self.color.is_some() {
            config.source = self.source;
        }

        if let Some(count) = self.placeholder_count {
            config.placeholder_count = count;
        }
        if let Some(ref label) = self.label {
            config.label = label.clone();
        }
        if let Some(color) = self.color {
            config.color = color;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn load(file: &NamedTempFile) -> Result<AnimationConfig, ConfigError> {
        load_config_from_path(Some(file.path().to_path_buf()))
    }

    #[test]
    fn test_default_config() {
        let config = AnimationConfig::default();

        assert_eq!(config.placeholder_count, DEFAULT_PLACEHOLDER_COUNT);
        assert_eq!(config.label, DEFAULT_LABEL);
        assert_eq!(config.color, ColorMode::Auto);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/cycling-chars/config.toml");
        let config = load_config_from_path(Some(path)).unwrap();

        assert_eq!(config.source(), ConfigSource::Default);
        assert!(config.config_file_path.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [animation]
            placeholder_count = 30
            label = "Thinking"

            [display]
            color = "truecolor"
            "#,
        );

        let config = load(&file).unwrap();
        assert_eq!(config.placeholder_count, 30);
        assert_eq!(config.label, "Thinking");
        assert_eq!(config.color, ColorMode::TrueColor);
        assert_eq!(config.source(), ConfigSource::File);
        assert_eq!(config.config_file_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config("[animation]\nlabel = \"Hmm\"\n");

        let config = load(&file).unwrap();
        assert_eq!(config.label, "Hmm");
        assert_eq!(config.placeholder_count, DEFAULT_PLACEHOLDER_COUNT);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let file = write_config("[animation\nlabel = ");

        let err = load(&file).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_unknown_color_in_file_is_parse_error_with_location() {
        let file = write_config("[display]\ncolor = \"sepia\"\n");

        let err = load(&file).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        let message = err.to_string();
        assert!(message.contains("sepia"), "{message}");
        assert!(message.contains("line 2"), "{message}");
    }

    #[test]
    fn test_color_aliases_in_file() {
        for (value, expected) in [
            ("auto", ColorMode::Auto),
            ("24bit", ColorMode::TrueColor),
            ("ansi256", ColorMode::Ansi256),
            ("16", ColorMode::Ansi16),
            ("mono", ColorMode::None),
            ("off", ColorMode::None),
        ] {
            let file = write_config(&format!("[display]\ncolor = \"{value}\"\n"));
            assert_eq!(load(&file).unwrap().color, expected, "color = {value}");
        }
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AnimationConfig::default();
        ConfigOverrides::new()
            .with_placeholder_count(500)
            .with_label("Go")
            .with_color(ColorMode::Ansi256)
            .apply(&mut config);

        assert_eq!(config.placeholder_count, 500);
        assert_eq!(config.label, "Go");
        assert_eq!(config.color, ColorMode::Ansi256);
        assert_eq!(config.source(), ConfigSource::Cli);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config("[animation]\nplaceholder_count = 30\nlabel = \"File\"\n");
        let mut config = load(&file).unwrap();

        ConfigOverrides::new()
            .with_label("Env")
            .with_source(ConfigSource::Env)
            .apply(&mut config);

        assert_eq!(config.placeholder_count, 30);
        assert_eq!(config.label, "Env");
        assert_eq!(config.source(), ConfigSource::Env);
    }

    #[test]
    fn test_empty_overrides_keep_source() {
        let mut config = AnimationConfig::default();
        ConfigOverrides::new().apply(&mut config);
        assert_eq!(config.source(), ConfigSource::Default);
    }

    #[test]
    fn test_explicit_modes_resolve_without_detection() {
        assert_eq!(ColorMode::TrueColor.resolve(), ColorProfile::TrueColor);
        assert_eq!(ColorMode::None.resolve(), ColorProfile::Mono);
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::Cli.to_string(), "CLI");
        assert_eq!(ConfigSource::Env.to_string(), "environment");
        assert_eq!(ConfigSource::File.to_string(), "config file");
    }
}
