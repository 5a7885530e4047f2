//! CLI configuration

use apuntar::{EngineConfig, SuggestionOptions, Viewport};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - engine decisions
    Debug,
    /// Trace - everything
    Trace,
}

impl Verbosity {
    /// Map `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug | Self::Trace)
    }

    /// Tracing level installed for this verbosity
    #[must_use]
    pub const fn log_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => console::Term::stdout().features().colors_supported(),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Engine configuration after file and flag overrides
    pub engine: EngineConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set engine configuration
    #[must_use]
    pub const fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Load engine configuration from a file
    pub fn with_engine_file(self, path: &Path) -> CliResult<Self> {
        let engine = EngineConfig::load(path)
            .map_err(|e| CliError::config(format!("{}: {e}", path.display())))?;
        Ok(self.with_engine(engine))
    }

    /// Override the viewport from a `WIDTHxHEIGHT` flag
    pub fn with_viewport_flag(mut self, value: &str) -> CliResult<Self> {
        self.engine.viewport =
            Viewport::parse(value).map_err(|e| CliError::invalid_argument(e.to_string()))?;
        Ok(self)
    }

    /// Override suggestion limits from flags
    #[must_use]
    pub fn with_suggestion_overrides(mut self, max: Option<usize>, min_similarity: Option<u8>) -> Self {
        let mut options: SuggestionOptions = self.engine.suggestions;
        if let Some(max) = max {
            options = options.with_max_suggestions(max);
        }
        if let Some(min) = min_similarity {
            options = options.with_min_similarity(min);
        }
        self.engine.suggestions = options;
        self
    }
}
