//! Engine configuration.
//!
//! Everything here has a sensible default; a config file only needs the
//! keys it wants to change.
//!
//! ```yaml
//! viewport:
//!   width: 390
//!   height: 844
//! suggestions:
//!   maxSuggestions: 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::result::{ApuntarError, ApuntarResult};
use crate::suggestions::SuggestionOptions;

/// Reference viewport width in points
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 430.0;

/// Reference viewport height in points
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 932.0;

/// Screen area used by the off-screen check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in points
    pub width: f64,
    /// Height in points
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

impl Viewport {
    /// Create a viewport
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse `"WIDTHxHEIGHT"`, e.g. `"390x844"`
    pub fn parse(value: &str) -> ApuntarResult<Self> {
        let (w, h) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| ApuntarError::config(format!("viewport must be WIDTHxHEIGHT, got '{value}'")))?;
        let dim = |s: &str| {
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v > 0.0)
                .ok_or_else(|| ApuntarError::config(format!("invalid viewport dimension '{s}'")))
        };
        Ok(Self::new(dim(w)?, dim(h)?))
    }
}

/// Configuration shared by the checker, ranker and orchestrator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Reference viewport for off-screen detection
    pub viewport: Viewport,
    /// Suggestion ranking limits
    pub suggestions: SuggestionOptions,
}

impl EngineConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport
    #[must_use]
    pub const fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Set the suggestion options
    #[must_use]
    pub const fn with_suggestions(mut self, suggestions: SuggestionOptions) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Parse YAML configuration
    pub fn from_yaml_str(yaml: &str) -> ApuntarResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse JSON configuration
    pub fn from_json_str(json: &str) -> ApuntarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> ApuntarResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
            other => {
                return Err(ApuntarError::config(format!(
                    "unsupported config extension {:?} for {}",
                    other.unwrap_or(""),
                    path.display()
                )))
            }
        };
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }
}
