//! Configuration for a sweep.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional YAML file, and command-line overrides.
//!
//! ```yaml
//! max_generations: 4
//! max_age: 110
//! current_year: 2024      # omit to use today's year
//! unknown_members: skip   # or: error
//! ```

use std::path::Path;

use chrono::Datelike;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::UnknownMemberPolicy;
use crate::liveness::Thresholds;

/// Anyone with more than this many generations of descendants is not living.
pub const DEFAULT_MAX_GENERATIONS: u32 = 4;

/// Anyone born more than this many years ago is not living.
pub const DEFAULT_MAX_AGE: i32 = 110;

/// Sweep configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Generation count above which a person is marked not living
    pub max_generations: u32,
    /// Age in years above which a person is marked not living
    pub max_age: i32,
    /// Year to measure ages against; `None` means the current calendar year
    pub current_year: Option<i32>,
    /// How to treat family members whose ids were never loaded
    pub unknown_members: UnknownMemberPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_generations: DEFAULT_MAX_GENERATIONS,
            max_age: DEFAULT_MAX_AGE,
            current_year: None,
            unknown_members: UnknownMemberPolicy::default(),
        }
    }
}

/// Values given on the command line. `None` keeps the lower layer's value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    /// `--max-generations`
    pub max_generations: Option<u32>,
    /// `--max-age`
    pub max_age: Option<i32>,
    /// `--year`
    pub current_year: Option<i32>,
    /// `--unknown-members`
    pub unknown_members: Option<UnknownMemberPolicy>,
}

impl Config {
    /// Defaults, then `path` if given.
    ///
    /// # Errors
    ///
    /// I/O errors reading the file, YAML errors parsing it, or a failed
    /// [`validate`](Self::validate).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                debug!(path = %path.display(), "Loaded config file");
                Self::from_yaml(&text)?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`Error::Yaml`] on malformed input or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(value) = overrides.max_generations {
            self.max_generations = value;
        }
        if let Some(value) = overrides.max_age {
            self.max_age = value;
        }
        if let Some(value) = overrides.current_year {
            self.current_year = Some(value);
        }
        if let Some(value) = overrides.unknown_members {
            self.unknown_members = value;
        }
        self
    }

    /// Reject values the classifier cannot use.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if `max_age` is negative.
    pub fn validate(&self) -> Result<()> {
        if self.max_age < 0 {
            return Err(Error::Config(format!(
                "max_age must not be negative, got {}",
                self.max_age
            )));
        }
        Ok(())
    }

    /// The thresholds for this run, resolving the current year if unset.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            max_generations: self.max_generations,
            max_age: self.max_age,
            current_year: self
                .current_year
                .unwrap_or_else(|| chrono::Local::now().year()),
        }
    }
}
