//! Resolver configuration
//!
//! Breakpoint and container sizes plus the dark-mode strategy. Values are
//! plain CSS lengths; the resolver builds the at-rule text around them.
//! Files are JSON and may name only the keys they override:
//!
//! ```json
//! { "breakpoints": { "md": "800px", "3xl": "1920px" }, "darkMode": "class" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tailwind's default responsive breakpoints.
pub const DEFAULT_BREAKPOINTS: &[(&str, &str)] = &[
    ("sm", "640px"),
    ("md", "768px"),
    ("lg", "1024px"),
    ("xl", "1280px"),
    ("2xl", "1536px"),
];

/// Tailwind's default container query sizes.
pub const DEFAULT_CONTAINERS: &[(&str, &str)] = &[
    ("3xs", "16rem"),
    ("2xs", "18rem"),
    ("xs", "20rem"),
    ("sm", "24rem"),
    ("md", "28rem"),
    ("lg", "32rem"),
    ("xl", "36rem"),
    ("2xl", "42rem"),
    ("3xl", "48rem"),
    ("4xl", "56rem"),
    ("5xl", "64rem"),
    ("6xl", "72rem"),
    ("7xl", "80rem"),
];

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON.
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        /// File that was requested, or `<inline>` for string input.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// How the `dark` variant is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DarkMode {
    /// `@media (prefers-color-scheme: dark)`
    #[default]
    Media,
    /// `.dark` ancestor class.
    Class,
}

/// Tunable vocabulary for [`crate::dispatch::resolver::ModifierResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Breakpoint name → minimum viewport width.
    pub breakpoints: IndexMap<String, String>,
    /// Container size name → minimum container width.
    pub containers: IndexMap<String, String>,
    /// Dark-mode strategy.
    pub dark_mode: DarkMode,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            breakpoints: to_map(DEFAULT_BREAKPOINTS),
            containers: to_map(DEFAULT_CONTAINERS),
            dark_mode: DarkMode::default(),
        }
    }
}

/// Partial file contents; each present map is merged over the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
struct ConfigOverrides {
    breakpoints: IndexMap<String, String>,
    containers: IndexMap<String, String>,
    dark_mode: Option<DarkMode>,
}

impl ResolverConfig {
    /// Parse JSON overrides and merge them over the defaults.
    ///
    /// Overridden keys keep their default position; new keys are appended.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `json` is not a valid config object.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Self::parse(json, Path::new("<inline>"))
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json, path)
    }

    fn parse(json: &str, path: &Path) -> Result<Self, ConfigError> {
        let overrides: ConfigOverrides =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::default();
        config.breakpoints.extend(overrides.breakpoints);
        config.containers.extend(overrides.containers);
        if let Some(dark_mode) = overrides.dark_mode {
            config.dark_mode = dark_mode;
        }
        Ok(config)
    }
}

fn to_map(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
    pairs
        .iter()
        .map(|&(name, size)| (name.to_string(), size.to_string()))
        .collect()
}
