// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional settings file,
//! then `CONFIGURATOR_NAV__*` environment variables.

use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment prefix for overrides (`CONFIGURATOR_NAV__LOG_LEVEL=debug`)
pub const ENV_PREFIX: &str = "CONFIGURATOR_NAV";

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding the persisted session
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Mark the group being left as visited when navigating with `goto`
    pub mark_visited: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: directories::ProjectDirs::from("com", "hyperpolymath", "configurator-nav")
                .map(|d| d.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".configurator-nav")),
            log_level: "info".to_string(),
            mark_visited: true,
        }
    }
}

impl Settings {
    /// Parse `log_level` into a tracing level, defaulting to INFO
    #[must_use]
    pub fn level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// Load settings from defaults, an optional file and the environment
///
/// # Errors
/// Fails when the given file is missing or a value has the wrong type.
pub fn load(path: Option<&Path>) -> Result<Settings> {
    let defaults = Settings::default();

    let mut builder = Config::builder()
        .set_default("data_dir", defaults.data_dir.to_string_lossy().into_owned())?
        .set_default("log_level", defaults.log_level)?
        .set_default("mark_visited", defaults.mark_visited)?;

    if let Some(path) = path {
        debug!("Loading settings from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;

    Ok(settings)
}
