// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types
//!
//! Missing groups, parents or neighbours are never errors: lookups return
//! `None`. These variants cover the faults a caller cannot route around.

use std::path::PathBuf;
use thiserror::Error;

/// Library result type
pub type Result<T, E = NavError> = std::result::Result<T, E>;

/// Errors raised by the store seam, sessions and settings
#[derive(Debug, Error)]
pub enum NavError {
    /// The store was dropped while a read was still waiting for a snapshot
    #[error("configuration store closed before a snapshot for {owner} was published")]
    StoreClosed {
        /// Owner key the read was waiting on
        owner: String,
    },

    /// No configuration is held for the owner
    #[error("no configuration loaded for {0}")]
    ConfigurationNotFound(String),

    /// Several configurations are loaded and none was chosen
    #[error("{0} configurations loaded, choose one with --owner")]
    AmbiguousOwner(usize),

    /// Owner key is not of the form `<type>/<id>`
    #[error("invalid owner key: {0}")]
    InvalidOwner(String),

    /// Session or import file could not be read or written
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON
    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Malformed TOML
    #[error("invalid TOML in {}: {source}", .path.display())]
    Toml {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Imported group tree uses a group id more than once
    #[error("duplicate group id {group_id} in {}", .path.display())]
    DuplicateGroupId {
        /// File involved
        path: PathBuf,
        /// Repeated id
        group_id: String,
    },

    /// Import file extension is neither `.json` nor `.toml`
    #[error("unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Settings could not be layered or deserialized
    #[error("settings error: {0}")]
    Config(#[from] config::ConfigError),
}
