// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Persisted configurations between CLI invocations

use crate::error::{NavError, Result};
use crate::store::MemoryStore;
use crate::types::{Configuration, Owner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the session file inside the data directory
pub const SESSION_FILE: &str = "session.json";

/// Contents of `session.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    /// When the session was last written
    pub saved_at: DateTime<Utc>,
    /// All held configurations
    #[serde(default)]
    pub configurations: Vec<Configuration>,
}

impl Default for SessionFile {
    fn default() -> Self {
        Self {
            saved_at: Utc::now(),
            configurations: Vec::new(),
        }
    }
}

impl SessionFile {
    /// Load the session from a data directory, empty if none was saved yet
    ///
    /// # Errors
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SESSION_FILE);
        if !path.exists() {
            debug!("No session at {}, starting empty", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|source| NavError::Io {
            path: path.clone(),
            source,
        })?;
        let mut session: Self =
            serde_json::from_str(&content).map_err(|source| NavError::Json { path, source })?;
        session.configurations = session
            .configurations
            .into_iter()
            .map(Configuration::with_flat_groups)
            .collect();
        Ok(session)
    }

    /// Write the session to a data directory
    ///
    /// # Errors
    /// Fails when the directory or file cannot be written.
    pub fn save(&mut self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|source| NavError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        self.saved_at = Utc::now();
        let path = dir.join(SESSION_FILE);
        let json = serde_json::to_string_pretty(self).map_err(|source| NavError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| NavError::Io { path, source })?;
        Ok(())
    }

    /// Snapshot every configuration of a store
    #[must_use]
    pub fn from_store(store: &MemoryStore) -> Self {
        Self {
            saved_at: Utc::now(),
            configurations: store
                .configurations()
                .iter()
                .map(|c| Configuration::clone(c))
                .collect(),
        }
    }

    /// Move the configurations into a fresh store
    #[must_use]
    pub fn into_store(self) -> MemoryStore {
        MemoryStore::with_configurations(self.configurations)
    }

    /// Add or replace the configuration of its owner
    pub fn upsert(&mut self, configuration: Configuration) {
        if let Some(existing) = self
            .configurations
            .iter_mut()
            .find(|c| c.owner == configuration.owner)
        {
            info!(owner = %configuration.owner, "Replacing configuration");
            *existing = configuration;
        } else {
            self.configurations.push(configuration);
        }
    }

    /// Pick the owner to work on: the given key, or the only configuration held
    ///
    /// # Errors
    /// Fails when the key is malformed or unknown, or when no key is given
    /// and the session holds zero or several configurations.
    pub fn resolve_owner(&self, key: Option<&str>) -> Result<Owner> {
        match key {
            Some(key) => {
                let owner =
                    Owner::from_key(key).ok_or_else(|| NavError::InvalidOwner(key.to_owned()))?;
                if self.configurations.iter().any(|c| c.owner == owner) {
                    Ok(owner)
                } else {
                    Err(NavError::ConfigurationNotFound(key.to_owned()))
                }
            }
            None => match self.configurations.as_slice() {
                [only] => Ok(only.owner.clone()),
                [] => Err(NavError::ConfigurationNotFound("any owner".into())),
                many => Err(NavError::AmbiguousOwner(many.len())),
            },
        }
    }
}

/// Read a configuration from a `.json` or `.toml` file
///
/// Missing flat groups are derived from the group tree.
///
/// # Errors
/// Fails on unreadable files, malformed content, other extensions or a
/// group id used twice.
pub fn import_configuration(path: &Path) -> Result<Configuration> {
    let content = fs::read_to_string(path).map_err(|source| NavError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let configuration: Configuration = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|source| NavError::Json {
            path: path.to_path_buf(),
            source,
        })?,
        Some("toml") => toml::from_str(&content).map_err(|source| NavError::Toml {
            path: path.to_path_buf(),
            source,
        })?,
        _ => return Err(NavError::UnsupportedFormat(PathBuf::from(path))),
    };

    if let Some(group_id) = configuration.duplicate_group_id() {
        return Err(NavError::DuplicateGroupId {
            path: path.to_path_buf(),
            group_id: group_id.to_owned(),
        });
    }

    Ok(configuration.with_flat_groups())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Group, OwnerType};
    use tempfile::TempDir;

    fn make_configuration(id: &str) -> Configuration {
        Configuration::new(
            Owner::product(id),
            vec![Group::new("a", "A").with_sub_groups(vec![Group::new("a1", "A1")])],
        )
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut session = SessionFile::default();
        session.upsert(make_configuration("P1"));
        session.save(dir.path()).unwrap();

        let loaded = SessionFile::load(dir.path()).unwrap();
        assert_eq!(loaded.configurations, session.configurations);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(SessionFile::load(dir.path()).unwrap().configurations.is_empty());
    }

    #[test]
    fn test_upsert_replaces_same_owner() {
        let mut session = SessionFile::default();
        session.upsert(make_configuration("P1"));
        let mut replacement = make_configuration("P1");
        replacement.config_id = "v2".into();
        session.upsert(replacement);

        assert_eq!(session.configurations.len(), 1);
        assert_eq!(session.configurations[0].config_id, "v2");
    }

    #[test]
    fn test_resolve_owner() {
        let mut session = SessionFile::default();
        assert!(matches!(
            session.resolve_owner(None),
            Err(NavError::ConfigurationNotFound(_))
        ));

        session.upsert(make_configuration("P1"));
        assert_eq!(session.resolve_owner(None).unwrap(), Owner::product("P1"));

        session.upsert(make_configuration("P2"));
        assert!(matches!(session.resolve_owner(None), Err(NavError::AmbiguousOwner(2))));
        assert_eq!(
            session.resolve_owner(Some("product/P2")).unwrap().owner_type,
            OwnerType::Product
        );
        assert!(matches!(
            session.resolve_owner(Some("bogus")),
            Err(NavError::InvalidOwner(_))
        ));
        assert!(matches!(
            session.resolve_owner(Some("cartEntry/7")),
            Err(NavError::ConfigurationNotFound(_))
        ));
    }

    #[test]
    fn test_import_toml_derives_flat_groups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("laptop.toml");
        fs::write(
            &path,
            r#"
config_id = "cfg-1"

[owner]
owner_type = "product"
id = "CONF_LAPTOP"

[[groups]]
id = "general"
name = "General"

[[groups]]
id = "display"
name = "Display"

[[groups.sub_groups]]
id = "panel"
name = "Panel"
"#,
        )
        .unwrap();

        let configuration = import_configuration(&path).unwrap();
        let ids: Vec<_> = configuration.flat_groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["general", "display", "panel"]);
        assert!(configuration.flat_groups_consistent());
        assert!(configuration.consistent);
    }

    #[test]
    fn test_import_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("laptop.yaml");
        fs::write(&path, "owner: {}").unwrap();
        assert!(matches!(
            import_configuration(&path),
            Err(NavError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_import_rejects_duplicate_group_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("twice.json");
        fs::write(
            &path,
            r#"{
                "owner": { "owner_type": "product", "id": "TWICE" },
                "groups": [
                    { "id": "A", "name": "A", "sub_groups": [{ "id": "B", "name": "B" }] },
                    { "id": "B", "name": "B" }
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(
            import_configuration(&path),
            Err(NavError::DuplicateGroupId { group_id, .. }) if group_id == "B"
        ));
    }
}
