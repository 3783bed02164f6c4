// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod conflicts;
pub mod cursor;
pub mod goto;
pub mod import;
pub mod incomplete;
pub mod list;
pub mod menu;
pub mod remove;
pub mod show;
pub mod status;

use crate::navigator::ConfiguratorGroups;
use crate::session::SessionFile;
use crate::store::MemoryStore;
use crate::types::{Configuration, Owner};
use anyhow::{Context as _, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory holding `session.json`
    pub data_dir: PathBuf,
    /// Owner key chosen with `--owner`
    pub owner: Option<String>,
    /// Print JSON instead of text
    pub json: bool,
    /// Colored output
    pub color: bool,
    /// Mark the group being left as visited on `goto`
    pub mark_visited: bool,
}

impl Context {
    /// Bold text when colors are enabled
    #[must_use]
    pub fn emphasize(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Dimmed text when colors are enabled
    #[must_use]
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

/// A loaded session with a navigator bound to one owner
pub struct Workspace {
    /// Store holding every configuration of the session
    pub store: Arc<MemoryStore>,
    /// Navigator over the store
    pub nav: ConfiguratorGroups<MemoryStore>,
    /// Owner the command works on
    pub owner: Owner,
    data_dir: PathBuf,
}

impl Workspace {
    /// Load the session and pick the owner
    pub fn open(ctx: &Context) -> Result<Self> {
        let session = SessionFile::load(&ctx.data_dir)
            .with_context(|| format!("Failed to load session from {}", ctx.data_dir.display()))?;
        let owner = session.resolve_owner(ctx.owner.as_deref())?;
        let store = Arc::new(session.into_store());
        Ok(Self {
            nav: ConfiguratorGroups::new(Arc::clone(&store)),
            store,
            owner,
            data_dir: ctx.data_dir.clone(),
        })
    }

    /// Latest configuration of the owner
    pub fn configuration(&self) -> Result<Arc<Configuration>> {
        self.store
            .snapshot(&self.owner)
            .ok_or_else(|| anyhow::anyhow!("Configuration not loaded: {}", self.owner))
    }

    /// Persist every configuration back to the data directory
    pub fn save(&self) -> Result<()> {
        SessionFile::from_store(&self.store)
            .save(&self.data_dir)
            .with_context(|| format!("Failed to save session to {}", self.data_dir.display()))
    }
}

/// Print a group as `label: name [id] (flags)`, or `none`
pub(crate) fn print_group(ws: &Workspace, ctx: &Context, label: &str, group_id: Option<&str>) -> Result<()> {
    let configuration = ws.configuration()?;
    let group = crate::lookup::find_group_by_id(&configuration.groups, group_id);

    if ctx.json {
        let mut out = serde_json::Map::new();
        out.insert("owner".into(), ws.owner.key().into());
        out.insert(label.into(), serde_json::to_value(group)?);
        println!("{}", serde_json::Value::Object(out));
        return Ok(());
    }

    match group {
        Some(g) => println!(
            "{}: {}",
            label,
            ctx.emphasize(&crate::render::group_label(&configuration, g))
        ),
        None => println!("{}: {}", label, ctx.dim("none")),
    }
    Ok(())
}
