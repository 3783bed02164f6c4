// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Import a configuration file into the session

use super::Context;
use crate::session::{import_configuration, SessionFile};
use anyhow::{Context as _, Result};
use std::path::Path;

/// Run import command
pub fn run(ctx: &Context, file: &Path) -> Result<()> {
    let configuration = import_configuration(file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    if !configuration.flat_groups_consistent() {
        tracing::warn!(
            owner = %configuration.owner,
            "flat_groups do not match the group tree; sequential navigation follows flat_groups"
        );
    }

    let owner = configuration.owner.clone();
    let group_count = configuration.flat_groups.len();

    let mut session = SessionFile::load(&ctx.data_dir)
        .with_context(|| format!("Failed to load session from {}", ctx.data_dir.display()))?;
    session.upsert(configuration);
    session.save(&ctx.data_dir)?;

    if ctx.json {
        println!("{}", serde_json::json!({ "imported": owner.key(), "groups": group_count }));
    } else {
        println!("Imported {} ({} groups)", ctx.emphasize(&owner.key()), group_count);
    }
    Ok(())
}
