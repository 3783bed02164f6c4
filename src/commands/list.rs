// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! List the configurations held in the session

use super::Context;
use crate::navigator::current_group_id;
use crate::session::SessionFile;
use anyhow::Result;

/// Run list command
pub fn run(ctx: &Context) -> Result<()> {
    let session = SessionFile::load(&ctx.data_dir)?;

    if ctx.json {
        let entries: Vec<_> = session
            .configurations
            .iter()
            .map(|c| {
                serde_json::json!({
                    "owner": c.owner.key(),
                    "groups": c.flat_groups.len(),
                    "current_group": current_group_id(c),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if session.configurations.is_empty() {
        println!("No configurations. Use 'configurator-nav import <file>' to add one.");
        return Ok(());
    }

    println!("Configurations ({}):", session.configurations.len());
    for configuration in &session.configurations {
        println!(
            "  {} ({} groups, current: {})",
            ctx.emphasize(&configuration.owner.key()),
            configuration.flat_groups.len(),
            current_group_id(configuration).unwrap_or("none")
        );
    }
    Ok(())
}
