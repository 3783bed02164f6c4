// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Group status commands

use super::{Context, Workspace};
use crate::types::GroupStatus;
use anyhow::{bail, Result};

/// Run status command; with `visited`, record the flag first
pub async fn run(ctx: &Context, group_id: &str, visited: Option<bool>) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ensure_group(&ws, group_id)?;

    if let Some(visited) = visited {
        ws.nav.set_group_status(&ws.owner, group_id, visited).await?;
        ws.save()?;
    }

    let status = ws.nav.get_group_status(&ws.owner, group_id).first().await?;
    print_status(ctx, group_id, status)
}

/// Run complete command
pub async fn complete(ctx: &Context, group_id: &str, complete: bool) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ensure_group(&ws, group_id)?;

    ws.nav.status().set_group_complete(&ws.owner, group_id, complete);
    ws.save()?;

    let status = ws.nav.get_group_status(&ws.owner, group_id).first().await?;
    print_status(ctx, group_id, status)
}

fn ensure_group(ws: &Workspace, group_id: &str) -> Result<()> {
    if !ws.configuration()?.contains_group(group_id) {
        bail!("Group not found: {}", group_id);
    }
    Ok(())
}

fn print_status(ctx: &Context, group_id: &str, status: GroupStatus) -> Result<()> {
    if ctx.json {
        println!(
            "{}",
            serde_json::json!({ "group": group_id, "status": status })
        );
        return Ok(());
    }

    println!(
        "{}: {}, {}",
        ctx.emphasize(group_id),
        if status.visited { "visited" } else { "not visited" },
        if status.complete { "complete" } else { "incomplete" }
    );
    Ok(())
}
