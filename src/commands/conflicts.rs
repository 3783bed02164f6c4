// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Jump to the conflict solver

use super::{print_group, Context, Workspace};
use anyhow::Result;

/// Run conflicts command
pub async fn run(ctx: &Context) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let configuration = ws.configuration()?;

    if ws.nav.get_first_conflict_group(&configuration).is_none() {
        println!("No conflicts in {}", ws.owner);
        return Ok(());
    }

    ws.nav.navigate_to_conflict_solver(&ws.owner).await?;
    ws.save()?;

    let current = ws.nav.get_current_group_id(&ws.owner).first().await?;
    print_group(&ws, ctx, "current", current.as_deref())
}
