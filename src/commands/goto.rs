// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Navigate to a group by id

use super::{print_group, Context, Workspace};
use anyhow::{bail, Result};

/// Run goto command
pub async fn run(ctx: &Context, group_id: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let configuration = ws.configuration()?;

    if !configuration.contains_group(group_id) {
        bail!("Group not found: {}", group_id);
    }

    ws.nav
        .navigate_to_group(&configuration, group_id, ctx.mark_visited)
        .await?;
    ws.save()?;

    let current = ws.nav.get_current_group_id(&ws.owner).first().await?;
    print_group(&ws, ctx, "current", current.as_deref())
}
