// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Set the group whose children the menu shows

use super::{print_group, Context, Workspace};
use anyhow::Result;

/// Run menu command
pub async fn run(ctx: &Context, group_id: &str) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.nav.set_menu_parent_group(&ws.owner, group_id);
    ws.save()?;

    let parent = ws.nav.get_menu_parent_group(&ws.owner).first().await?;
    print_group(&ws, ctx, "menu parent", parent.as_ref().map(|g| g.id.as_str()))
}
