// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Current, next and previous group

use super::{print_group, Context, Workspace};
use anyhow::{bail, Result};

/// Which group relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// The active group
    Current,
    /// The group after the active one
    Next,
    /// The group before the active one
    Previous,
}

impl Cursor {
    fn label(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Next => "next",
            Self::Previous => "previous",
        }
    }
}

/// Run current/next/prev command; with `go`, navigate to the neighbour
pub async fn run(ctx: &Context, cursor: Cursor, go: bool) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let selection = match cursor {
        Cursor::Current => ws.nav.get_current_group_id(&ws.owner),
        Cursor::Next => ws.nav.get_next_group_id(&ws.owner),
        Cursor::Previous => ws.nav.get_previous_group_id(&ws.owner),
    };
    let target = selection.first().await?;

    if go && cursor != Cursor::Current {
        let Some(target_id) = target.as_deref() else {
            bail!("No {} group", cursor.label());
        };
        let configuration = ws.configuration()?;
        ws.nav
            .navigate_to_group(&configuration, target_id, ctx.mark_visited)
            .await?;
        ws.save()?;
    }

    print_group(&ws, ctx, cursor.label(), target.as_deref())
}
