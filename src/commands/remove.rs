// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Discard a configuration and its group statuses

use super::{Context, Workspace};
use crate::store::{Action, ConfiguratorStore};
use anyhow::Result;

/// Run drop command
pub fn run(ctx: &Context) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    ws.store.dispatch(Action::RemoveConfiguration {
        owner: ws.owner.clone(),
    });
    ws.save()?;

    println!("Dropped {}", ws.owner);
    Ok(())
}
