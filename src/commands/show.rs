// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Show the group tree of a configuration

use super::{Context, Workspace};
use crate::render;
use anyhow::Result;

/// Run show command
pub fn run(ctx: &Context) -> Result<()> {
    let ws = Workspace::open(ctx)?;
    let configuration = ws.configuration()?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&*configuration)?);
    } else {
        println!("{}", render::tree(&configuration));
    }
    Ok(())
}
