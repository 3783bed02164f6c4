// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! configurator-nav CLI - navigate the groups of a product configuration

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use configurator_nav::commands::{self, cursor::Cursor, Context};
use configurator_nav::config;

#[derive(Parser)]
#[command(name = "configurator-nav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Settings file path
    #[arg(short, long, env = "CONFIGURATOR_NAV_CONFIG", global = true)]
    config: Option<std::path::PathBuf>,

    /// Data directory override
    #[arg(long, env = "CONFIGURATOR_NAV_DATA_DIR", global = true)]
    data_dir: Option<std::path::PathBuf>,

    /// Configuration owner key, e.g. product/CONF_LAPTOP
    #[arg(short, long, global = true)]
    owner: Option<String>,

    /// Disable colored output
    #[arg(
        long,
        env = "NO_COLOR",
        global = true,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    no_color: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Do not mark the group being left as visited
    #[arg(long, global = true)]
    no_mark: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a configuration from a JSON or TOML file
    Import {
        /// Configuration file
        file: std::path::PathBuf,
    },

    /// List configurations in the session
    List,

    /// Show the group tree with status markers
    Show,

    /// Show the current group
    Current,

    /// Show the next group
    Next {
        /// Navigate to it
        #[arg(long)]
        go: bool,
    },

    /// Show the previous group
    Prev {
        /// Navigate to it
        #[arg(long)]
        go: bool,
    },

    /// Navigate to a group
    Goto {
        /// Group ID
        group: String,
    },

    /// Navigate to the first conflict group
    Conflicts,

    /// Navigate to the first incomplete group
    Incomplete,

    /// Set the group whose children the menu shows
    Menu {
        /// Group ID
        group: String,
    },

    /// Show or set the status of a group
    Status {
        /// Group ID
        group: String,

        /// Record the visited flag
        #[arg(long)]
        visited: Option<bool>,
    },

    /// Mark a group complete
    Complete {
        /// Group ID
        group: String,

        /// Mark it incomplete instead
        #[arg(long)]
        undo: bool,
    },

    /// Discard the configuration and its statuses
    Drop,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => settings.level(),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context {
        data_dir: cli.data_dir.unwrap_or(settings.data_dir),
        owner: cli.owner,
        json: cli.json,
        color: !cli.no_color,
        mark_visited: settings.mark_visited && !cli.no_mark,
    };

    // Execute command
    match cli.command {
        Commands::Import { file } => commands::import::run(&ctx, &file),
        Commands::List => commands::list::run(&ctx),
        Commands::Show => commands::show::run(&ctx),
        Commands::Current => commands::cursor::run(&ctx, Cursor::Current, false).await,
        Commands::Next { go } => commands::cursor::run(&ctx, Cursor::Next, go).await,
        Commands::Prev { go } => commands::cursor::run(&ctx, Cursor::Previous, go).await,
        Commands::Goto { group } => commands::goto::run(&ctx, &group).await,
        Commands::Conflicts => commands::conflicts::run(&ctx).await,
        Commands::Incomplete => commands::incomplete::run(&ctx).await,
        Commands::Menu { group } => commands::menu::run(&ctx, &group).await,
        Commands::Status { group, visited } => commands::status::run(&ctx, &group, visited).await,
        Commands::Complete { group, undo } => commands::status::complete(&ctx, &group, !undo).await,
        Commands::Drop => commands::remove::run(&ctx),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    }
}
