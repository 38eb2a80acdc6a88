//! Sysport CLI - System overview and listening-port management
//!
//! A command-line tool for inspecting memory, CPU and disks, listing
//! listening ports, and freeing a port by terminating its owner.

mod commands;
mod display;
mod prompt;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sysport_core::{Config, ConfigStore, SysportEngine};

use crate::display::Theme;

#[derive(Parser)]
#[command(name = "sysport")]
#[command(author, version, about = "System overview and listening-port management")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Refresh the overview continuously
    #[arg(short, long)]
    live: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ~/.sysport/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List listening ports or free them
    Ports {
        #[command(subcommand)]
        action: Option<PortsAction>,

        /// Output in JSON format
        #[arg(long, global = true)]
        json: bool,
    },

    /// Show usage of all disk partitions
    Disks {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Subcommand)]
enum PortsAction {
    /// List all listening ports
    #[command(alias = "ls")]
    List,

    /// Kill the processes listening on one or more ports
    #[command(after_help = "Examples:\n  sysport ports kill 3000\n  sysport ports kill 3000 8080 -f")]
    Kill {
        /// Port numbers (1-65535)
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        ports: Vec<String>,

        /// Skip confirmation and kill immediately with SIGKILL
        #[arg(short, long)]
        force: bool,
    },
}

async fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let store = match path {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };
    store
        .load()
        .await
        .with_context(|| format!("loading {}", store.path().display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::init_tracing(cli.verbose);

    let config = load_config(cli.config).await?;
    let theme = Theme::new(config.color && !cli.no_color && atty::is(atty::Stream::Stdout));

    match cli.command {
        Some(Commands::Ports { action, json }) => {
            let engine = SysportEngine::from_config(&config);
            match action {
                None | Some(PortsAction::List) => {
                    commands::list::run(&engine, &theme, json).await?;
                }
                Some(PortsAction::Kill { ports, force }) => {
                    commands::kill::run(&engine, &theme, &ports, force).await?;
                }
            }
        }
        Some(Commands::Disks { json }) => {
            commands::disks::run(&theme, json)?;
        }
        Some(Commands::Config) => {
            commands::config::show(&config)?;
        }
        None => {
            if cli.live {
                commands::overview::live(&config, &theme).await?;
            } else {
                commands::overview::snapshot(&config, &theme).await?;
            }
        }
    }

    Ok(())
}
