// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stratus")]
#[command(about = "Deployment orchestration and health monitoring for managed hosting platforms")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output for CI (only the final result)
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// JSON lines output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file path (defaults to discovering stratus.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stratus.yml configuration file
    Init {
        /// Service identifier on the hosting platform
        #[arg(long)]
        service_id: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Deploy the service and wait for it to go live
    Deploy,

    /// Report which previous deploy a rollback would target
    Rollback,

    /// Sync a local env file to the control plane
    Sync {
        /// Env file to sync (overrides the configured one)
        #[arg(long)]
        env_file: Option<PathBuf>,
    },

    /// Show service state, latest deploy, and current health
    Status,

    /// Watch service health continuously until interrupted
    Monitor,
}
