// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use hostready::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hostready")]
#[command(about = "Detect Docker or Podman and check host readiness")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: hostready.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Normal)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show which container engine is installed
    Detect,

    /// Show engine version, compose support and network mode
    Info,

    /// Check whether this host meets the requirements
    Check,

    /// Run an engine command, rewritten for the detected engine
    Exec {
        /// Command, starting with docker or podman
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Start a container
    Start { name: String },

    /// Stop a container
    Stop { name: String },

    /// Pause a container
    Pause { name: String },

    /// Unpause a container
    Unpause { name: String },

    /// Remove a container
    Rm { name: String },

    /// Remove a volume
    VolumeRm { name: String },

    /// List container names
    Ps {
        /// Engine filter expression, e.g. name=web
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Print a field of a container using a Go template
    Inspect {
        name: String,

        #[arg(short, long)]
        format: String,
    },

    /// Bring up a compose project in the background
    ComposeUp { file: PathBuf },

    /// Tear down a compose project
    ComposeDown { file: PathBuf },
}
