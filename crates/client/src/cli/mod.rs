//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the todosync API.
#[derive(Debug, Parser)]
#[command(name = "todosync-client")]
#[command(about = "CLI client for the todosync API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "TODOSYNC_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Simulated network latency in milliseconds before every remote call.
    #[arg(long, env = "TODOSYNC_LATENCY_MS", default_value = "1000")]
    pub latency_ms: u64,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch and print the todo collection.
    List,
    /// Submit a new todo through the optimistic mutation controller.
    Add {
        /// Title of the todo.
        title: String,

        /// Force the mutation to fail before reaching the server,
        /// exercising the rollback path.
        #[arg(long)]
        simulate_error: bool,

        /// Disable the speculative cache write; the stale list stays
        /// visible until the mutation settles.
        #[arg(long)]
        no_optimistic: bool,
    },
    /// Check server liveness.
    Health,
}
