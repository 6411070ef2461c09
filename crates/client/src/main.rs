//! todosync-client CLI entry point.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use todosync_client::cli::{Cli, Commands, OutputFormat};
use todosync_client::output::{format_output, pretty};
use todosync_client::{ClientConfig, MutationController, QueryCache, SubmitOutcome, TodoApiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todosync_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env();
    let client = TodoApiClient::new(&cli.base_url);
    let latency = Duration::from_millis(cli.latency_ms);
    let cache = QueryCache::new(config.cache_max_entries);

    match cli.command {
        Commands::List => {
            let controller = MutationController::new(Arc::new(client), cache, latency);
            // A one-shot read is never raced by a mutation, so the
            // refresh always commits
            let todos = controller.refresh().await?.unwrap_or_default();
            println!("{}", format_output(&todos, cli.format));
        }
        Commands::Add {
            title,
            simulate_error,
            no_optimistic,
        } => {
            let controller = MutationController::new(Arc::new(client), cache, latency)
                .with_optimistic(!no_optimistic);

            // Prime the cache the way a page load would, so the
            // speculative write has a collection to extend
            controller.refresh().await?;

            let id = Uuid::new_v4().to_string();
            let outcome = controller.submit(&title, &id, simulate_error).await?;

            if matches!(cli.format, OutputFormat::Pretty) && !cli.quiet {
                match &outcome {
                    SubmitOutcome::Appended(todo) => {
                        println!("Added:\n{}\n", pretty::format_todo(todo));
                    }
                    SubmitOutcome::RolledBack => {
                        println!("Mutation failed, rolled back.\n");
                    }
                }
            }

            let todos = controller.visible_todos().await?.unwrap_or_default();
            println!("{}", format_output(&todos, cli.format));
        }
        Commands::Health => {
            client.health().await?;
            if !cli.quiet {
                println!("Server is up at {}", cli.base_url);
            }
        }
    }

    Ok(())
}
