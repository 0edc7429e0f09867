//! AI Oversight CLI - Command-line interface for the oversight tools
//!
//! Usage:
//!   oversight routes                  - List routes and the documents they read
//!   oversight load <route>            - Compose a route's view-model
//!   oversight validate                - Check cross-file references
//!   oversight relay                   - Start the feedback relay server
//!   oversight feedback                - Submit feedback (prompts for missing fields)
//!   oversight store export|import|clear - Maintain the admin store

use clap::{Parser, Subcommand};
use cli::commands::{
    FeedbackCommand, LoadCommand, RelayCommand, RoutesCommand, StoreCommand, ValidateCommand,
};
use cli::context::{Context, GlobalArgs};

#[derive(Parser)]
#[command(name = "oversight")]
#[command(about = "AI Oversight Tools - data composition, validation and feedback relay")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes and their resources
    Routes(RoutesCommand),
    /// Compose a route from the static data
    Load(LoadCommand),
    /// Run the integrity pass over every document
    Validate(ValidateCommand),
    /// Start the feedback relay server
    Relay(RelayCommand),
    /// Submit feedback through the relay
    Feedback(FeedbackCommand),
    /// Admin store maintenance
    Store(StoreCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = Context::from_args(&cli.global)?;

    match cli.command {
        Commands::Routes(cmd) => cmd.run(&ctx),
        Commands::Load(cmd) => cmd.run(&ctx).await,
        Commands::Validate(cmd) => {
            if !cmd.run(&ctx).await? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Relay(cmd) => cmd.run(&ctx).await,
        Commands::Feedback(cmd) => cmd.run(&ctx).await,
        Commands::Store(cmd) => cmd.run(&ctx),
    }
}
