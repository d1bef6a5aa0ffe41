//! Keryx CLI - Command-line publisher for the server registry.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keryx=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => commands::init::run(&args),
        Commands::Login(args) => commands::login::execute(args).await,
        Commands::Logout => commands::logout::run(),
        Commands::Publish(args) => commands::publish::execute(args).await,
        Commands::Version => {
            println!("keryx {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
