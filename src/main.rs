//! Questlog CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use questlog::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init(args) => questlog::cli::commands::init::execute(args, cli.json).await,
        Commands::User(args) => questlog::cli::commands::user::execute(args, cli.json).await,
        Commands::Quest(args) => questlog::cli::commands::quest::execute(args, cli.json).await,
        Commands::Reward(args) => questlog::cli::commands::reward::execute(args, cli.json).await,
        Commands::Achievement(args) => {
            questlog::cli::commands::achievement::execute(args, cli.json).await
        }
        Commands::Category(args) => {
            questlog::cli::commands::category::execute(args, cli.json).await
        }
    };

    if let Err(err) = result {
        questlog::cli::handle_error(err, cli.json);
    }
}
