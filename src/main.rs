//! Norris CLI entry point.

use anyhow::Context as _;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "norris")]
#[command(about = "Discord bot that summarizes documents and answers questions from them")]
struct Cli {
    /// Path to config file (optional)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("starting norris");

    let config = if let Some(config_path) = cli.config {
        norris::config::Config::load_from_path(&config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))?
    } else {
        norris::config::Config::load().context("failed to load configuration")?
    };

    tracing::info!(model = %config.model, "configuration loaded");

    let gateway = Arc::new(
        norris::llm::GroqClient::new(&config.groq_api_key, &config.model)
            .context("failed to initialize completion client")?,
    );

    let bot = norris::discord::DiscordBot::new(&config.discord_token, gateway);
    let mut client = bot.build_client().await?;

    let shard_manager = client.shard_manager.clone();

    tokio::select! {
        result = client.start() => {
            result.context("discord gateway error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
            shard_manager.shutdown_all().await;
        }
    }

    tracing::info!("norris stopped");
    Ok(())
}
