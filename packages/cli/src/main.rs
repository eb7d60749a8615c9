// ABOUTME: Entry point for the BAAC terminal client
// ABOUTME: Parses arguments, loads configuration, and dispatches subcommands

use std::process;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use baac_client::BaacClient;
use baac_config::Config;

mod commands;
mod input;
mod surface;

#[derive(Parser)]
#[command(name = "baac")]
#[command(about = "Terminal client for the Barangay Amungan Assistant Chatbot")]
#[command(version)]
struct Cli {
    /// Backend server URL (overrides BAAC_SERVER_URL)
    #[arg(long)]
    server: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with BAAC (default)
    Chat {
        /// Browse without signing in; document requests stay locked
        #[arg(long)]
        guest: bool,
    },
    /// List your chat history
    Chats,
    /// Show today's document copy limits
    Limits,
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(server) = cli.server {
        config.server_url = server.trim().trim_end_matches('/').to_string();
    }
    if let Some(secs) = cli.timeout {
        config.http_timeout = Duration::from_secs(secs);
    }

    match run(cli.command, config).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(command: Option<Commands>, config: Config) -> anyhow::Result<()> {
    let client = BaacClient::with_timeout(config.server_url.as_str(), config.http_timeout)?;

    match command.unwrap_or(Commands::Chat { guest: false }) {
        Commands::Chat { guest } => commands::chat::run(client, &config, guest).await,
        Commands::Chats => commands::chats::run(client).await,
        Commands::Limits => commands::limits::run(client).await,
    }
}
