use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::suggest::SuggestArgs;
use guilted_cli::config::Config;
use guilted_cli::logging::init_tracing;
use guilted_config::constants::DEFAULT_LOG_FILTER;

#[derive(Parser)]
#[command(name = "guilted")]
#[command(about = "Guilted - personalized, mostly homemade gift ideas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides GUILTED_API_PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Address to bind (overrides GUILTED_HOST)
        #[arg(long)]
        host: Option<String>,
    },
    /// Find a gift interactively using a running server
    Suggest(SuggestArgs),
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port, host } => {
            init_tracing(DEFAULT_LOG_FILTER);

            let mut config = Config::from_env()?;
            if let Some(port) = port {
                if port == 0 {
                    anyhow::bail!("Port must be between 1 and 65535");
                }
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }

            println!("{}", "🚀 Starting Guilted server...".green().bold());
            guilted_cli::run_server(config).await
        }
        Commands::Suggest(args) => {
            // Keep the interactive prompts readable
            init_tracing("warn");
            cli::suggest::run(args).await
        }
    }
}
