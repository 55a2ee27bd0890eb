mod cli;
mod config;
mod openai_client;
mod planner;

use std::io;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_print::cformat;
use dotenv::dotenv;
use eyre::Result;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

use crate::cli::chat::ChatContext;
use crate::config::{API_KEY_VAR, Config, ConfigError};
use crate::openai_client::OpenAiClient;
use crate::planner::TravelPlanner;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Message to send to the planner (repeat for several turns)
    #[arg(short, long)]
    input: Vec<String>,

    /// Model to use instead of OPENAI_MODEL
    #[arg(short, long)]
    model: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a travel planning chat
    Chat {
        /// Message to send to the planner (repeat for several turns)
        #[arg(short, long)]
        input: Vec<String>,

        /// Model to use instead of OPENAI_MODEL
        #[arg(short, long)]
        model: Option<String>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    let (input, model, verbose) = match cli.command {
        Some(Commands::Chat { input, model, verbose }) => (input, model, verbose),
        None => (cli.input, cli.model, cli.verbose),
    };

    let log_level = if verbose { Level::DEBUG } else { Level::INFO };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = match Config::from_env() {
        Ok(config) => config.with_model(model),
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("{}", config_help(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let client = match OpenAiClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Error initializing OpenAI client: {}", e);
            eprintln!("Failed to initialize the travel planner. Please check your API key and try again.");
            return Ok(ExitCode::FAILURE);
        }
    };

    info!("Starting Roamyo travel planner with model {}", client.model());

    let interactive = input.is_empty();
    let planner = TravelPlanner::new(Box::new(client));
    let mut chat_context = ChatContext::new(Box::new(io::stdout()), input, interactive, planner);
    chat_context.run().await
}

fn config_help(err: &ConfigError) -> String {
    match err {
        ConfigError::MissingApiKey(_) => cformat!(
            "<red>Please set your OpenAI API key in the .env file.</>

Steps to fix:
1. Create a `.env` file in the project root
2. Add your OpenAI API key: `{}=your_api_key_here`
3. Restart the application",
            API_KEY_VAR
        ),
        other => cformat!("<red>Configuration error:</> {}", other),
    }
}
