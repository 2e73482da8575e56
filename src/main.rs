mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::message::{self, MessageCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::gemini::GeminiClient;
use crate::infra::git::GitCli;
use crate::workflow::message::MessageSource;

#[derive(Parser)]
#[command(
    name = "hadi",
    author,
    version,
    about = "Turkish Conventional Commits message generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a commit message from pending repository changes.
    Message(MessageArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct MessageArgs {
    /// Skip the Gemini call and use the heuristic fallback directly.
    #[arg(long)]
    offline: bool,
    /// Leave the scope out of the generated header.
    #[arg(long)]
    no_scope: bool,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config(args) => {
            config_cmd::run(args.command)?;
            Ok(())
        }
        Commands::Message(args) => run_message(args).await,
    }
}

async fn run_message(args: MessageArgs) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd)?;

    if config.enable_gemini && !args.offline && config.gemini_api_key.is_none() {
        eprintln!("Warning: Gemini API key not configured; the heuristic message will be used.");
    }

    let git = Arc::new(GitCli::new(config.workspace_root.clone()));
    let language_model = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.max_output_tokens,
    ));

    let context = AppContext::new(config, git, language_model);

    let outcome = message::run(
        &context,
        MessageCommandArgs {
            offline: args.offline,
            no_scope: args.no_scope,
        },
    )
    .await?;

    match outcome {
        Some(outcome) => {
            if outcome.source == MessageSource::Fallback
                && context.config.enable_gemini
                && !args.offline
            {
                eprintln!("Warning: Gemini unavailable; heuristic message used.");
            }
            println!("{}", outcome.message.as_str());
        }
        None => {
            eprintln!("Commit edilecek değişiklik bulunamadı.");
        }
    }

    Ok(())
}
