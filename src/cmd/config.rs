use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{
    DEFAULT_GEMINI_MODEL, DEFAULT_MAX_DIFF_CHARS, DEFAULT_MAX_OUTPUT_TOKENS, StoredConfig,
    config_file_path,
};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Run the interactive configuration wizard.
    Init,
    /// Show the stored configuration (API key masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Init => run_init(),
        ConfigCommand::Show => run_show(),
    }
}

fn run_init() -> AppResult<()> {
    let mut cfg = StoredConfig::load()?;

    println!("Configuring hadi CLI.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!("The API key is stored in the local config file; protect your filesystem accordingly.");
    println!();

    apply_bool_prompt("Enable Gemini generation (true/false)", &mut cfg.enable_gemini)?;
    apply_prompt("Gemini API key", &mut cfg.gemini_api_key, true)?;
    apply_prompt(
        &format!("Gemini model (default {DEFAULT_GEMINI_MODEL})"),
        &mut cfg.gemini_model,
        false,
    )?;
    apply_bool_prompt(
        "Include scope in fallback messages (true/false)",
        &mut cfg.include_scope,
    )?;
    apply_number_prompt(
        &format!("Maximum diff characters sent to Gemini (default {DEFAULT_MAX_DIFF_CHARS})"),
        &mut cfg.max_diff_chars,
    )?;
    apply_number_prompt(
        &format!("Maximum Gemini output tokens (default {DEFAULT_MAX_OUTPUT_TOKENS})"),
        &mut cfg.max_output_tokens,
    )?;

    cfg.save()?;

    let path = config_file_path()?;
    println!("\nConfiguration saved to {}", path.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;
    let path = config_file_path()?;

    println!("Configuration file: {}", path.display());
    println!("Gemini enabled: {}", display_or_default(cfg.enable_gemini, true));
    println!("Gemini API key: {}", mask_secret(&cfg.gemini_api_key));
    println!(
        "Gemini model: {}",
        cfg.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    );
    println!("Include scope: {}", display_or_default(cfg.include_scope, true));
    println!(
        "Max diff characters: {}",
        display_or_default(cfg.max_diff_chars, DEFAULT_MAX_DIFF_CHARS)
    );
    println!(
        "Max output tokens: {}",
        display_or_default(cfg.max_output_tokens, DEFAULT_MAX_OUTPUT_TOKENS)
    );

    Ok(())
}

fn apply_prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    match prompt(field, target.as_deref(), secret)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => *target = Some(value),
    }
    Ok(())
}

fn apply_bool_prompt(field: &str, target: &mut Option<bool>) -> AppResult<()> {
    let current = target.map(|value| value.to_string());
    match prompt(field, current.as_deref(), false)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => match value.to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => *target = Some(true),
            "false" | "no" | "n" | "0" => *target = Some(false),
            _ => println!("Expected true or false, keeping the previous value."),
        },
    }
    Ok(())
}

fn apply_number_prompt<T>(field: &str, target: &mut Option<T>) -> AppResult<()>
where
    T: std::str::FromStr + ToString,
{
    let current = target.as_ref().map(|value| value.to_string());
    match prompt(field, current.as_deref(), false)? {
        PromptAction::Keep => {}
        PromptAction::Clear => *target = None,
        PromptAction::Set(value) => match value.parse::<T>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => println!("Not a number, keeping the previous value."),
        },
    }
    Ok(())
}

fn prompt(field: &str, current: Option<&str>, secret: bool) -> AppResult<PromptAction> {
    let mut stdout = io::stdout();

    match (current, secret) {
        (Some(_), true) => write!(stdout, "{field} [****] (Enter to keep, '-' to clear): ")?,
        (Some(value), false) => {
            write!(stdout, "{field} [{value}] (Enter to keep, '-' to clear): ")?
        }
        (None, _) => write!(stdout, "{field} (Enter to skip): ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();

    if trimmed.is_empty() {
        Ok(PromptAction::Keep)
    } else if trimmed == "-" {
        Ok(PromptAction::Clear)
    } else {
        Ok(PromptAction::Set(trimmed.to_string()))
    }
}

fn display_or_default<T: ToString>(value: Option<T>, default: T) -> String {
    match value {
        Some(value) => value.to_string(),
        None => format!("{} (default)", default.to_string()),
    }
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 => {
            let prefix = &token[..3];
            let suffix = &token[token.len() - 3..];
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}

enum PromptAction {
    Keep,
    Clear,
    Set(String),
}
