use std::io::{self, Write};

use clap::{Args, Subcommand};

use crate::config::{StoredConfig, config_file_path};
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

    println!("Configuring docket.");
    println!("Press Enter to keep the current value, '-' to clear it.");
    println!();

    prompt("Linear API key", &mut cfg.linear_api_key, true)?;
    prompt("Linear team ID", &mut cfg.linear_team_id, false)?;
    prompt(
        "Linear API URL (leave unset for the public endpoint)",
        &mut cfg.linear_api_url,
        false,
    )?;

    cfg.save()?;

    println!();
    println!("Configuration saved to {}", config_file_path()?.display());
    Ok(())
}

fn run_show() -> AppResult<()> {
    let cfg = StoredConfig::load()?;

    println!("Configuration file: {}", config_file_path()?.display());
    println!("Linear API key: {}", mask_secret(&cfg.linear_api_key));
    println!("Linear team ID: {}", display_value(&cfg.linear_team_id));
    println!("Linear API URL: {}", display_value(&cfg.linear_api_url));
    Ok(())
}

fn prompt(field: &str, target: &mut Option<String>, secret: bool) -> AppResult<()> {
    let mut stdout = io::stdout();
    match (target.as_deref(), secret) {
        (Some(_), true) => write!(stdout, "{field} [****]: ")?,
        (Some(value), false) => write!(stdout, "{field} [{value}]: ")?,
        (None, _) => write!(stdout, "{field}: ")?,
    }
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();

    if trimmed == "-" {
        *target = None;
    } else if !trimmed.is_empty() {
        *target = Some(trimmed.to_string());
    }
    Ok(())
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or("<not set>")
        .to_string()
}

fn mask_secret(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(key) if key.len() > 6 => format!("{}***{}", &key[..3], &key[key.len() - 3..]),
        Some(key) if !key.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
