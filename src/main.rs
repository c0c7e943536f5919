mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod parser;
mod services;
mod workflow;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::linear::LinearClient;

#[derive(Parser)]
#[command(
    name = "docket",
    author,
    version,
    about = "Turn generated document summaries into Linear tickets"
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse ticket content and create the tickets in Linear.
    Submit(SubmitArgs),
    /// Manage CLI configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct SubmitArgs {
    /// File with the generated ticket content; reads stdin when omitted.
    input: Option<PathBuf>,
    /// Override the Linear team configured for the CLI.
    #[arg(short, long)]
    team: Option<String>,
    /// Parse and print the tickets without creating anything.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(error) = run(cli.command).await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> AppResult<()> {
    match command {
        Commands::Config(args) => config_cmd::run(args.command),
        Commands::Submit(args) => run_submit(args).await,
    }
}

async fn run_submit(args: SubmitArgs) -> AppResult<()> {
    let config = AppConfig::load()?;

    let content = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => read_stdin()?,
    };

    let drafts = parser::parse(&content);
    if drafts.is_empty() {
        println!("No tickets found in the input.");
        return Ok(());
    }

    if args.dry_run {
        for (index, draft) in drafts.iter().enumerate() {
            println!(
                "Ticket {}: {} [{}]",
                index + 1,
                draft.title,
                draft.priority.as_str()
            );
        }
        return Ok(());
    }

    let linear = config.linear(args.team)?;
    let issue_tracker = Arc::new(LinearClient::new(linear.clone()));
    let context = AppContext::new(linear, issue_tracker);

    let report = cmd::submit::run(&context, &drafts).await;
    println!(
        "Created {} out of {} tickets in Linear.",
        report.created, report.attempted
    );
    Ok(())
}

fn read_stdin() -> AppResult<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "docket=debug" } else { "docket=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
