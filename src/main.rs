//! blockcraft - inventory and crafting session driver
//!
//! Replays inventory commands from a script file or standard input.

mod command_script;
mod commands;
mod config;
mod session;

use anyhow::{Context, Result};
use blockcraft_core::{get_name, RecipeDatabase};
use command_script::CommandScript;
use commands::{execute_command, parse_command};
use config::{SessionConfig, DEFAULT_SESSION_PATH};
use session::Session;
use std::{
    env,
    io::{self, BufRead},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    info!("Starting blockcraft v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        print_usage();
        return Ok(());
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_PATH));
    let config = SessionConfig::load_from_path(&config_path);

    if RecipeDatabase::install_global(config.build_recipe_database()).is_err() {
        warn!("Recipe database already installed; keeping the existing one");
    }
    let recipes = RecipeDatabase::global();
    info!(recipes = recipes.len(), "Recipe database ready");

    let mut session = Session::new(recipes, config.layout.clone());
    for start in &config.starting_items {
        let leftover = session.give_item(start.item, start.count);
        if leftover > 0 {
            warn!(
                item = get_name(start.item),
                leftover, "Starting items did not fit in the inventory"
            );
        }
    }

    match cli.command_script {
        Some(path) => run_script(&mut session, &path),
        None => run_stdin(&mut session),
    }
}

fn run_script(session: &mut Session<'_>, path: &Path) -> Result<()> {
    let script = CommandScript::from_path(path)?;
    info!(steps = script.commands().len(), path = %path.display(), "Running command script");
    for command in script.commands() {
        run_line(session, command);
    }
    Ok(())
}

fn run_stdin(session: &mut Session<'_>) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command from stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        run_line(session, line);
    }
    Ok(())
}

fn run_line(session: &mut Session<'_>, input: &str) {
    println!("> {input}");
    match parse_command(input) {
        Ok(cmd) => {
            for line in execute_command(session, cmd).lines {
                info!(command = input, "{line}");
                println!("{line}");
            }
        }
        Err(err) => {
            warn!(command = input, %err, "Rejected command");
            println!("Error: {err}");
        }
    }
}

fn print_usage() {
    println!("Usage: blockcraft [--config <path>] [--command-script <path>]");
    println!();
    println!("  --config <path>          Session config TOML (default {DEFAULT_SESSION_PATH})");
    println!("  --command-script <path>  JSON command script; reads stdin when omitted");
    println!("  --help                   Show this message");
}

#[derive(Debug, Default)]
struct CliOptions {
    help: bool,
    config: Option<PathBuf>,
    command_script: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--command-script" => {
                    if let Some(path) = args.next() {
                        opts.command_script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--command-script requires a file path");
                    }
                }
                other => {
                    tracing::error!(arg = %other, "Unknown argument");
                }
            }
        }

        opts
    }
}
