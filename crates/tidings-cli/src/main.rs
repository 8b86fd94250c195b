//! Tidings CLI - breakfast demo for the Tidings dispatcher.
//!
//! Seats a few people, announces `breakfast:ready`, and prints the chain of
//! synchronous reactions that follows.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tidings_config::validate::validate_demo;
use tidings_config::{Config, DemoSection, ResolvedConfig};
use tidings_telemetry::setup_logging;
use tracing::{debug, info};

mod commands;
mod config_bridge;
mod person;
mod printer;
mod theme;

use printer::Printer;
use theme::Theme;

/// Tidings - in-process event dispatcher demo
#[derive(Parser)]
#[command(name = "tidings")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format: pretty, compact, json or full
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TIDINGS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve breakfast and watch the events cascade (default)
    Breakfast {
        /// Announce each menu item as its own argument
        #[arg(long)]
        spread: bool,

        /// Seat a person (repeatable; replaces the configured people)
        #[arg(short = 'p', long = "person")]
        people: Vec<String>,

        /// Put an item on the menu (repeatable; replaces the configured menu)
        #[arg(short = 'i', long = "item")]
        menu: Vec<String>,
    },

    /// Show the resolved configuration
    Config {
        /// Only list the config files that were loaded
        #[arg(long)]
        paths: bool,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", Theme::error(&format!("{e:#}")));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let resolved = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    let mut log_config = config_bridge::to_log_config(&resolved.config)?;
    if cli.verbose {
        log_config.level = "debug".to_owned();
    }
    if let Some(format) = &cli.log_format {
        log_config.format = format.parse()?;
    }
    setup_logging(&log_config)?;
    // Loading ran before a subscriber existed, so its own events were dropped.
    log_loaded_files(&resolved);

    let command = cli.command.unwrap_or(Commands::Breakfast {
        spread: false,
        people: Vec::new(),
        menu: Vec::new(),
    });

    match command {
        Commands::Breakfast {
            spread,
            people,
            menu,
        } => {
            let demo = demo_section(&resolved.config.demo, spread, people, menu)?;
            commands::breakfast::run(&demo, &Printer::stdout())
        },
        Commands::Config { paths } => commands::config::show(&resolved, paths),
    }
}

fn log_loaded_files(resolved: &ResolvedConfig) {
    if resolved.loaded_files.is_empty() {
        debug!("Using embedded default configuration");
    }
    for path in &resolved.loaded_files {
        info!(path = %path, "Loaded config file");
    }
}

/// Apply command-line overrides to the configured demo and validate the result.
fn demo_section(
    configured: &DemoSection,
    spread: bool,
    people: Vec<String>,
    menu: Vec<String>,
) -> Result<DemoSection> {
    let mut demo = configured.clone();
    demo.spread |= spread;
    if !people.is_empty() {
        demo.people = people;
    }
    if !menu.is_empty() {
        demo.menu = menu;
    }
    validate_demo(&demo).context("invalid breakfast options")?;
    Ok(demo)
}
