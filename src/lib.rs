//! rpomo library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use log::LevelFilter;
use simplelog::{Config as LogConfig, WriteLogger};
use std::fs;
use utils::path::expand_to_string;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::User { .. } => cli::commands::user::handle(&cli.command, cfg),
        Commands::Timer { .. } => cli::commands::timer::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Goal { .. } => cli::commands::goal::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

fn level_from(name: &str) -> LevelFilter {
    match name.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Daily application log under the config dir. Failures only warn.
fn init_file_logger(cfg: &Config) {
    let dir = Config::logs_dir();
    let path = dir.join(format!(
        "rpomo_{}.log",
        chrono::Local::now().format("%Y%m%d")
    ));

    let opened = fs::create_dir_all(&dir).and_then(|_| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
    });

    match opened {
        Ok(file) => {
            let _ = WriteLogger::init(level_from(&cfg.log_level), LogConfig::default(), file);
        }
        Err(e) => eprintln!("⚠️ Cannot open log file {}: {}", path.display(), e),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = expand_to_string(custom_db);
    }
    if let Some(custom_users) = &cli.users {
        cfg.users_file = expand_to_string(custom_users);
    }

    // test runs leave no files behind besides the ones they name
    if !cli.test {
        init_file_logger(&cfg);
    }

    log::info!("rpomo {} starting", env!("CARGO_PKG_VERSION"));
    dispatch(&cli, &cfg)
}
