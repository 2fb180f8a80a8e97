pub mod cache;
pub mod catalog;
pub mod cli;
pub mod coerce;
pub mod columns;
pub mod criteria;
pub mod data;
pub mod error;
pub mod export;
pub mod filter;
pub mod io_utils;
pub mod load;
pub mod pipeline;
pub mod process;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("crane_listings", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => handle_list(&args),
        Commands::Options(args) => process::show_options(&args),
        Commands::Filter(args) => process::execute(&args),
    }
}

fn handle_list(args: &cli::ListArgs) -> Result<()> {
    let names = catalog::list_datasets(&args.folder)
        .with_context(|| format!("Choosing a dataset from {:?}", args.folder))?;
    for name in &names {
        println!("{name}");
    }
    info!("Found {} dataset(s) in {:?}", names.len(), args.folder);
    Ok(())
}
