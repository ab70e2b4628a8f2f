pub mod cli;
pub mod dictionary;
pub mod error;
pub mod generate;
pub mod infer;
pub mod io_utils;
pub mod report;
pub mod resolve;
pub mod sql;
pub mod tabular;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::{cli::Cli, generate::GenerateOptions};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_sqlgen", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Arguments: {:?}", cli);
    let options = GenerateOptions::from(&cli);
    generate::execute(&options).map(|_| ())
}
