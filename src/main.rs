//! OpenAPI from Actions - Command-line tool for generating OpenAPI documentation.
//!
//! Reads an action model (one or more JSON/YAML files describing a web API's controller
//! actions and the composite types they use) and writes an OpenAPI 3.0 document.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-actions [OPTIONS] <MODEL_PATH>
//! ```
//!
//! # Examples
//!
//! Generate JSON documentation:
//! ```bash
//! openapi-from-actions ./Shop.actions.json -o openapi.json
//! ```
//!
//! Generate YAML documentation from a directory of models:
//! ```bash
//! openapi-from-actions ./models -f yaml -t "Shop API" -o openapi.yaml
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_actions::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI from Actions starting...");

    let args = cli::parse_args_from_parsed(args)?;
    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
