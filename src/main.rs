//! Swagger Generator - command-line tool for producing Swagger 2.0 documents.
//!
//! This binary reads a parsed REST API description (a JSON payload produced
//! by a host tool) and generates a complete Swagger 2.0 specification from
//! it: paths with classified parameters, schema definitions with validation
//! constraints, and the standard document scaffold.
//!
//! # Usage
//!
//! ```bash
//! swagger-from-api [OPTIONS] <API_FILE>
//! ```
//!
//! # Examples
//!
//! Generate JSON documentation:
//! ```bash
//! swagger-from-api api.json -o rest.swagger.json
//! ```
//!
//! Record the request address and prefix:
//! ```bash
//! swagger-from-api api.json --host api.example.com --base-path /v1
//! ```
//!
//! Read the description from stdin:
//! ```bash
//! host-tool export | swagger-from-api -
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_from_api::cli;

fn main() -> Result<()> {
    // We need to parse args twice: once to get verbose flag, then again after logger init
    // First, do a quick parse just to check for verbose flag
    let args_for_verbose = cli::CliArgs::parse();

    // Initialize logger based on verbose flag
    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Swagger Generator starting...");

    // Now do the full parse with validation
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
