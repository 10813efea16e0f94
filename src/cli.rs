use crate::builder::SwaggerBuilder;
use crate::loader::load_description;
use crate::serializer::{serialize_json, serialize_yaml, write_to_file};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Swagger Generator - produce a Swagger 2.0 document from a parsed REST API definition
#[derive(Parser, Debug)]
#[command(name = "swagger-from-api")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the API description payload (JSON), or "-" for stdin
    #[arg(value_name = "API_FILE")]
    pub input_path: PathBuf,

    /// API request address recorded in the document
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// URL request prefix recorded in the document
    #[arg(long = "base-path", value_name = "PREFIX")]
    pub base_path: Option<String>,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if args.input_path != Path::new("-") {
        if !args.input_path.exists() {
            anyhow::bail!(
                "API description file does not exist: {}",
                args.input_path.display()
            );
        }
        if !args.input_path.is_file() {
            anyhow::bail!(
                "API description path is not a file: {}",
                args.input_path.display()
            );
        }
    }

    info!("Input: {}", args.input_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    info!("Starting Swagger document generation...");

    // Step 1: Load the API description
    let description = load_description(&args.input_path)?;
    info!(
        "Loaded service {} ({} groups, {} types)",
        description.service.name,
        description.service.groups.len(),
        description.types.len()
    );

    // Step 2: Build the document
    let mut builder = SwaggerBuilder::new(&description);
    if let Some(host) = &args.host {
        builder = builder.with_host(host.clone());
    }
    if let Some(base_path) = &args.base_path {
        builder = builder.with_base_path(base_path.clone());
    }
    let document = builder.build();
    info!(
        "Swagger document built: {} paths, {} definitions",
        document.paths.len(),
        document.definitions.len()
    );

    // Step 3: Serialize to the requested format
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&document)?,
        OutputFormat::Yaml => serialize_yaml(&document)?,
    };

    // Step 4: Output to file or stdout
    if let Some(output_path) = &args.output_path {
        write_to_file(&content, output_path)?;
        info!(
            "Successfully wrote Swagger document to {}",
            output_path.display()
        );
    } else {
        println!("{}", content);
    }

    info!("Generation complete!");
    Ok(())
}
