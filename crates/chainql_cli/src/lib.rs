//! Command-line interface for chainql.
//!
//! # Usage
//!
//! ```bash
//! # Fetch the engine's schema (session from CHAINQL_SESSION_PORT/TOKEN)
//! chainql introspect -o introspection.json
//!
//! # Or from an explicit endpoint
//! chainql introspect --url http://127.0.0.1:8080/query --token s3cr3t
//!
//! # Generate bindings
//! chainql codegen introspection.json -o src/gen
//!
//! # Generate with a custom set of chainable types
//! chainql codegen introspection.json -o src/gen --chainable Container --chainable Service
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chainql_codegen::{CodeGenerator, CodegenOptions, GeneratedFile};
use chainql_schema::Schema;
use chainql_sdk::{ClientConfig, Connection};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "chainql")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate Rust bindings from an introspection document
    Codegen {
        /// Introspection JSON file
        #[arg(required = true)]
        schema: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Object type that gets a `with(f)` combinator (repeatable)
        #[arg(long = "chainable", value_name = "TYPE")]
        chainable: Vec<String>,

        /// Rust name of the root query type
        #[arg(long, default_value = "Client")]
        client_name: String,
    },

    /// Fetch an introspection document from a running engine
    Introspect {
        /// GraphQL endpoint; defaults to the session from the environment
        #[arg(long)]
        url: Option<String>,

        /// Session token sent as the basic-auth username
        #[arg(long, env = "CHAINQL_SESSION_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Output file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Per-request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Show version information
    Version,
}

pub async fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Codegen {
            schema,
            output,
            chainable,
            client_name,
        } => {
            let mut options = CodegenOptions {
                client_name,
                ..CodegenOptions::default()
            };
            if !chainable.is_empty() {
                options.chainable_types = chainable;
            }
            let files = generate_bindings(&schema, &output, options)?;
            if !cli.quiet {
                print_summary(&files, &output, cli.verbose);
            }
            Ok(0)
        }
        Commands::Introspect {
            url,
            token,
            output,
            timeout,
        } => {
            let config = client_config(url, token, timeout)?;
            let document = introspect(config).await?;
            let json = serde_json::to_string_pretty(&document)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    if !cli.quiet {
                        println!("{} {}", "Wrote".green(), path.display());
                    }
                }
                None => println!("{json}"),
            }
            Ok(0)
        }
        Commands::Version => {
            println!("chainql {}", env!("CARGO_PKG_VERSION"));
            Ok(0)
        }
    }
}

/// Parses `schema_path`, generates every unit and writes them to `output`.
pub fn generate_bindings(
    schema_path: &Path,
    output: &Path,
    options: CodegenOptions,
) -> Result<Vec<GeneratedFile>, Box<dyn std::error::Error>> {
    let schema = Schema::from_path(schema_path)?;
    debug!(types = schema.types.len(), "parsed introspection document");

    let files = CodeGenerator::with_options(&schema, options).generate()?;
    CodeGenerator::write_to(&files, output)?;
    info!(
        files = files.len(),
        output = %output.display(),
        "generated bindings"
    );
    Ok(files)
}

/// Builds the connection settings for `introspect`.
///
/// Without `url`, the session is taken from the environment.
pub fn client_config(
    url: Option<String>,
    token: Option<String>,
    timeout: Option<u64>,
) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = match url {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::from_env()?,
    };
    if let Some(token) = token {
        config = config.basic_auth(token, None::<String>);
    }
    if let Some(secs) = timeout {
        config = config.timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

/// Connects, fetches the schema and checks that it parses.
pub async fn introspect(
    config: ClientConfig,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let connection = Connection::connect(config).await?;
    fetch_schema(&connection).await
}

async fn fetch_schema(
    connection: &Connection,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let document = connection.introspect().await?;
    let schema = Schema::from_value(document.clone())?;
    debug!(types = schema.types.len(), "introspection document parses");
    Ok(document)
}

fn print_summary(files: &[GeneratedFile], output: &Path, verbose: bool) {
    if verbose {
        for file in files {
            println!("{} {}", "Generated".green(), output.join(&file.path).display());
        }
    }
    println!(
        "{} {} files in {}",
        "Done".green().bold(),
        files.len(),
        output.display()
    );
}
