//! Hostfacts CLI - Hardware/OS inventory over the host's scripting interpreter
//! Composition root: wires the interpreter adapters to the facet catalog

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hostfacts_core::application::{Execution, FacetQuery};
use hostfacts_core::domain::catalog::{self, FACETS};
use hostfacts_core::port::time_provider::SystemTimeProvider;
use hostfacts_infra_shell::{ShellConfig, ShellRunner, ShellSession};

#[derive(Parser)]
#[command(name = "hostfacts")]
#[command(about = "Hardware and OS inventory via the host's scripting interpreter", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Interpreter to shell out to (`powershell` | `sh`; default: host native)
    #[arg(long, env = "HOSTFACTS_SHELL")]
    shell: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the facet catalog
    List,

    /// Query one facet and print its records as JSON
    Get {
        /// Facet name (see `hostfacts list`)
        facet: String,

        /// Wall-clock deadline in seconds (default: auto-managed deadline)
        #[arg(short, long)]
        timeout: Option<i64>,
    },

    /// Query every facet over one shared interpreter session
    All {
        /// Print full records as JSON instead of the summary table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Tabled)]
struct FacetRow {
    name: &'static str,
    class: &'static str,
}

#[derive(Tabled)]
struct SummaryRow {
    facet: String,
    records: String,
    status: String,
}

fn init_logging() {
    let log_format = std::env::var("HOSTFACTS_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("hostfacts=info"))
        .expect("Failed to create env filter");

    // Records go to stdout; diagnostics stay on stderr.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}

async fn values_of<T>(query: FacetQuery<T>, exec: Execution<'_>) -> Result<Vec<Value>>
where
    T: DeserializeOwned + Serialize,
{
    let records = query.all(exec).await?;
    let mut values = Vec::with_capacity(records.len());
    for record in &records {
        values.push(serde_json::to_value(record)?);
    }
    Ok(values)
}

async fn fetch_facet(name: &str, exec: Execution<'_>) -> Result<Vec<Value>> {
    let values = match name {
        "bios" => values_of(catalog::bios(), exec).await?,
        "baseboard" => values_of(catalog::baseboard(), exec).await?,
        "computer-system" => values_of(catalog::computer_system(), exec).await?,
        "os" => values_of(catalog::operating_system(), exec).await?,
        "processor" => values_of(catalog::processor(), exec).await?,
        "memory" => values_of(catalog::physical_memory(), exec).await?,
        "disk" => values_of(catalog::disk_drive(), exec).await?,
        "logical-disk" => values_of(catalog::logical_disk(), exec).await?,
        "network-adapter" => values_of(catalog::network_adapter(), exec).await?,
        "video-controller" => values_of(catalog::video_controller(), exec).await?,
        other => anyhow::bail!("unknown facet: {other} (see `hostfacts list`)"),
    };
    Ok(values)
}

async fn run_all(config: &ShellConfig, json: bool) -> Result<()> {
    let mut session = ShellSession::open(config)?;
    let mut rows = Vec::with_capacity(FACETS.len());
    let mut dump = serde_json::Map::new();

    for facet in FACETS {
        match fetch_facet(facet.name, Execution::Session(&mut session)).await {
            Ok(values) => {
                rows.push(SummaryRow {
                    facet: facet.name.to_string(),
                    records: values.len().to_string(),
                    status: "ok".green().to_string(),
                });
                dump.insert(facet.name.to_string(), Value::Array(values));
            }
            Err(e) => {
                rows.push(SummaryRow {
                    facet: facet.name.to_string(),
                    records: "-".to_string(),
                    status: e.to_string().red().to_string(),
                });
            }
        }
    }
    session.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&Value::Object(dump))?);
    } else {
        println!("{}", Table::new(rows));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = match cli.shell.as_deref() {
        Some("powershell") => ShellConfig::powershell(),
        Some("sh") => ShellConfig::sh(),
        Some(other) => anyhow::bail!("unknown shell: {other} (expected `powershell` or `sh`)"),
        None => ShellConfig::default(),
    };
    info!(version = hostfacts_core::VERSION, program = %config.program, "hostfacts starting");

    match cli.command {
        Commands::List => {
            let rows: Vec<FacetRow> = FACETS
                .iter()
                .map(|f| FacetRow {
                    name: f.name,
                    class: f.class,
                })
                .collect();
            println!("{}", Table::new(rows));
        }

        Commands::Get { facet, timeout } => {
            let runner = ShellRunner::new(config.clone(), Arc::new(SystemTimeProvider));
            let exec = match timeout {
                Some(timeout_secs) => Execution::Bounded {
                    runner: &runner,
                    timeout_secs,
                },
                None => Execution::OneShot { runner: &runner },
            };
            let values = fetch_facet(&facet, exec).await?;
            println!("{}", serde_json::to_string_pretty(&values)?);
        }

        Commands::All { json } => run_all(&config, json).await?,
    }

    Ok(())
}
