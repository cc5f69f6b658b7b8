//! citemicro CLI: resolve CTS citations against a CEX corpus.
//!
//! Usage:
//!   citemicro [--config path] [--source name] [--file path] <command>
//!
//! Results print as JSON on stdout; logs go to stderr.

use clap::{Parser, Subcommand};
use citemicro::{CiteApi, ConfigError, FileFetcher, ServiceConfig, Status};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_CONFIG: &str = "config.json";

#[derive(Parser)]
#[command(
    name = "citemicro",
    version,
    about = "CTS citation resolution over CEX corpora"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to a JSON or YAML config file (defaults to ./config.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Named source, resolved under the configured cex_source prefix
    #[arg(long, global = true)]
    source: Option<String>,
    /// CEX file used as the default source, overriding test_cex_source
    #[arg(long, global = true)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Versions of the CITE services offered
    Cite,
    /// Version of the texts service
    Version,
    /// Work URNs present in the source
    Texts,
    /// First node of a work
    First { urn: String },
    /// Last node of a work
    Last { urn: String },
    /// Node before the given node
    Previous { urn: String },
    /// Node after the given node
    Next { urn: String },
    /// URNs a citation denotes, without text
    Urns { urn: String },
    /// Passage text for a citation
    Passage { urn: String },
    /// Catalog membership, or the full catalog when no URN is given
    Catalog { urn: Option<String> },
}

fn load_config(cli: &Cli) -> Result<ServiceConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => ServiceConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => ServiceConfig::load(DEFAULT_CONFIG)?,
        None => ServiceConfig::default(),
    };
    if let Some(file) = &cli.file {
        config.test_cex_source = file.to_string_lossy().to_string();
    }
    Ok(config)
}

/// Print `result` as JSON and map its status to an exit code.
fn emit<T: Serialize>(result: &T, status: Status) -> i32 {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize result: {}", e);
            return 1;
        }
    }
    match status {
        Status::Success => 0,
        Status::Exception => 1,
    }
}

async fn run(api: &CiteApi, source: Option<&str>, command: Commands) -> i32 {
    match command {
        Commands::Cite => {
            let r = api.cite_versions().await;
            emit(&r, r.status)
        }
        Commands::Version => {
            let r = api.texts_version().await;
            emit(&r, r.status)
        }
        Commands::Texts => {
            let r = api.work_urns(source).await;
            emit(&r, r.status)
        }
        Commands::First { urn } => {
            let r = api.first(source, &urn).await;
            emit(&r, r.status)
        }
        Commands::Last { urn } => {
            let r = api.last(source, &urn).await;
            emit(&r, r.status)
        }
        Commands::Previous { urn } => {
            let r = api.previous(source, &urn).await;
            emit(&r, r.status)
        }
        Commands::Next { urn } => {
            let r = api.next(source, &urn).await;
            emit(&r, r.status)
        }
        Commands::Urns { urn } => {
            let r = api.reff(source, &urn).await;
            emit(&r, r.status)
        }
        Commands::Passage { urn } => {
            let r = api.passage(source, &urn).await;
            emit(&r, r.status)
        }
        Commands::Catalog { urn } => {
            let r = api.catalog(source, urn.as_deref()).await;
            emit(&r, r.status)
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "citemicro=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: cannot start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let api = CiteApi::new(config, Arc::new(FileFetcher::new()));
    let source = cli.source.clone();
    let code = runtime.block_on(run(&api, source.as_deref(), cli.command));
    std::process::exit(code);
}
