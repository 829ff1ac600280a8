//! sortd - Batch integer-sequence sorting over HTTP, sequential or concurrent

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sortd::api::codec;
use sortd::config::Config;
use sortd::sort::{self, Strategy};
use sortd::Server;

#[derive(Parser)]
#[command(name = "sortd")]
#[command(about = "Batch integer-sequence sorting over HTTP, sequential or concurrent")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Sort a request document from a file (or stdin) and print the response
    Sort {
        /// Request JSON file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Sort each sequence on its own task
        #[arg(short, long)]
        concurrent: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment
    let _ = dotenvy::dotenv();

    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging
    let filter = if cli.verbose {
        "sortd=debug,tower_http=debug".to_string()
    } else {
        config.log_filter.clone()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command.unwrap_or(Commands::Serve { host: None, port: None }) {
        Commands::Serve { host, port } => {
            let config = config.with_overrides(host, port);

            tracing::info!("Starting HTTP server on {}", config.addr());

            let server = Server::bind(&config).await?;
            let addr = server.local_addr()?;
            let handle = server.start()?;

            println!("sortd running at http://{}", addr);
            println!("  Sequential: http://{}/process-single", addr);
            println!("  Concurrent: http://{}/process-concurrent", addr);
            println!("  API Docs:   http://{}/api/openapi.json", addr);
            println!("  Health:     http://{}/health", addr);

            let token = handle.shutdown_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Received Ctrl-C, shutting down");
                    token.cancel();
                }
            });

            handle.wait().await?;
        }

        Commands::Sort { file, concurrent } => {
            let body = match file {
                Some(path) => std::fs::read(&path)?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };

            let payload = codec::decode(&body)?;
            let strategy = if concurrent {
                Strategy::Concurrent
            } else {
                Strategy::Sequential
            };

            let response = sort::timed(strategy, &payload.to_sort).await?;
            tracing::info!(
                "Sorted {} sequences ({} elements) {} in {}ns",
                payload.to_sort.len(),
                payload.element_count(),
                strategy,
                response.time_ns
            );

            println!("{}", serde_json::to_string(&response)?);
        }
    }

    Ok(())
}
