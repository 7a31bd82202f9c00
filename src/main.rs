use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

use javadoc_mcp::cache::constants::DEFAULT_EVICTION_INTERVAL;
use javadoc_mcp::meta::HttpMetadataSource;
use javadoc_mcp::search::tools::{SearchJavadocParams, SearchTools};
use javadoc_mcp::{JavadocSearch, JavadocService};

/// MCP server for searching Java API documentation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root URL of the published documentation; metadata is read from `{base}/meta/`
    #[arg(long, env = "JAVADOC_MCP_BASE_URL")]
    base_url: String,

    /// Seconds between wholesale evictions of the metadata cache
    #[arg(
        long,
        env = "JAVADOC_MCP_CACHE_INTERVAL",
        default_value_t = DEFAULT_EVICTION_INTERVAL.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    cache_interval_secs: u64,

    /// Timeout for each metadata request, in seconds
    #[arg(
        long,
        env = "JAVADOC_MCP_REQUEST_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    request_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single search and print the result as JSON
    Search {
        /// Class and/or member to look up, e.g. `Map#put`
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing to stderr to avoid conflicts with stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cache_interval = Duration::from_secs(args.cache_interval_secs);
    let request_timeout = args.request_timeout_secs.map(Duration::from_secs);

    if let Some(command) = args.command {
        return handle_command(command, &args.base_url, cache_interval, request_timeout).await;
    }

    tracing::info!("Starting Javadoc MCP server on stdio for {}", args.base_url);

    let javadoc_service = JavadocService::new(&args.base_url, cache_interval, request_timeout)?;

    // Serve using stdio transport
    let service = javadoc_service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}

async fn handle_command(
    command: Commands,
    base_url: &str,
    cache_interval: Duration,
    request_timeout: Option<Duration>,
) -> Result<()> {
    match command {
        Commands::Search { query } => {
            let source = HttpMetadataSource::new(base_url, request_timeout)
                .context("Failed to create metadata source")?;
            let search = Arc::new(JavadocSearch::new(source, cache_interval));
            let tools = SearchTools::new(search, base_url);
            println!("{}", tools.search_javadoc(SearchJavadocParams { query }).await);
            Ok(())
        }
    }
}
