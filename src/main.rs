//! Edge router service entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use clap::Parser;
use tokio::net::TcpListener;

use edge_router::cache::{MappingCache, SystemClock};
use edge_router::config::{load_config, RouterConfig};
use edge_router::edge::EdgeHandler;
use edge_router::http::HttpServer;
use edge_router::observability::{logging, metrics};
use edge_router::routing::MappingResolver;
use edge_router::store::DynamoMappingStore;

#[derive(Parser)]
#[command(name = "edge-router")]
#[command(about = "Header-driven origin router for a CDN edge layer", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "EDGE_ROUTER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("edge_router=debug,tower_http=debug");

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        region = %config.store.region,
        cache_ttl_secs = config.cache.ttl_secs,
        scan_timeout_secs = config.store.scan_timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let mut sdk_loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.store.region.clone()));
    if let Some(endpoint) = &config.store.endpoint_url {
        sdk_loader = sdk_loader.endpoint_url(endpoint.as_str());
    }
    let sdk_config = sdk_loader.load().await;
    let dynamo = aws_sdk_dynamodb::Client::new(&sdk_config);

    let store = Arc::new(DynamoMappingStore::new(
        dynamo,
        Duration::from_secs(config.store.scan_timeout_secs),
    ));
    let cache = Arc::new(MappingCache::new(
        store,
        Arc::new(SystemClock),
        Duration::from_secs(config.cache.ttl_secs),
    ));
    let handler = Arc::new(EdgeHandler::new(MappingResolver::new(cache)));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(&config, handler).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
