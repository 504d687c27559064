//! Seeds the mapping table with version routing rules.
//!
//! One item per supported version:
//! `hk` = selector header value, `dn` = target domain, `dp` = optional path.
//!
//! ```text
//! seed-mappings --table vers \
//!     --mapping v1=origin-a.example.com/v1 \
//!     --mapping v2=origin-b.example.com
//! ```

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::types::AttributeValue;
use clap::Parser;

use edge_router::observability::logging;
use edge_router::store::VersionMapping;

#[derive(Parser)]
#[command(name = "seed-mappings")]
#[command(about = "Write version mappings into the remote mapping table", long_about = None)]
struct Cli {
    /// Mapping table name.
    #[arg(short, long, env = "MAPPINGS_TABLE")]
    table: String,

    /// AWS region hosting the table.
    #[arg(short, long, env = "AWS_REGION", default_value = "us-east-1")]
    region: String,

    /// Optional endpoint override (e.g., local DynamoDB).
    #[arg(long, env = "MAPPINGS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Mapping in the form `selector=domain[/path]`. Repeatable.
    #[arg(long = "mapping", value_parser = parse_mapping, required = true)]
    mappings: Vec<VersionMapping>,
}

/// Parse `selector=domain[/path]` into a mapping.
fn parse_mapping(raw: &str) -> Result<VersionMapping, String> {
    let (selector, target) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected selector=domain[/path], got '{raw}'"))?;
    if selector.is_empty() {
        return Err(format!("empty selector in '{raw}'"));
    }
    let (domain, path) = match target.find('/') {
        Some(idx) => (&target[..idx], Some(target[idx..].to_string())),
        None => (target, None),
    };
    if domain.is_empty() {
        return Err(format!("empty target domain in '{raw}'"));
    }
    Ok(VersionMapping {
        selector: selector.to_string(),
        target_domain: domain.to_string(),
        target_path: path,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("seed_mappings=info");

    let cli = Cli::parse();

    let mut sdk_loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(cli.region.clone()));
    if let Some(endpoint) = &cli.endpoint_url {
        sdk_loader = sdk_loader.endpoint_url(endpoint.as_str());
    }
    let sdk_config = sdk_loader.load().await;
    let client = aws_sdk_dynamodb::Client::new(&sdk_config);

    for mapping in &cli.mappings {
        let mut put = client
            .put_item()
            .table_name(&cli.table)
            .item("hk", AttributeValue::S(mapping.selector.clone()))
            .item("dn", AttributeValue::S(mapping.target_domain.clone()));
        if let Some(path) = &mapping.target_path {
            put = put.item("dp", AttributeValue::S(path.clone()));
        }
        put.send().await?;
        tracing::info!(
            table = %cli.table,
            selector = %mapping.selector,
            target_domain = %mapping.target_domain,
            target_path = mapping.target_path.as_deref().unwrap_or(""),
            "Mapping written"
        );
    }

    tracing::info!(count = cli.mappings.len(), "Seeding complete");
    Ok(())
}
