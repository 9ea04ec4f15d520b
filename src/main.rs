//! MXroute Alias Gateway Entry Point
//!
//! Loads configuration, wires the upstream client and HTTP router, and serves
//! until a shutdown signal arrives.

use mxroute_alias_gateway::run;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run().await
}
