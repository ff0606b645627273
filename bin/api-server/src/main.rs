//! API server binary

use std::net::SocketAddr;

use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use server::run;
use tracing_subscriber::filter::EnvFilter;
use warehouse::{ClickhouseReader, ConnectionParams};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    let opts = Opts::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let params = ConnectionParams::from(opts.warehouse);
    let reader = ClickhouseReader::connect(params).await.inspect_err(|e| {
        tracing::error!(error = %e, "Could not connect to the warehouse");
    })?;
    tracing::info!(
        database = reader.context().database(),
        schema = reader.context().schema(),
        "Connected to warehouse"
    );

    let addr: SocketAddr = format!("{}:{}", opts.api.host, opts.api.port).parse()?;
    run(addr, reader, opts.api.allowed_origins).await
}
