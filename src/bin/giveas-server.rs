// ABOUTME: HTTP server binary for the Giveas API
// ABOUTME: Loads configuration, opens the database and serves until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Giveas Server Binary
//!
//! Serves liveness, the database round trip, the USDA search proxy, the food
//! availability check and the nutrient catalog.

use anyhow::Result;
use clap::Parser;
use giveas_server::{
    config::environment::ServerConfig, database_plugins::factory::Database, logging,
    resources::ServerResources, server,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "giveas-server")]
#[command(about = "Giveas API - food availability and nutrient catalog service")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Giveas API");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    info!("Database initialized: {}", database.backend_info());

    let resources = Arc::new(ServerResources::with_usda_client(
        database,
        Arc::new(config),
    )?);

    if let Err(e) = server::serve(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
