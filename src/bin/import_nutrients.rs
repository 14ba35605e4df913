// ABOUTME: Batch job importing the nutrient reference CSV into the catalog
// ABOUTME: Classifies and ranks each row, upserts it and reports a summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrient Import Binary
//!
//! Reads `nutrient.csv` (columns `id`, `name`, `unit_name`, `rank`) and upserts
//! every complete row. Individual row failures are logged and counted; only a
//! failure outside the per-row loop, such as an unreadable file, exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;
use giveas_server::{
    config::DatabaseConfig,
    constants::{defaults, service_names},
    database_plugins::{factory::Database, DatabaseProvider},
    logging::{LogFormat, LoggingConfig},
    nutrients::{import_all, read_nutrient_csv},
};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "import-nutrients")]
#[command(about = "Import the USDA nutrient reference CSV into the Giveas catalog")]
struct Args {
    /// Path of the nutrient CSV file
    #[arg(short, long, default_value = defaults::NUTRIENT_CSV_PATH)]
    file: PathBuf,

    /// Database URL, overriding `DATABASE_URL` and `DB_*`
    #[arg(long)]
    database_url: Option<String>,

    /// Log every skipped row
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    let mut log_config = LoggingConfig::from_env_for(service_names::NUTRIENT_IMPORTER);
    if log_config.format == LogFormat::Pretty {
        log_config.format = LogFormat::Compact;
    }
    if args.verbose {
        log_config.level = "debug".into();
    }
    log_config.init()?;

    let db_config = match args.database_url.as_deref() {
        Some(url) => DatabaseConfig::for_url(url)?,
        None => DatabaseConfig::from_env()?,
    };

    let database = Database::new(&db_config)
        .await
        .context("Failed to open the nutrient catalog database")?;

    let result = run_import(&database, &args.file).await;
    database.close().await;
    result
}

async fn run_import(database: &Database, file: &Path) -> Result<()> {
    info!(file = %file.display(), "Reading nutrient CSV");
    let records = read_nutrient_csv(file)?;

    let summary = import_all(database, records).await;
    info!(
        total = summary.total_considered,
        not_imported = summary.not_imported(),
        "Nutrient import finished"
    );
    Ok(())
}
