use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use std::path::PathBuf;

use crate::config::watch_config::WatchConfig;
use crate::logger::init_logger;
use crate::services::watch_service::WatchService;

mod config;
mod logger;
mod models;
mod services;
#[cfg(test)]
mod tests;

/// Monitor de slots de pickup / delivery de supermercado (SF Bay Area)
#[derive(Debug, Parser)]
#[command(name = "slot_watcher", version)]
struct Cli {
    /// Archivo de configuración JSON
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Modo prueba: un solo ciclo y el resumen va al log, no por email
    #[arg(short, long)]
    test: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    init_logger();

    let cli = Cli::parse();
    let config = WatchConfig::load(&cli.config)
        .with_context(|| format!("No se pudo cargar la configuración {:?}", cli.config))?;

    let watcher = WatchService::new(config).context("No se pudo inicializar el watcher")?;

    if cli.test {
        log::info!("Modo prueba: un solo ciclo, sin envío de email");
        watcher.run_once().await
    } else {
        watcher.run_forever().await
    }
}
