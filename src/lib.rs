pub mod cli;
pub mod core;
pub mod providers;
pub mod server;
pub mod service;

use crate::core::config::AppConfig;
use crate::providers::EodhdProvider;
use crate::service::{CompareRequest, ComparisonService};
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Serve {
        bind: Option<String>,
    },
    Compare {
        symbol1: String,
        symbol2: String,
        start: Option<String>,
        end: Option<String>,
        json: bool,
    },
}

/// Wires the configured market-data provider into a comparison service.
pub fn build_service(config: &AppConfig) -> Result<ComparisonService> {
    let provider = EodhdProvider::new(
        &config.provider.base_url,
        &config.provider.exchange,
        SecretString::new(config.api_token()?.expose_secret().into()),
        config.provider.timeout(),
    )?;
    Ok(ComparisonService::new(Arc::new(provider)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    debug!("Loaded config: {config:#?}");

    let service = build_service(&config)?;

    match command {
        AppCommand::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.server.bind.clone());
            info!("stockcmp starting...");
            server::serve(&bind, Arc::new(service)).await
        }
        AppCommand::Compare {
            symbol1,
            symbol2,
            start,
            end,
            json,
        } => {
            let request =
                CompareRequest::parse(&symbol1, &symbol2, start.as_deref(), end.as_deref())?;
            cli::compare::run(&service, &request, json).await
        }
    }
}
