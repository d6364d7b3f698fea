//! StillSafe
//!
//! Serves the intake pages and runs risk assessments against the hosted
//! model endpoint.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stillsafe::inference::{CognitoIdentity, CredentialSource, SageMakerEndpoint};
use stillsafe::server::{run_server, AppState};
use stillsafe::{AppConfig, RiskAssessor, ScalerParams};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("stillsafe=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();

    let config = AppConfig::from_env()?;
    info!(
        region = %config.region,
        endpoint = %config.endpoint_name,
        scaler = %config.scaler_path.display(),
        "Starting StillSafe"
    );

    let scaler = ScalerParams::load(&config.scaler_path)?;
    info!("Scaler loaded with {} features", scaler.feature_names.len());

    let broker: Arc<dyn CredentialSource> = Arc::new(match &config.cognito_url {
        Some(url) => CognitoIdentity::with_base_url(url.clone(), config.identity_pool_id.clone()),
        None => CognitoIdentity::new(&config.region, config.identity_pool_id.clone()),
    });

    let runtime_url = config
        .runtime_url
        .clone()
        .unwrap_or_else(|| SageMakerEndpoint::runtime_url(&config.region));
    let endpoint = SageMakerEndpoint::new(&runtime_url, config.region.clone(), &config.endpoint_name, broker)
        .context("Failed to configure inference endpoint")?;

    // Fetch credentials up front so a misconfigured pool shows in the log at
    // startup; the endpoint fetches again on first use if this fails.
    if let Err(e) = endpoint.credentials().await {
        warn!("Initial credential exchange failed: {}", e);
    }

    let state = AppState {
        assessor: Arc::new(RiskAssessor::new(scaler, Arc::new(endpoint))),
    };

    run_server(state, config.bind_addr).await
}
