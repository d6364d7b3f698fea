//! Configuration
//!
//! Read from the environment (a `.env` file is loaded first by the binary).

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_IDENTITY_POOL_ID: &str = "us-east-1:2ac8666d-0dab-4ad1-8584-fb59e6d5da4c";
pub const DEFAULT_ENDPOINT_NAME: &str = "xgboost-2024-12-09-23-51-46-022";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Address the web server listens on
    pub bind_addr: SocketAddr,
    pub region: String,
    /// Cognito identity pool handing out inference credentials
    pub identity_pool_id: String,
    /// Name of the deployed model endpoint
    pub endpoint_name: String,
    /// Fitted normalization parameters (JSON)
    pub scaler_path: PathBuf,
    /// Override for the Cognito Identity base URL
    pub cognito_url: Option<String>,
    /// Override for the SageMaker runtime base URL
    pub runtime_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8501)),
            region: DEFAULT_REGION.to_string(),
            identity_pool_id: DEFAULT_IDENTITY_POOL_ID.to_string(),
            endpoint_name: DEFAULT_ENDPOINT_NAME.to_string(),
            scaler_path: PathBuf::from("scaler.json"),
            cognito_url: None,
            runtime_url: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("STILLSAFE_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("STILLSAFE_BIND_ADDR '{}' is not a socket address", addr))?;
        }
        if let Some(region) = get("STILLSAFE_REGION") {
            config.region = region;
        }
        if let Some(pool) = get("STILLSAFE_IDENTITY_POOL_ID") {
            config.identity_pool_id = pool;
        }
        if let Some(name) = get("STILLSAFE_ENDPOINT_NAME") {
            config.endpoint_name = name;
        }
        if let Some(path) = get("STILLSAFE_SCALER_PATH") {
            config.scaler_path = PathBuf::from(path);
        }
        config.cognito_url = get("STILLSAFE_COGNITO_URL");
        config.runtime_url = get("STILLSAFE_RUNTIME_URL");

        Ok(config)
    }
}
