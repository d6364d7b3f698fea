//! SageMaker runtime endpoint, signed with temporary credentials.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::sigv4::SigningRequest;
use super::{CredentialSource, InferenceEndpoint, TemporaryCredentials};
use crate::error::AssessmentError;

const SERVICE: &str = "sagemaker";
const CSV: &str = "text/csv";

pub struct SageMakerEndpoint {
    client: Client,
    url: Url,
    host: String,
    region: String,
    source: Arc<dyn CredentialSource>,
    cached: RwLock<Option<TemporaryCredentials>>,
}

impl SageMakerEndpoint {
    pub fn runtime_url(region: &str) -> String {
        format!("https://runtime.sagemaker.{}.amazonaws.com", region)
    }

    pub fn new(
        runtime_url: &str,
        region: impl Into<String>,
        endpoint_name: &str,
        source: Arc<dyn CredentialSource>,
    ) -> Result<Self> {
        let url = Url::parse(&format!(
            "{}/endpoints/{}/invocations",
            runtime_url.trim_end_matches('/'),
            urlencoding::encode(endpoint_name)
        ))
        .with_context(|| format!("Invalid inference runtime URL '{}'", runtime_url))?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => anyhow::bail!("Inference runtime URL '{}' has no host", runtime_url),
        };

        Ok(Self {
            client: Client::new(),
            url,
            host,
            region: region.into(),
            source,
            cached: RwLock::new(None),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Cached credentials, re-fetched when missing or about to expire.
    pub async fn credentials(&self) -> Result<TemporaryCredentials, AssessmentError> {
        let now = Utc::now();
        {
            let cached = self.cached.read().await;
            if let Some(creds) = (*cached).as_ref().filter(|c| c.is_fresh(now)) {
                return Ok(creds.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(creds) = (*cached).as_ref().filter(|c| c.is_fresh(now)) {
            return Ok(creds.clone());
        }

        info!("Fetching temporary credentials for the inference endpoint");
        let creds = self.source.fetch().await?;
        *cached = Some(creds.clone());
        Ok(creds)
    }
}

#[async_trait]
impl InferenceEndpoint for SageMakerEndpoint {
    async fn invoke(&self, csv_line: &str) -> Result<String, AssessmentError> {
        let credentials = self.credentials().await?;

        let signed = SigningRequest {
            method: "POST",
            host: &self.host,
            path: self.url.path(),
            content_type: CSV,
            body: csv_line.as_bytes(),
            region: &self.region,
            service: SERVICE,
        }
        .sign(&credentials, Utc::now());

        debug!("Invoking {} with {} bytes", self.url, csv_line.len());

        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, CSV)
            .header("X-Amz-Date", &signed.amz_date)
            .header("X-Amz-Content-Sha256", &signed.content_sha256)
            .header("X-Amz-Security-Token", &signed.security_token)
            .header(AUTHORIZATION, &signed.authorization)
            .body(csv_line.to_string())
            .send()
            .await
            .map_err(|e| AssessmentError::Transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AssessmentError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(AssessmentError::Transport(format!(
                "endpoint returned {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            )));
        }

        String::from_utf8(bytes.to_vec())
            .map_err(|e| AssessmentError::Parse(format!("response is not UTF-8: {}", e)))
    }
}
