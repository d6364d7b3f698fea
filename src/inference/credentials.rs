//! Credential Exchange
//!
//! Trades a fixed identity pool id for short-lived AWS credentials through
//! Cognito Identity (`GetId`, then `GetCredentialsForIdentity`).

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::fmt;
use tracing::debug;

use crate::error::AssessmentError;

/// Credentials closer than this to expiry are treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone, PartialEq)]
pub struct TemporaryCredentials {
    pub access_key_id: String,
    pub secret_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

impl TemporaryCredentials {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.expiration {
            Some(expiration) => now + Duration::seconds(EXPIRY_MARGIN_SECS) < expiration,
            None => true,
        }
    }
}

impl fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &"<redacted>")
            .field("session_token", &"<redacted>")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// Anything that can hand out temporary credentials.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn fetch(&self) -> Result<TemporaryCredentials, AssessmentError>;
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetIdResponse {
    identity_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetCredentialsResponse {
    credentials: CognitoCredentials,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct CognitoCredentials {
    access_key_id: String,
    secret_key: String,
    session_token: String,
    /// Epoch seconds
    expiration: Option<f64>,
}

pub struct CognitoIdentity {
    client: Client,
    base_url: String,
    identity_pool_id: String,
}

impl CognitoIdentity {
    pub fn new(region: &str, identity_pool_id: impl Into<String>) -> Self {
        Self::with_base_url(format!("https://cognito-identity.{}.amazonaws.com/", region), identity_pool_id)
    }

    pub fn with_base_url(base_url: impl Into<String>, identity_pool_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            identity_pool_id: identity_pool_id.into(),
        }
    }

    async fn call<T: DeserializeOwned>(&self, action: &str, body: serde_json::Value) -> Result<T, AssessmentError> {
        debug!("Cognito Identity call: {}", action);

        let response = self
            .client
            .post(&self.base_url)
            .header(CONTENT_TYPE, "application/x-amz-json-1.1")
            .header("X-Amz-Target", format!("AWSCognitoIdentityService.{}", action))
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| AssessmentError::Credential(format!("{} request failed: {}", action, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssessmentError::Credential(format!("{} response unreadable: {}", action, e)))?;
        if !status.is_success() {
            return Err(AssessmentError::Credential(format!("{} returned {}: {}", action, status, text)));
        }

        serde_json::from_str(&text)
            .map_err(|e| AssessmentError::Credential(format!("{} response malformed: {}", action, e)))
    }
}

#[async_trait]
impl CredentialSource for CognitoIdentity {
    async fn fetch(&self) -> Result<TemporaryCredentials, AssessmentError> {
        let id: GetIdResponse = self
            .call("GetId", json!({ "IdentityPoolId": self.identity_pool_id }))
            .await?;

        let res: GetCredentialsResponse = self
            .call("GetCredentialsForIdentity", json!({ "IdentityId": id.identity_id }))
            .await?;

        let c = res.credentials;
        let expiration = c
            .expiration
            .and_then(|secs| Utc.timestamp_opt(secs.trunc() as i64, 0).single());

        Ok(TemporaryCredentials {
            access_key_id: c.access_key_id,
            secret_key: c.secret_key,
            session_token: c.session_token,
            expiration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(expiration: Option<DateTime<Utc>>) -> TemporaryCredentials {
        TemporaryCredentials {
            access_key_id: "ASIA".to_string(),
            secret_key: "secret".to_string(),
            session_token: "session".to_string(),
            expiration,
        }
    }

    #[test]
    fn test_freshness_margin() {
        let now = Utc::now();
        assert!(credentials(None).is_fresh(now));
        assert!(credentials(Some(now + Duration::minutes(30))).is_fresh(now));
        assert!(!credentials(Some(now + Duration::seconds(30))).is_fresh(now));
        assert!(!credentials(Some(now - Duration::minutes(1))).is_fresh(now));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", credentials(None));
        assert!(rendered.contains("ASIA"));
        assert!(!rendered.contains("secret\""));
        assert!(!rendered.contains("session\""));
    }

    #[test]
    fn test_parse_cognito_credentials() {
        let body = r#"{"IdentityId":"us-east-1:abc","Credentials":{"AccessKeyId":"AK","SecretKey":"SK","SessionToken":"ST","Expiration":1.7337921E9}}"#;
        let res: GetCredentialsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(res.credentials.access_key_id, "AK");
        assert_eq!(res.credentials.expiration, Some(1_733_792_100.0));
    }

    #[tokio::test]
    async fn test_unreachable_broker_is_credential_failure() {
        // Port 9 (discard) on localhost is not expected to be serving HTTP
        let broker = CognitoIdentity::with_base_url("http://127.0.0.1:9/", "pool");
        let err = broker.fetch().await.unwrap_err();
        assert_eq!(err.kind(), "credential");
    }
}
