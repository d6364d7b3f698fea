//! Inference Module
//!
//! The boundary to the hosted model: a headerless CSV line goes out, a
//! comma-separated list of scores comes back and the first one is rounded.

mod credentials;
mod sagemaker;
pub mod sigv4;

pub use credentials::{CognitoIdentity, CredentialSource, TemporaryCredentials};
pub use sagemaker::SageMakerEndpoint;

use async_trait::async_trait;

use crate::error::AssessmentError;
use crate::normalizer::NormalizedRecord;

/// A hosted model that scores one CSV feature line.
#[async_trait]
pub trait InferenceEndpoint: Send + Sync {
    /// Send the line and return the raw response body.
    async fn invoke(&self, csv_line: &str) -> Result<String, AssessmentError>;
}

/// Values joined by commas, no header, no trailing newline.
pub fn to_csv_line(record: &NormalizedRecord) -> String {
    record.values().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

/// First value of a comma-separated response, rounded half to even.
pub fn parse_prediction(body: &str) -> Result<i64, AssessmentError> {
    let first = body
        .trim()
        .split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AssessmentError::Parse("empty response body".to_string()))?;

    let score: f64 = first
        .parse()
        .map_err(|_| AssessmentError::Parse(format!("'{}' is not a number", first)))?;
    if !score.is_finite() {
        return Err(AssessmentError::Parse(format!("score {} is not finite", score)));
    }

    Ok(score.round_ties_even() as i64)
}
