//! Risk Assessment Pipeline
//!
//! Threads one submission through encode, normalize, invoke, parse and
//! interpret. The assessor is built once at startup and shared by every
//! request.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AssessmentError;
use crate::inference::{parse_prediction, to_csv_line, InferenceEndpoint};
use crate::intake::{encode, IntakeForm, IntakeRecord};
use crate::interpreter::RiskLevel;
use crate::normalizer::ScalerParams;

#[derive(Debug, Clone)]
pub struct Assessment {
    pub record: IntakeRecord,
    pub prediction: i64,
    pub risk: RiskLevel,
    pub message: &'static str,
}

pub struct RiskAssessor {
    scaler: ScalerParams,
    endpoint: Arc<dyn InferenceEndpoint>,
}

impl RiskAssessor {
    pub fn new(scaler: ScalerParams, endpoint: Arc<dyn InferenceEndpoint>) -> Self {
        Self { scaler, endpoint }
    }

    /// Run the full pipeline. The form is expected to have passed
    /// `IntakeForm::validate`.
    pub async fn assess(&self, form: &IntakeForm) -> Result<Assessment, AssessmentError> {
        let record = encode(form)?;
        let normalized = self.scaler.normalize(&record)?;
        let line = to_csv_line(&normalized);

        let body = self.endpoint.invoke(&line).await.inspect_err(|e| {
            warn!(kind = e.kind(), "Inference call failed: {}", e);
        })?;
        let prediction = parse_prediction(&body)?;

        let risk = RiskLevel::from_rounded(prediction);
        if prediction != 0 && prediction != 1 {
            warn!(prediction, "Rounded prediction outside {{0, 1}}, reporting high risk");
        }
        info!(prediction, risk = ?risk, risk_sum = record.risk_sum, "Assessment complete");

        Ok(Assessment {
            record,
            prediction,
            risk,
            message: risk.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::FIELD_NAMES;
    use crate::interpreter::{HIGH_RISK_MESSAGE, LOW_RISK_MESSAGE};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a canned body and remembers what it was sent.
    struct CannedEndpoint {
        reply: Result<String, String>,
        seen: Mutex<Vec<String>>,
    }

    impl CannedEndpoint {
        fn new(reply: Result<&str, &str>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string).map_err(str::to_string),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl InferenceEndpoint for CannedEndpoint {
        async fn invoke(&self, csv_line: &str) -> Result<String, AssessmentError> {
            self.seen.lock().unwrap().push(csv_line.to_string());
            self.reply.clone().map_err(AssessmentError::Transport)
        }
    }

    fn scaler() -> ScalerParams {
        ScalerParams {
            feature_names: FIELD_NAMES.iter().map(|s| s.to_string()).collect(),
            mean: vec![0.0; 25],
            scale: vec![1.0; 25],
        }
    }

    #[tokio::test]
    async fn test_low_risk_path() {
        let endpoint = CannedEndpoint::new(Ok("0.12"));
        let assessor = RiskAssessor::new(scaler(), endpoint.clone());

        let result = assessor.assess(&IntakeForm::default()).await.unwrap();
        assert_eq!(result.prediction, 0);
        assert_eq!(result.risk, RiskLevel::Low);
        assert_eq!(result.message, LOW_RISK_MESSAGE);

        let seen = endpoint.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].split(',').count(), 25);
    }

    #[tokio::test]
    async fn test_high_risk_path() {
        let assessor = RiskAssessor::new(scaler(), CannedEndpoint::new(Ok("0.91,0.09")));
        let result = assessor.assess(&IntakeForm::default()).await.unwrap();
        assert_eq!(result.risk, RiskLevel::High);
        assert_eq!(result.message, HIGH_RISK_MESSAGE);
    }

    #[tokio::test]
    async fn test_transport_failure_is_surfaced() {
        let assessor = RiskAssessor::new(scaler(), CannedEndpoint::new(Err("connection reset")));
        let err = assessor.assess(&IntakeForm::default()).await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }

    #[tokio::test]
    async fn test_garbage_response_is_parse_failure() {
        let assessor = RiskAssessor::new(scaler(), CannedEndpoint::new(Ok("<html>oops</html>")));
        let err = assessor.assess(&IntakeForm::default()).await.unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test]
    async fn test_encoding_failure_never_reaches_endpoint() {
        let endpoint = CannedEndpoint::new(Ok("0"));
        let assessor = RiskAssessor::new(scaler(), endpoint.clone());
        let form = IntakeForm { delivery_month: "Thermidor".to_string(), ..Default::default() };

        let err = assessor.assess(&form).await.unwrap_err();
        assert_eq!(err.kind(), "unknown_option");
        assert!(endpoint.seen.lock().unwrap().is_empty());
    }
}
