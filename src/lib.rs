//! StillSafe
//!
//! Pregnancy risk intake service:
//! - Intake form encoding into the model's fixed feature record
//! - Standardization with externally fitted scaler parameters
//! - Signed calls to a hosted inference endpoint
//! - Templated risk messages

pub mod assessment;
pub mod config;
pub mod error;
pub mod inference;
pub mod intake;
pub mod interpreter;
pub mod normalizer;
pub mod server;
pub mod views;

// Re-exports for convenience
pub use assessment::{Assessment, RiskAssessor};
pub use config::AppConfig;
pub use error::AssessmentError;
pub use intake::{IntakeForm, IntakeRecord};
pub use interpreter::RiskLevel;
pub use normalizer::ScalerParams;
