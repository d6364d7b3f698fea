//! Normalizer
//!
//! Standardizes an Intake Record with per-field mean/scale statistics that
//! were fitted on the training population. The statistics are opaque state
//! loaded once at startup.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::AssessmentError;
use crate::intake::IntakeRecord;

/// Fitted StandardScaler attributes. The aliases accept a direct dump of
/// scikit-learn's `feature_names_in_`, `mean_` and `scale_`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScalerParams {
    #[serde(alias = "feature_names_in_")]
    pub feature_names: Vec<String>,
    #[serde(alias = "mean_")]
    pub mean: Vec<f64>,
    #[serde(alias = "scale_")]
    pub scale: Vec<f64>,
}

/// A record after standardization, still in field order.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    fields: Vec<(&'static str, f64)>,
}

impl NormalizedRecord {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.fields.iter().map(|&(_, v)| v)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.iter().find(|(n, _)| *n == name).map(|&(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl ScalerParams {
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json).context("Failed to deserialize scaler parameters")?;
        params.check()?;
        Ok(params)
    }

    /// Load and sanity-check the parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scaler parameters from {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid scaler parameters in {}", path.display()))
    }

    fn check(&self) -> Result<()> {
        let n = self.feature_names.len();
        if self.mean.len() != n || self.scale.len() != n {
            bail!(
                "expected {} means and scales, got {} and {}",
                n,
                self.mean.len(),
                self.scale.len()
            );
        }
        let mut seen = HashSet::new();
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                bail!("duplicate feature name '{}'", name);
            }
        }
        if let Some(name) = self
            .feature_names
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .find(|(_, (m, s))| !m.is_finite() || !s.is_finite())
            .map(|(name, _)| name)
        {
            bail!("non-finite statistics for feature '{}'", name);
        }
        Ok(())
    }

    /// `(x - mean) / scale` for every field, matched by name.
    ///
    /// The record's field set must equal the fitted set exactly; order does
    /// not matter. A zero scale is treated as 1, as the fitted scaler does
    /// for constant features.
    pub fn normalize(&self, record: &IntakeRecord) -> Result<NormalizedRecord, AssessmentError> {
        self.normalize_fields(record.fields())
    }

    fn normalize_fields(
        &self,
        fields: impl IntoIterator<Item = (&'static str, f64)>,
    ) -> Result<NormalizedRecord, AssessmentError> {
        let stats: HashMap<&str, (f64, f64)> = self
            .feature_names
            .iter()
            .map(String::as_str)
            .zip(self.mean.iter().copied().zip(self.scale.iter().copied()))
            .collect();

        let mut missing_stats = Vec::new();
        let mut normalized = Vec::with_capacity(stats.len());
        for (name, value) in fields {
            match stats.get(name) {
                Some(&(mean, scale)) => {
                    let scale = if scale == 0.0 { 1.0 } else { scale };
                    normalized.push((name, (value - mean) / scale));
                }
                None => missing_stats.push(name),
            }
        }

        let present: HashSet<&str> = normalized.iter().map(|&(n, _)| n).collect();
        let mut missing_fields: Vec<&str> = self
            .feature_names
            .iter()
            .map(String::as_str)
            .filter(|n| !present.contains(n))
            .collect();
        missing_fields.sort_unstable();

        if !missing_stats.is_empty() || !missing_fields.is_empty() {
            return Err(AssessmentError::Normalization(format!(
                "field set does not match fitted features (unfitted: [{}], absent: [{}])",
                missing_stats.join(", "),
                missing_fields.join(", ")
            )));
        }

        Ok(NormalizedRecord { fields: normalized })
    }
}
