//! Recommendation - structured mitigation advice for one component.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Root cause used when no usable analysis could be recovered.
pub const FALLBACK_ROOT_CAUSE: &str =
    "Automated analysis unavailable; this component requires manual review.";

/// Action used when no usable analysis could be recovered.
pub const FALLBACK_ACTION: &str =
    "Escalate to the supply chain planning team for a manual risk assessment.";

/// Expected ROI used when no usable analysis could be recovered.
pub const FALLBACK_EXPECTED_ROI: &str = "Unknown — manual review required.";

/// How confident the analysis is in its recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    #[serde(alias = "high", alias = "HIGH")]
    High,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "low", alias = "LOW")]
    Low,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate mitigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationOption {
    #[serde(rename = "option", alias = "name")]
    pub name: String,
    pub description: String,
    pub estimated_cost_usd: f64,
    pub implementation_time_days: f64,
    pub risk_reduction_pct: f64,
}

impl MitigationOption {
    fn validate(&self) -> Result<(), ValidationError> {
        non_negative("estimated_cost_usd", self.estimated_cost_usd)?;
        non_negative("implementation_time_days", self.implementation_time_days)?;
        non_negative("risk_reduction_pct", self.risk_reduction_pct)?;
        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::out_of_range(field, 0, "inf", value))
    }
}

/// Structured advice, either recovered from the reasoning service or
/// synthesized as the manual-review placeholder.
///
/// Every field is required when deserializing; a document missing any of
/// them does not parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub root_cause: String,
    pub mitigation_options: Vec<MitigationOption>,
    pub recommended_action: String,
    pub confidence_level: ConfidenceLevel,
    pub expected_roi: String,
}

impl Recommendation {
    /// The placeholder returned when analysis could not be recovered.
    pub fn fallback() -> Self {
        Self {
            root_cause: FALLBACK_ROOT_CAUSE.to_string(),
            mitigation_options: Vec::new(),
            recommended_action: FALLBACK_ACTION.to_string(),
            confidence_level: ConfidenceLevel::Low,
            expected_roi: FALLBACK_EXPECTED_ROI.to_string(),
        }
    }

    /// Checks the numeric invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.mitigation_options
            .iter()
            .try_for_each(MitigationOption::validate)
    }

    /// Estimated cost of the first (preferred) mitigation option.
    pub fn primary_option_cost(&self) -> Option<f64> {
        self.mitigation_options
            .first()
            .map(|option| option.estimated_cost_usd)
    }
}
