//! Report Writer Port - Persistence of pipeline results.
//!
//! Reports are written once per run. Record order inside each report is the
//! ranking order.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{DomainError, RunId};
use crate::domain::inventory::RejectedRecord;
use crate::domain::recommendation::{RecommendationCoverage, RecommendationRecord};
use crate::domain::risk::{RiskAssessment, RiskSummary};
use crate::domain::roi::RoiAnalysis;

/// Scoring results of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub run_id: RunId,
    pub summary: RiskSummary,
    /// Most urgent High-level components, in ranking order.
    pub top_risks: Vec<RiskAssessment>,
    /// Every scored component, in ranking order.
    pub assessments: Vec<RiskAssessment>,
    pub rejected_records: Vec<RejectedRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationMetadata {
    pub run_id: RunId,
    pub provider: String,
    pub model_used: String,
    pub total_recommendations: usize,
    pub coverage: RecommendationCoverage,
}

/// Recommendation results of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationReport {
    pub metadata: RecommendationMetadata,
    pub recommendations: Vec<RecommendationRecord>,
}

#[async_trait]
pub trait ReportWriter: Send + Sync {
    async fn write_risk_report(&self, report: &RiskReport) -> Result<(), DomainError>;

    async fn write_recommendations(&self, report: &RecommendationReport)
        -> Result<(), DomainError>;

    async fn write_roi_report(&self, analysis: &RoiAnalysis) -> Result<(), DomainError>;
}
