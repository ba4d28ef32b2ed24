//! Risk module - scoring, ranking, and summarizing inventory risk.
//!
//! Scoring is pure and synchronous: a [`RiskScorer`] turns one validated
//! component and its supplier into a [`RiskAssessment`]. Ranking and the
//! [`RiskSummary`] operate on the resulting slice.

mod assessment;
mod ranking;
mod scoring;
mod summary;

pub use assessment::{
    RiskAssessment, RiskLevel, ScoreBreakdown, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD,
};
pub use ranking::{rank, top_risks};
pub use scoring::{RiskScorer, MAX_INVENTORY_RISK_SCORE};
pub use summary::{FinancialMetrics, GroupCount, RiskDistribution, RiskSummary, TOP_GROUPS};
