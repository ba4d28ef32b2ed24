//! RiskAssessment - the scored view of one component.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{PartNumber, SupplierId};
use crate::domain::inventory::{Category, Criticality, Region, RiskExposure};

/// Composite score above which a component is High risk.
pub const HIGH_RISK_THRESHOLD: u32 = 60;

/// Composite score above which a component is Medium risk.
pub const MEDIUM_RISK_THRESHOLD: u32 = 30;

/// Risk classification derived from the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Classifies a composite score. Both boundaries are exclusive:
    /// exactly 60 is Medium and exactly 30 is Low.
    pub fn from_composite(score: Decimal) -> Self {
        if score > Decimal::from(HIGH_RISK_THRESHOLD) {
            RiskLevel::High
        } else if score > Decimal::from(MEDIUM_RISK_THRESHOLD) {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Sort key where the most severe level comes first.
    pub fn severity_rank(&self) -> u8 {
        match self {
            RiskLevel::High => 0,
            RiskLevel::Medium => 1,
            RiskLevel::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::High => "High",
            RiskLevel::Medium => "Medium",
            RiskLevel::Low => "Low",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points contributed by each scoring factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-40, from stock against reorder point and safety stock.
    pub stock_coverage: u32,
    /// 0-30, from component criticality.
    pub criticality: u32,
    /// 0-30, from lead-time volatility.
    pub volatility: u32,
    /// Sum of the three factors, capped at 100.
    pub inventory_risk_score: u32,
}

/// Scored component, as persisted in the risk report.
///
/// Carries the component fields downstream consumers need (prompting,
/// summaries, the dashboard) so it can be used without the source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub part_number: PartNumber,
    pub description: String,
    pub category: Category,
    pub criticality: Criticality,
    pub current_stock: i64,
    pub safety_stock: u32,
    pub reorder_point: u32,
    pub lead_time_days: u32,
    pub supplier_id: SupplierId,
    pub region: Region,
    pub risk_exposure: RiskExposure,
    #[serde(with = "rust_decimal::serde::float")]
    pub aog_cost_per_day: Decimal,
    pub score_breakdown: ScoreBreakdown,
    #[serde(with = "rust_decimal::serde::float")]
    pub supplier_multiplier: Decimal,
    /// Inventory score times supplier multiplier. Not re-capped, so it can
    /// exceed 100 (up to 130).
    #[serde(with = "rust_decimal::serde::float")]
    pub composite_risk_score: Decimal,
    pub risk_level: RiskLevel,
    #[serde(with = "rust_decimal::serde::float")]
    pub financial_exposure_usd: Decimal,
}

impl RiskAssessment {
    pub fn is_high_risk(&self) -> bool {
        self.risk_level == RiskLevel::High
    }

    pub fn inventory_risk_score(&self) -> u32 {
        self.score_breakdown.inventory_risk_score
    }
}
