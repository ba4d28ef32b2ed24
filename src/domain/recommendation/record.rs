//! RecommendationRecord - a recommendation keyed to the component it covers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::PartNumber;
use crate::domain::inventory::Category;
use crate::domain::risk::RiskAssessment;

use super::{FallbackReason, NormalizedRecommendation, Recommendation};

/// Component snapshot stored next to its analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSnapshot {
    pub part_number: PartNumber,
    pub description: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    pub financial_exposure_usd: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub component: ComponentSnapshot,
    pub analysis: Recommendation,
    /// True when `analysis` is the manual-review placeholder.
    pub fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
}

impl RecommendationRecord {
    pub fn new(assessment: &RiskAssessment, normalized: NormalizedRecommendation) -> Self {
        let fallback_reason = normalized.fallback_reason();
        Self {
            component: ComponentSnapshot {
                part_number: assessment.part_number.clone(),
                description: assessment.description.clone(),
                category: assessment.category,
                financial_exposure_usd: assessment.financial_exposure_usd,
            },
            analysis: normalized.into_recommendation(),
            fallback: fallback_reason.is_some(),
            fallback_reason,
        }
    }

    pub fn part_number(&self) -> &PartNumber {
        &self.component.part_number
    }
}

/// How many recommendations were requested and how many needed the fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCoverage {
    pub requested: usize,
    pub parsed: usize,
    pub fallbacks: usize,
}

impl RecommendationCoverage {
    pub fn from_records(records: &[RecommendationRecord]) -> Self {
        let fallbacks = records.iter().filter(|record| record.fallback).count();
        Self {
            requested: records.len(),
            parsed: records.len() - fallbacks,
            fallbacks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SupplierId;
    use crate::domain::inventory::{Criticality, Region, RiskExposure};
    use crate::domain::risk::{RiskLevel, ScoreBreakdown};
    use rust_decimal_macros::dec;

    fn assessment() -> RiskAssessment {
        RiskAssessment {
            part_number: PartNumber::new("PN-HYD-00010").unwrap(),
            description: "Hydraulics Component - Series B".to_string(),
            category: Category::Hydraulics,
            criticality: Criticality::High,
            current_stock: 3,
            safety_stock: 8,
            reorder_point: 10,
            lead_time_days: 45,
            supplier_id: SupplierId::new("SUP-0003").unwrap(),
            region: Region::Europe,
            risk_exposure: RiskExposure::Medium,
            aog_cost_per_day: dec!(150000),
            score_breakdown: ScoreBreakdown {
                stock_coverage: 35,
                criticality: 20,
                volatility: 15,
                inventory_risk_score: 70,
            },
            supplier_multiplier: dec!(1.1),
            composite_risk_score: dec!(77.0),
            risk_level: RiskLevel::High,
            financial_exposure_usd: dec!(6750000),
        }
    }

    #[test]
    fn parsed_record_has_no_fallback_flag() {
        let record = RecommendationRecord::new(
            &assessment(),
            NormalizedRecommendation::Parsed(Recommendation::fallback()),
        );

        assert!(!record.fallback);
        assert_eq!(record.fallback_reason, None);
        assert_eq!(record.part_number().as_str(), "PN-HYD-00010");
        assert_eq!(record.component.financial_exposure_usd, dec!(6750000));
    }

    #[test]
    fn fallback_record_keeps_reason() {
        let record = RecommendationRecord::new(
            &assessment(),
            NormalizedRecommendation::fallback(FallbackReason::ServiceUnavailable),
        );

        assert!(record.fallback);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fallback_reason"], "service_unavailable");
        assert_eq!(json["component"]["category"], "Hydraulics");
    }

    #[test]
    fn coverage_counts_fallbacks() {
        let records = vec![
            RecommendationRecord::new(
                &assessment(),
                NormalizedRecommendation::Parsed(Recommendation::fallback()),
            ),
            RecommendationRecord::new(
                &assessment(),
                NormalizedRecommendation::fallback(FallbackReason::Unparseable),
            ),
        ];

        assert_eq!(
            RecommendationCoverage::from_records(&records),
            RecommendationCoverage {
                requested: 2,
                parsed: 1,
                fallbacks: 1
            }
        );
    }
}
