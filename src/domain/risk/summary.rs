//! Executive risk summary over a scored inventory.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Timestamp;

use super::{RiskAssessment, RiskLevel};

/// How many categories and regions the summary lists.
pub const TOP_GROUPS: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub high_risk: usize,
    pub medium_risk: usize,
    pub low_risk: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_exposure_usd: Decimal,
    /// Absent when no component is High risk.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub avg_exposure_per_high_risk_component: Option<Decimal>,
}

/// A label with the number of high-risk components carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub analysis_timestamp: Timestamp,
    pub total_components_analyzed: usize,
    pub rejected_records: usize,
    pub risk_distribution: RiskDistribution,
    pub financial_metrics: FinancialMetrics,
    pub top_risk_categories: Vec<GroupCount>,
    pub top_risk_regions: Vec<GroupCount>,
}

impl RiskSummary {
    pub fn from_assessments(
        assessments: &[RiskAssessment],
        rejected_records: usize,
        analysis_timestamp: Timestamp,
    ) -> Self {
        let mut distribution = RiskDistribution::default();
        let mut total_exposure = Decimal::ZERO;
        let mut high_exposure = Decimal::ZERO;

        for assessment in assessments {
            total_exposure = total_exposure.saturating_add(assessment.financial_exposure_usd);
            match assessment.risk_level {
                RiskLevel::High => {
                    distribution.high_risk += 1;
                    high_exposure = high_exposure.saturating_add(assessment.financial_exposure_usd);
                }
                RiskLevel::Medium => distribution.medium_risk += 1,
                RiskLevel::Low => distribution.low_risk += 1,
            }
        }

        let avg_exposure_per_high_risk_component = if distribution.high_risk == 0 {
            None
        } else {
            Some(high_exposure / Decimal::from(distribution.high_risk))
        };

        let high_risk = || assessments.iter().filter(|a| a.is_high_risk());

        Self {
            analysis_timestamp,
            total_components_analyzed: assessments.len(),
            rejected_records,
            risk_distribution: distribution,
            financial_metrics: FinancialMetrics {
                total_exposure_usd: total_exposure,
                avg_exposure_per_high_risk_component,
            },
            top_risk_categories: top_groups(high_risk().map(|a| a.category.as_str())),
            top_risk_regions: top_groups(high_risk().map(|a| a.region.as_str())),
        }
    }

    /// Total exposure across every analyzed component.
    pub fn total_exposure(&self) -> Decimal {
        self.financial_metrics.total_exposure_usd
    }
}

/// Counts labels, most frequent first; equal counts sort by label.
fn top_groups<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<GroupCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(label, count)| GroupCount {
            label: label.to_string(),
            count,
        })
        .collect();
    // BTreeMap iteration is already label-ordered; a stable sort keeps it
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(TOP_GROUPS);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PartNumber, SupplierId};
    use crate::domain::inventory::{Category, Criticality, Region, RiskExposure};
    use crate::domain::risk::ScoreBreakdown;
    use rust_decimal_macros::dec;

    fn assessment(level: RiskLevel, category: Category, region: Region, exposure: Decimal) -> RiskAssessment {
        RiskAssessment {
            part_number: PartNumber::new("PN-X").unwrap(),
            description: String::new(),
            category,
            criticality: Criticality::Critical,
            current_stock: 0,
            safety_stock: 10,
            reorder_point: 12,
            lead_time_days: 30,
            supplier_id: SupplierId::new("SUP-0001").unwrap(),
            region,
            risk_exposure: RiskExposure::High,
            aog_cost_per_day: dec!(100000),
            score_breakdown: ScoreBreakdown {
                stock_coverage: 40,
                criticality: 30,
                volatility: 30,
                inventory_risk_score: 100,
            },
            supplier_multiplier: dec!(1.3),
            composite_risk_score: dec!(130),
            risk_level: level,
            financial_exposure_usd: exposure,
        }
    }

    #[test]
    fn counts_levels_and_exposure() {
        let assessments = vec![
            assessment(RiskLevel::High, Category::Engine, Region::Europe, dec!(3000000)),
            assessment(RiskLevel::High, Category::Avionics, Region::Europe, dec!(1000000)),
            assessment(RiskLevel::Medium, Category::Engine, Region::Europe, Decimal::ZERO),
            assessment(RiskLevel::Low, Category::Engine, Region::Europe, Decimal::ZERO),
        ];

        let summary = RiskSummary::from_assessments(&assessments, 3, Timestamp::now());

        assert_eq!(summary.total_components_analyzed, 4);
        assert_eq!(summary.rejected_records, 3);
        assert_eq!(
            summary.risk_distribution,
            RiskDistribution {
                high_risk: 2,
                medium_risk: 1,
                low_risk: 1
            }
        );
        assert_eq!(summary.total_exposure(), dec!(4000000));
        assert_eq!(
            summary.financial_metrics.avg_exposure_per_high_risk_component,
            Some(dec!(2000000))
        );
    }

    #[test]
    fn average_is_absent_without_high_risk() {
        let assessments = vec![assessment(
            RiskLevel::Low,
            Category::Engine,
            Region::Europe,
            Decimal::ZERO,
        )];

        let summary = RiskSummary::from_assessments(&assessments, 0, Timestamp::now());

        assert_eq!(summary.financial_metrics.avg_exposure_per_high_risk_component, None);
        assert!(summary.top_risk_categories.is_empty());
    }

    #[test]
    fn groups_only_count_high_risk_and_break_ties_by_name() {
        let assessments = vec![
            assessment(RiskLevel::High, Category::Hydraulics, Region::NorthAmerica, dec!(1)),
            assessment(RiskLevel::High, Category::Engine, Region::AsiaPacific, dec!(1)),
            assessment(RiskLevel::High, Category::Hydraulics, Region::AsiaPacific, dec!(1)),
            assessment(RiskLevel::Medium, Category::Avionics, Region::Europe, Decimal::ZERO),
            assessment(RiskLevel::Medium, Category::Avionics, Region::Europe, Decimal::ZERO),
        ];

        let summary = RiskSummary::from_assessments(&assessments, 0, Timestamp::now());

        let categories: Vec<_> = summary
            .top_risk_categories
            .iter()
            .map(|g| (g.label.as_str(), g.count))
            .collect();
        assert_eq!(categories, vec![("Hydraulics", 2), ("Engine", 1)]);

        let regions: Vec<_> = summary
            .top_risk_regions
            .iter()
            .map(|g| (g.label.as_str(), g.count))
            .collect();
        assert_eq!(regions, vec![("Asia-Pacific", 2), ("North America", 1)]);
    }

    #[test]
    fn groups_are_limited_to_five() {
        let categories = [
            Category::Engine,
            Category::Avionics,
            Category::Hydraulics,
            Category::LandingGear,
            Category::CabinSystems,
            Category::Electrical,
            Category::Structural,
        ];
        let assessments: Vec<_> = categories
            .iter()
            .map(|c| assessment(RiskLevel::High, *c, Region::Europe, dec!(1)))
            .collect();

        let summary = RiskSummary::from_assessments(&assessments, 0, Timestamp::now());

        assert_eq!(summary.top_risk_categories.len(), TOP_GROUPS);
        assert_eq!(summary.top_risk_categories[0].label, "Avionics");
    }

    #[test]
    fn exposure_totals_saturate() {
        let assessments = vec![
            assessment(RiskLevel::High, Category::Engine, Region::Europe, Decimal::MAX),
            assessment(RiskLevel::High, Category::Engine, Region::Europe, Decimal::MAX),
        ];

        let summary = RiskSummary::from_assessments(&assessments, 0, Timestamp::now());

        assert_eq!(summary.total_exposure(), Decimal::MAX);
        assert_eq!(
            summary.financial_metrics.avg_exposure_per_high_risk_component,
            Some(Decimal::MAX / dec!(2))
        );
    }

    #[test]
    fn empty_input_produces_zeroes() {
        let summary = RiskSummary::from_assessments(&[], 0, Timestamp::now());

        assert_eq!(summary.total_components_analyzed, 0);
        assert_eq!(summary.total_exposure(), Decimal::ZERO);
        assert_eq!(summary.risk_distribution, RiskDistribution::default());
    }
}
