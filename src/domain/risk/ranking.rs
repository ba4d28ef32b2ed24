//! Ranking of scored components.

use std::cmp::Ordering;

use super::{RiskAssessment, RiskLevel};

/// Orders assessments most-urgent first.
///
/// Keys: risk level (High, Medium, Low), then financial exposure descending,
/// then composite score descending. The sort is stable, so full ties keep
/// their input order.
pub fn rank(mut assessments: Vec<RiskAssessment>) -> Vec<RiskAssessment> {
    assessments.sort_by(compare_urgency);
    assessments
}

fn compare_urgency(a: &RiskAssessment, b: &RiskAssessment) -> Ordering {
    a.risk_level
        .severity_rank()
        .cmp(&b.risk_level.severity_rank())
        .then_with(|| b.financial_exposure_usd.cmp(&a.financial_exposure_usd))
        .then_with(|| b.composite_risk_score.cmp(&a.composite_risk_score))
}

/// The first `n` High-level assessments of an already ranked slice.
pub fn top_risks(ranked: &[RiskAssessment], n: usize) -> Vec<&RiskAssessment> {
    ranked
        .iter()
        .filter(|assessment| assessment.risk_level == RiskLevel::High)
        .take(n)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PartNumber, SupplierId};
    use crate::domain::inventory::{Category, Criticality, Region, RiskExposure};
    use crate::domain::risk::ScoreBreakdown;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn assessment(part: &str, level: RiskLevel, exposure: Decimal, composite: Decimal) -> RiskAssessment {
        RiskAssessment {
            part_number: PartNumber::new(part).unwrap(),
            description: String::new(),
            category: Category::Hydraulics,
            criticality: Criticality::High,
            current_stock: 5,
            safety_stock: 10,
            reorder_point: 12,
            lead_time_days: 40,
            supplier_id: SupplierId::new("SUP-0001").unwrap(),
            region: Region::Europe,
            risk_exposure: RiskExposure::Low,
            aog_cost_per_day: dec!(100000),
            score_breakdown: ScoreBreakdown {
                stock_coverage: 0,
                criticality: 0,
                volatility: 0,
                inventory_risk_score: 0,
            },
            supplier_multiplier: Decimal::ONE,
            composite_risk_score: composite,
            risk_level: level,
            financial_exposure_usd: exposure,
        }
    }

    fn parts(ranked: &[RiskAssessment]) -> Vec<&str> {
        ranked.iter().map(|a| a.part_number.as_str()).collect()
    }

    #[test]
    fn high_level_comes_before_larger_medium_composite() {
        let ranked = rank(vec![
            assessment("PN-A", RiskLevel::Medium, Decimal::ZERO, dec!(59)),
            assessment("PN-B", RiskLevel::Low, Decimal::ZERO, dec!(10)),
            assessment("PN-C", RiskLevel::High, dec!(1000), dec!(61)),
        ]);

        assert_eq!(parts(&ranked), vec!["PN-C", "PN-A", "PN-B"]);
    }

    #[test]
    fn exposure_breaks_ties_within_level() {
        let ranked = rank(vec![
            assessment("PN-A", RiskLevel::High, dec!(1000), dec!(120)),
            assessment("PN-B", RiskLevel::High, dec!(5000), dec!(70)),
        ]);

        assert_eq!(parts(&ranked), vec!["PN-B", "PN-A"]);
    }

    #[test]
    fn composite_breaks_ties_on_equal_exposure() {
        let ranked = rank(vec![
            assessment("PN-A", RiskLevel::Medium, Decimal::ZERO, dec!(35)),
            assessment("PN-B", RiskLevel::Medium, Decimal::ZERO, dec!(55)),
        ]);

        assert_eq!(parts(&ranked), vec!["PN-B", "PN-A"]);
    }

    #[test]
    fn full_ties_keep_input_order() {
        let ranked = rank(vec![
            assessment("PN-A", RiskLevel::Low, Decimal::ZERO, dec!(20)),
            assessment("PN-B", RiskLevel::Low, Decimal::ZERO, dec!(20)),
            assessment("PN-C", RiskLevel::Low, Decimal::ZERO, dec!(20)),
        ]);

        assert_eq!(parts(&ranked), vec!["PN-A", "PN-B", "PN-C"]);
    }

    #[test]
    fn top_risks_only_returns_high_level() {
        let ranked = rank(vec![
            assessment("PN-A", RiskLevel::High, dec!(300), dec!(70)),
            assessment("PN-B", RiskLevel::Medium, Decimal::ZERO, dec!(50)),
            assessment("PN-C", RiskLevel::High, dec!(900), dec!(65)),
        ]);

        let top: Vec<_> = top_risks(&ranked, 10)
            .into_iter()
            .map(|a| a.part_number.as_str())
            .collect();
        assert_eq!(top, vec!["PN-C", "PN-A"]);
    }

    #[test]
    fn top_risks_respects_limit() {
        let ranked = rank(vec![
            assessment("PN-A", RiskLevel::High, dec!(300), dec!(70)),
            assessment("PN-B", RiskLevel::High, dec!(200), dec!(70)),
        ]);

        assert_eq!(top_risks(&ranked, 1).len(), 1);
        assert!(top_risks(&ranked, 0).is_empty());
    }
}
