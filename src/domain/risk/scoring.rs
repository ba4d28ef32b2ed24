//! Risk Scorer - point-based inventory risk with a supplier multiplier.

use rust_decimal::Decimal;

use crate::domain::inventory::{Component, Criticality, LeadTimeVolatility, RiskExposure, Supplier};

use super::{RiskAssessment, RiskLevel, ScoreBreakdown};

/// Upper bound of the inventory risk score.
pub const MAX_INVENTORY_RISK_SCORE: u32 = 100;

/// Stateless scorer for (component, supplier) pairs.
///
/// Scoring factors:
///
/// | Factor          | Range | Source                                   |
/// |-----------------|-------|------------------------------------------|
/// | Stock coverage  | 0-40  | current stock vs reorder point / safety  |
/// | Criticality     | 5-30  | component criticality                    |
/// | Volatility      | 5-30  | lead-time volatility                     |
///
/// The capped sum is scaled by the supplier multiplier (1.0 / 1.1 / 1.3).
pub struct RiskScorer;

impl RiskScorer {
    /// Scores one component against its supplier.
    ///
    /// Pure: no I/O, inputs are only borrowed.
    pub fn score(component: &Component, supplier: &Supplier) -> RiskAssessment {
        let stock_coverage = Self::stock_coverage_points(component);
        let criticality = Self::criticality_points(component.criticality);
        let volatility = Self::volatility_points(component.lead_time_volatility);
        let inventory_risk_score =
            (stock_coverage + criticality + volatility).min(MAX_INVENTORY_RISK_SCORE);

        let supplier_multiplier = Self::supplier_multiplier(supplier.risk_exposure);
        let composite_risk_score = Decimal::from(inventory_risk_score) * supplier_multiplier;
        let risk_level = RiskLevel::from_composite(composite_risk_score);
        let financial_exposure_usd = Self::financial_exposure(component, risk_level);

        RiskAssessment {
            part_number: component.part_number.clone(),
            description: component.description.clone(),
            category: component.category,
            criticality: component.criticality,
            current_stock: component.current_stock,
            safety_stock: component.safety_stock,
            reorder_point: component.reorder_point,
            lead_time_days: component.lead_time_days,
            supplier_id: supplier.supplier_id.clone(),
            region: supplier.region,
            risk_exposure: supplier.risk_exposure,
            aog_cost_per_day: component.aog_cost_per_day,
            score_breakdown: ScoreBreakdown {
                stock_coverage,
                criticality,
                volatility,
                inventory_risk_score,
            },
            supplier_multiplier,
            composite_risk_score,
            risk_level,
            financial_exposure_usd,
        }
    }

    /// Stock-coverage tier; the first matching tier wins.
    pub fn stock_coverage_points(component: &Component) -> u32 {
        let stock = i128::from(component.current_stock);
        let reorder_point = i128::from(component.reorder_point);
        let safety_stock = i128::from(component.safety_stock);

        if stock <= 0 {
            40
        } else if stock * 2 < reorder_point {
            // stock < reorder_point * 0.5, kept in integers
            35
        } else if stock < reorder_point {
            25
        } else if stock < safety_stock {
            15
        } else {
            0
        }
    }

    pub fn criticality_points(criticality: Criticality) -> u32 {
        match criticality {
            Criticality::Critical => 30,
            Criticality::High => 20,
            Criticality::Medium => 10,
            Criticality::Low => 5,
        }
    }

    pub fn volatility_points(volatility: LeadTimeVolatility) -> u32 {
        match volatility {
            LeadTimeVolatility::High => 30,
            LeadTimeVolatility::Medium => 15,
            LeadTimeVolatility::Low => 5,
        }
    }

    pub fn supplier_multiplier(exposure: RiskExposure) -> Decimal {
        match exposure {
            RiskExposure::High => Decimal::new(13, 1),
            RiskExposure::Medium => Decimal::new(11, 1),
            RiskExposure::Low => Decimal::ONE,
        }
    }

    /// Worst-case AOG cost: one outage lasting the full replenishment lead
    /// time. Only High-level components carry exposure.
    pub fn financial_exposure(component: &Component, level: RiskLevel) -> Decimal {
        match level {
            RiskLevel::High => component
                .aog_cost_per_day
                .saturating_mul(Decimal::from(component.lead_time_days)),
            RiskLevel::Medium | RiskLevel::Low => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{PartNumber, SupplierId};
    use crate::domain::inventory::{Category, Region, Tier};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn component(
        current_stock: i64,
        reorder_point: u32,
        safety_stock: u32,
        criticality: Criticality,
        volatility: LeadTimeVolatility,
    ) -> Component {
        Component {
            part_number: PartNumber::new("PN-ENG-00001").unwrap(),
            description: "Engine Component - Series A".to_string(),
            category: Category::Engine,
            criticality,
            current_stock,
            safety_stock,
            reorder_point,
            lead_time_days: 88,
            lead_time_volatility: volatility,
            aog_cost_per_day: dec!(450000),
            unit_cost_usd: None,
            supplier_id: SupplierId::new("SUP-0001").unwrap(),
        }
    }

    fn supplier(exposure: RiskExposure) -> Supplier {
        Supplier {
            supplier_id: SupplierId::new("SUP-0001").unwrap(),
            supplier_name: None,
            region: Region::MiddleEast,
            country: None,
            tier: Tier::Tier1,
            on_time_delivery_pct: dec!(81.5),
            risk_exposure: exposure,
        }
    }

    fn criticality_strategy() -> impl Strategy<Value = Criticality> {
        prop_oneof![
            Just(Criticality::Critical),
            Just(Criticality::High),
            Just(Criticality::Medium),
            Just(Criticality::Low),
        ]
    }

    fn volatility_strategy() -> impl Strategy<Value = LeadTimeVolatility> {
        prop_oneof![
            Just(LeadTimeVolatility::High),
            Just(LeadTimeVolatility::Medium),
            Just(LeadTimeVolatility::Low),
        ]
    }

    fn exposure_strategy() -> impl Strategy<Value = RiskExposure> {
        prop_oneof![
            Just(RiskExposure::High),
            Just(RiskExposure::Medium),
            Just(RiskExposure::Low),
        ]
    }

    #[test]
    fn worked_example_scores_high() {
        let part = component(12, 26, 20, Criticality::Critical, LeadTimeVolatility::High);
        let assessment = RiskScorer::score(&part, &supplier(RiskExposure::High));

        // 12 < 13 is false, 12 < 26 is true
        assert_eq!(assessment.score_breakdown.stock_coverage, 25);
        assert_eq!(assessment.score_breakdown.criticality, 30);
        assert_eq!(assessment.score_breakdown.volatility, 30);
        assert_eq!(assessment.inventory_risk_score(), 85);
        assert_eq!(assessment.composite_risk_score, dec!(110.5));
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.financial_exposure_usd, dec!(39600000));
    }

    #[test]
    fn composite_is_not_recapped_above_100() {
        // 40 + 30 + 30 = 100, times 1.3
        let part = component(0, 26, 20, Criticality::Critical, LeadTimeVolatility::High);
        let assessment = RiskScorer::score(&part, &supplier(RiskExposure::High));

        assert_eq!(assessment.inventory_risk_score(), 100);
        assert_eq!(assessment.composite_risk_score, dec!(130));
    }

    #[test]
    fn stock_tiers_follow_priority_order() {
        let points = |stock| {
            RiskScorer::stock_coverage_points(&component(
                stock,
                26,
                30,
                Criticality::Low,
                LeadTimeVolatility::Low,
            ))
        };

        assert_eq!(points(-1), 40);
        assert_eq!(points(0), 40);
        assert_eq!(points(12), 35);
        assert_eq!(points(13), 25);
        assert_eq!(points(25), 25);
        assert_eq!(points(26), 15);
        assert_eq!(points(29), 15);
        assert_eq!(points(30), 0);
    }

    #[test]
    fn half_reorder_point_boundary_is_exact_for_odd_values() {
        // reorder point 27: half is 13.5, so 13 is "dangerously low"
        let part = component(13, 27, 0, Criticality::Low, LeadTimeVolatility::Low);
        assert_eq!(RiskScorer::stock_coverage_points(&part), 35);

        let part = component(14, 27, 0, Criticality::Low, LeadTimeVolatility::Low);
        assert_eq!(RiskScorer::stock_coverage_points(&part), 25);
    }

    #[test]
    fn composite_of_exactly_sixty_is_medium() {
        // 25 + 20 + 15 = 60, multiplier 1.0
        let part = component(20, 26, 0, Criticality::High, LeadTimeVolatility::Medium);
        let assessment = RiskScorer::score(&part, &supplier(RiskExposure::Low));

        assert_eq!(assessment.composite_risk_score, dec!(60));
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
        assert_eq!(assessment.financial_exposure_usd, Decimal::ZERO);
    }

    #[test]
    fn composite_of_exactly_thirty_is_low() {
        // 15 + 10 + 5 = 30, multiplier 1.0
        let part = component(26, 26, 30, Criticality::Medium, LeadTimeVolatility::Low);
        let assessment = RiskScorer::score(&part, &supplier(RiskExposure::Low));

        assert_eq!(assessment.composite_risk_score, dec!(30));
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn medium_supplier_pushes_score_over_threshold() {
        // 60 * 1.1 = 66
        let part = component(20, 26, 0, Criticality::High, LeadTimeVolatility::Medium);
        let assessment = RiskScorer::score(&part, &supplier(RiskExposure::Medium));

        assert_eq!(assessment.composite_risk_score, dec!(66.0));
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.financial_exposure_usd, dec!(39600000));
    }

    #[test]
    fn huge_stock_counts_score_as_well_stocked() {
        let points = |stock| {
            RiskScorer::stock_coverage_points(&component(
                stock,
                u32::MAX,
                u32::MAX,
                Criticality::Low,
                LeadTimeVolatility::Low,
            ))
        };

        assert_eq!(points(i64::MAX), 0);
        assert_eq!(points(i64::MIN), 40);
    }

    #[test]
    fn exposure_saturates_instead_of_overflowing() {
        let mut part = component(0, 26, 20, Criticality::Critical, LeadTimeVolatility::High);
        part.aog_cost_per_day = Decimal::MAX;
        let assessment = RiskScorer::score(&part, &supplier(RiskExposure::High));

        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.financial_exposure_usd, Decimal::MAX);
    }

    #[test]
    fn assessment_carries_supplier_context() {
        let part = component(50, 26, 20, Criticality::Low, LeadTimeVolatility::Low);
        let assessment = RiskScorer::score(&part, &supplier(RiskExposure::Medium));

        assert_eq!(assessment.region, Region::MiddleEast);
        assert_eq!(assessment.risk_exposure, RiskExposure::Medium);
        assert_eq!(assessment.supplier_multiplier, dec!(1.1));
    }

    proptest! {
        #[test]
        fn stockout_always_scores_forty(
            stock in -100i64..=0,
            reorder in 0u32..500,
            safety in 0u32..500,
            criticality in criticality_strategy(),
            volatility in volatility_strategy(),
        ) {
            let part = component(stock, reorder, safety, criticality, volatility);
            prop_assert_eq!(RiskScorer::stock_coverage_points(&part), 40);
        }

        #[test]
        fn composite_is_inventory_score_times_multiplier(
            stock in -10i64..500,
            reorder in 0u32..500,
            safety in 0u32..500,
            criticality in criticality_strategy(),
            volatility in volatility_strategy(),
            exposure in exposure_strategy(),
        ) {
            let part = component(stock, reorder, safety, criticality, volatility);
            let assessment = RiskScorer::score(&part, &supplier(exposure));

            prop_assert!(assessment.inventory_risk_score() <= MAX_INVENTORY_RISK_SCORE);
            prop_assert!(
                [dec!(1.0), dec!(1.1), dec!(1.3)].contains(&assessment.supplier_multiplier)
            );
            prop_assert_eq!(
                assessment.composite_risk_score,
                Decimal::from(assessment.inventory_risk_score()) * assessment.supplier_multiplier
            );
        }

        #[test]
        fn exposure_is_zero_unless_high(
            stock in -10i64..500,
            reorder in 0u32..500,
            safety in 0u32..500,
            criticality in criticality_strategy(),
            volatility in volatility_strategy(),
            exposure in exposure_strategy(),
        ) {
            let part = component(stock, reorder, safety, criticality, volatility);
            let assessment = RiskScorer::score(&part, &supplier(exposure));

            if assessment.risk_level == RiskLevel::High {
                prop_assert_eq!(
                    assessment.financial_exposure_usd,
                    part.aog_cost_per_day * Decimal::from(part.lead_time_days)
                );
            } else {
                prop_assert_eq!(assessment.financial_exposure_usd, Decimal::ZERO);
            }
        }
    }
}
