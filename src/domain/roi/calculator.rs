//! ROI Calculator - business case for proactive AOG risk mitigation.
//!
//! Compares the expected AOG cost of the managed exposure with and without
//! intervention against the first-year cost of running the system plus the
//! preferred mitigation of every analyzed component.

use chrono::{Days, NaiveDate};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{group_thousands, round_half_up};
use crate::domain::recommendation::RecommendationRecord;
use crate::domain::risk::RiskSummary;

const MONTHS_PER_YEAR: u32 = 12;
const DAYS_PER_MONTH: u32 = 30;

/// Cost and probability inputs of the ROI model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAssumptions {
    /// Annual platform cost (infrastructure, API usage).
    pub platform_licenses_usd: Decimal,
    /// One-time onboarding cost.
    pub personnel_training_usd: Decimal,
    /// Annual maintenance cost.
    pub ongoing_maintenance_usd: Decimal,
    /// Share of exposure expected to materialize without intervention.
    pub baseline_aog_probability: Decimal,
    /// Share of exposure expected to materialize despite intervention.
    pub with_system_aog_probability: Decimal,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            platform_licenses_usd: Decimal::from(80_000),
            personnel_training_usd: Decimal::from(50_000),
            ongoing_maintenance_usd: Decimal::from(40_000),
            baseline_aog_probability: Decimal::new(8, 2),
            with_system_aog_probability: Decimal::new(2, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub one_time_setup: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_operating_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub mitigation_action_costs: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_first_year_investment: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAvoidance {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_risk_exposure: Decimal,
    pub high_risk_components: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub baseline_expected_aog_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub with_system_expected_aog_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub aog_costs_avoided: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_reduction_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_investment_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_savings_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_benefit_usd: Decimal,
    /// Savings per dollar invested; 0 when nothing is invested.
    #[serde(with = "rust_decimal::serde::float")]
    pub roi_ratio: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub roi_percentage: Decimal,
    /// Absent when there are no savings to pay the investment back.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub payback_period_months: Option<Decimal>,
    pub break_even_date: Option<NaiveDate>,
}

/// Investment recommendation band derived from the ROI ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentVerdict {
    StrongRecommend,
    Recommend,
    Consider,
    Review,
}

impl InvestmentVerdict {
    /// Bands: > 10 strong recommend, > 5 recommend, > 2 consider.
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio > Decimal::from(10) {
            InvestmentVerdict::StrongRecommend
        } else if ratio > Decimal::from(5) {
            InvestmentVerdict::Recommend
        } else if ratio > Decimal::from(2) {
            InvestmentVerdict::Consider
        } else {
            InvestmentVerdict::Review
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            InvestmentVerdict::StrongRecommend => {
                "STRONG RECOMMEND: Exceptional ROI justifies immediate implementation."
            }
            InvestmentVerdict::Recommend => {
                "RECOMMEND: High ROI supports business case for deployment."
            }
            InvestmentVerdict::Consider => {
                "CONSIDER: Positive ROI, evaluate against alternative investments."
            }
            InvestmentVerdict::Review => {
                "REVIEW: ROI below threshold, reassess assumptions or scope."
            }
        }
    }
}

impl fmt::Display for InvestmentVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMetrics {
    #[serde(with = "rust_decimal::serde::float")]
    pub investment_required: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub aog_costs_avoided: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub net_benefit: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub roi_ratio: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub payback_period_months: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskImpact {
    pub high_risk_components_identified: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub risk_reduction_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_exposure_managed: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub value_proposition: String,
    pub key_metrics: KeyMetrics,
    pub risk_impact: RiskImpact,
    pub verdict: InvestmentVerdict,
    pub recommendation: String,
}

/// Complete ROI report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAnalysis {
    pub calculation_date: NaiveDate,
    pub analysis_scope: String,
    pub investment_breakdown: InvestmentBreakdown,
    pub aog_cost_avoidance: CostAvoidance,
    pub roi_metrics: RoiMetrics,
    pub executive_summary: ExecutiveSummary,
}

pub struct RoiCalculator {
    assumptions: RoiAssumptions,
}

impl RoiCalculator {
    pub fn new(assumptions: RoiAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &RoiAssumptions {
        &self.assumptions
    }

    pub fn calculate(
        &self,
        summary: &RiskSummary,
        recommendations: &[RecommendationRecord],
        today: NaiveDate,
    ) -> RoiAnalysis {
        let investment = self.investment(recommendations);
        let avoidance = self.cost_avoidance(summary);
        let metrics = Self::metrics(&investment, &avoidance, today);
        let executive_summary = Self::executive_summary(&investment, &avoidance, &metrics);

        tracing::info!(
            investment_usd = %investment.total_first_year_investment,
            avoided_usd = %avoidance.aog_costs_avoided,
            roi_ratio = %round_half_up(metrics.roi_ratio, 2),
            verdict = ?executive_summary.verdict,
            "ROI analysis calculated"
        );

        RoiAnalysis {
            calculation_date: today,
            analysis_scope: format!("{} components analyzed", recommendations.len()),
            investment_breakdown: investment,
            aog_cost_avoidance: avoidance,
            roi_metrics: metrics,
            executive_summary,
        }
    }

    fn investment(&self, recommendations: &[RecommendationRecord]) -> InvestmentBreakdown {
        let one_time_setup = self.assumptions.personnel_training_usd;
        let annual_operating_costs = self
            .assumptions
            .platform_licenses_usd
            .saturating_add(self.assumptions.ongoing_maintenance_usd);
        let mitigation_action_costs = recommendations
            .iter()
            .filter_map(|record| record.analysis.primary_option_cost())
            .filter_map(Decimal::from_f64)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        InvestmentBreakdown {
            one_time_setup,
            annual_operating_costs,
            mitigation_action_costs,
            total_first_year_investment: one_time_setup
                .saturating_add(annual_operating_costs)
                .saturating_add(mitigation_action_costs),
        }
    }

    fn cost_avoidance(&self, summary: &RiskSummary) -> CostAvoidance {
        let baseline = self.assumptions.baseline_aog_probability;
        let with_system = self.assumptions.with_system_aog_probability;
        let total_risk_exposure = summary.total_exposure();

        let baseline_expected_aog_cost = total_risk_exposure.saturating_mul(baseline);
        let with_system_expected_aog_cost = total_risk_exposure.saturating_mul(with_system);
        let risk_reduction_percentage = (baseline - with_system)
            .checked_div(baseline)
            .map(|share| share * Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO);

        CostAvoidance {
            total_risk_exposure,
            high_risk_components: summary.risk_distribution.high_risk,
            baseline_expected_aog_cost,
            with_system_expected_aog_cost,
            aog_costs_avoided: baseline_expected_aog_cost.saturating_sub(with_system_expected_aog_cost),
            risk_reduction_percentage,
        }
    }

    fn metrics(
        investment: &InvestmentBreakdown,
        avoidance: &CostAvoidance,
        today: NaiveDate,
    ) -> RoiMetrics {
        let total_investment = investment.total_first_year_investment;
        let total_savings = avoidance.aog_costs_avoided;
        let net_benefit = total_savings.saturating_sub(total_investment);

        let (roi_ratio, roi_percentage) = if total_investment > Decimal::ZERO {
            (
                total_savings
                    .checked_div(total_investment)
                    .unwrap_or(Decimal::MAX),
                net_benefit
                    .checked_div(total_investment)
                    .map_or(Decimal::MAX, |share| share.saturating_mul(Decimal::ONE_HUNDRED)),
            )
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        let monthly_benefit = total_savings / Decimal::from(MONTHS_PER_YEAR);
        let payback_period_months = if monthly_benefit > Decimal::ZERO {
            total_investment.checked_div(monthly_benefit)
        } else {
            None
        };
        let break_even_date = payback_period_months.and_then(|months| break_even(today, months));

        RoiMetrics {
            total_investment_usd: total_investment,
            total_savings_usd: total_savings,
            net_benefit_usd: net_benefit,
            roi_ratio,
            roi_percentage,
            payback_period_months,
            break_even_date,
        }
    }

    fn executive_summary(
        investment: &InvestmentBreakdown,
        avoidance: &CostAvoidance,
        metrics: &RoiMetrics,
    ) -> ExecutiveSummary {
        let verdict = InvestmentVerdict::from_ratio(metrics.roi_ratio);
        let value_proposition = format!(
            "Sky-Guard prevents ${} in AOG costs with ${} investment, delivering {}:1 return.",
            group_thousands(avoidance.aog_costs_avoided),
            group_thousands(investment.total_first_year_investment),
            round_half_up(metrics.roi_ratio, 1),
        );

        ExecutiveSummary {
            value_proposition,
            key_metrics: KeyMetrics {
                investment_required: investment.total_first_year_investment,
                aog_costs_avoided: avoidance.aog_costs_avoided,
                net_benefit: metrics.net_benefit_usd,
                roi_ratio: metrics.roi_ratio,
                payback_period_months: metrics.payback_period_months,
            },
            risk_impact: RiskImpact {
                high_risk_components_identified: avoidance.high_risk_components,
                risk_reduction_percentage: avoidance.risk_reduction_percentage,
                total_exposure_managed: avoidance.total_risk_exposure,
            },
            verdict,
            recommendation: verdict.message().to_string(),
        }
    }
}

/// `today` plus the payback period at 30 days per month, truncated.
fn break_even(today: NaiveDate, months: Decimal) -> Option<NaiveDate> {
    let days = months.checked_mul(Decimal::from(DAYS_PER_MONTH))?.trunc().to_u64()?;
    today.checked_add_days(Days::new(days))
}
