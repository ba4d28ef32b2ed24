//! ROI module - financial return of proactive risk mitigation.

mod calculator;

pub use calculator::{
    CostAvoidance, ExecutiveSummary, InvestmentBreakdown, InvestmentVerdict, KeyMetrics,
    RiskImpact, RoiAnalysis, RoiAssumptions, RoiCalculator, RoiMetrics,
};
