//! ROI model configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::roi::RoiAssumptions;

use super::error::ValidationError;

/// Cost and probability assumptions of the ROI model
///
/// Unset values fall back to [`RoiAssumptions::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoiConfig {
    pub platform_licenses_usd: Option<Decimal>,
    pub personnel_training_usd: Option<Decimal>,
    pub ongoing_maintenance_usd: Option<Decimal>,
    pub baseline_aog_probability: Option<Decimal>,
    pub with_system_aog_probability: Option<Decimal>,
}

impl RoiConfig {
    pub fn assumptions(&self) -> RoiAssumptions {
        let defaults = RoiAssumptions::default();
        RoiAssumptions {
            platform_licenses_usd: self
                .platform_licenses_usd
                .unwrap_or(defaults.platform_licenses_usd),
            personnel_training_usd: self
                .personnel_training_usd
                .unwrap_or(defaults.personnel_training_usd),
            ongoing_maintenance_usd: self
                .ongoing_maintenance_usd
                .unwrap_or(defaults.ongoing_maintenance_usd),
            baseline_aog_probability: self
                .baseline_aog_probability
                .unwrap_or(defaults.baseline_aog_probability),
            with_system_aog_probability: self
                .with_system_aog_probability
                .unwrap_or(defaults.with_system_aog_probability),
        }
    }

    /// Validate ROI assumptions
    pub fn validate(&self) -> Result<(), ValidationError> {
        let assumptions = self.assumptions();

        if assumptions.platform_licenses_usd.is_sign_negative()
            || assumptions.personnel_training_usd.is_sign_negative()
            || assumptions.ongoing_maintenance_usd.is_sign_negative()
        {
            return Err(ValidationError::InvalidRoiAssumption("costs must not be negative"));
        }

        let probability = Decimal::ZERO..=Decimal::ONE;
        if !probability.contains(&assumptions.baseline_aog_probability)
            || !probability.contains(&assumptions.with_system_aog_probability)
        {
            return Err(ValidationError::InvalidRoiAssumption(
                "probabilities must be between 0 and 1",
            ));
        }

        if assumptions.with_system_aog_probability > assumptions.baseline_aog_probability {
            return Err(ValidationError::InvalidRoiAssumption(
                "with-system probability exceeds baseline",
            ));
        }

        Ok(())
    }
}
