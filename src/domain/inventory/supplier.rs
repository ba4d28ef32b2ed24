//! Supplier - one vendor in the supplier network.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{SupplierId, ValidationError};

use super::records::{parse_decimal, required, SupplierRecord};

/// Geographic supplier cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Asia-Pacific")]
    AsiaPacific,
    Europe,
    #[serde(rename = "North America")]
    NorthAmerica,
    #[serde(rename = "Middle East")]
    MiddleEast,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::AsiaPacific => "Asia-Pacific",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::MiddleEast => "Middle East",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Asia-Pacific" => Ok(Region::AsiaPacific),
            "Europe" => Ok(Region::Europe),
            "North America" => Ok(Region::NorthAmerica),
            "Middle East" => Ok(Region::MiddleEast),
            other => Err(ValidationError::unrecognized_enum("region", other)),
        }
    }
}

/// Position of the supplier in the supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Tier-1")]
    Tier1,
    #[serde(rename = "Tier-2")]
    Tier2,
    #[serde(rename = "Tier-3")]
    Tier3,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Tier1 => "Tier-1",
            Tier::Tier2 => "Tier-2",
            Tier::Tier3 => "Tier-3",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Tier-1" => Ok(Tier::Tier1),
            "Tier-2" => Ok(Tier::Tier2),
            "Tier-3" => Ok(Tier::Tier3),
            other => Err(ValidationError::unrecognized_enum("tier", other)),
        }
    }
}

/// Derived supply-risk rating of a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskExposure {
    High,
    Medium,
    Low,
}

impl RiskExposure {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskExposure::High => "High",
            RiskExposure::Medium => "Medium",
            RiskExposure::Low => "Low",
        }
    }
}

impl fmt::Display for RiskExposure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskExposure {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "High" => Ok(RiskExposure::High),
            "Medium" => Ok(RiskExposure::Medium),
            "Low" => Ok(RiskExposure::Low),
            other => Err(ValidationError::unrecognized_enum("risk_exposure", other)),
        }
    }
}

/// A validated supplier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Supplier {
    pub supplier_id: SupplierId,
    pub supplier_name: Option<String>,
    pub region: Region,
    pub country: Option<String>,
    pub tier: Tier,
    #[serde(with = "rust_decimal::serde::float")]
    pub on_time_delivery_pct: Decimal,
    pub risk_exposure: RiskExposure,
}

impl TryFrom<SupplierRecord> for Supplier {
    type Error = ValidationError;

    fn try_from(record: SupplierRecord) -> Result<Self, Self::Error> {
        let supplier_id = SupplierId::new(record.supplier_id)?;
        let region = required("region", &record.region)?.parse()?;
        let tier = required("tier", &record.tier)?.parse()?;
        let risk_exposure = required("risk_exposure", &record.risk_exposure)?.parse()?;

        let on_time_delivery_pct =
            parse_decimal("on_time_delivery_pct", &record.on_time_delivery_pct)?;
        if on_time_delivery_pct < Decimal::ZERO || on_time_delivery_pct > Decimal::ONE_HUNDRED {
            return Err(ValidationError::out_of_range(
                "on_time_delivery_pct",
                0,
                100,
                on_time_delivery_pct,
            ));
        }

        Ok(Self {
            supplier_id,
            supplier_name: record.supplier_name.filter(|name| !name.trim().is_empty()),
            region,
            country: record.country.filter(|country| !country.trim().is_empty()),
            tier,
            on_time_delivery_pct,
            risk_exposure,
        })
    }
}
