//! Component - one inventory part and the enums that classify it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{PartNumber, SupplierId, ValidationError};

use super::records::{parse_decimal, parse_integer, required, InventoryRecord};

/// Largest accepted AOG cost per day (USD).
pub const MAX_AOG_COST_PER_DAY: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Aircraft system a component belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Engine,
    Avionics,
    Hydraulics,
    #[serde(rename = "Landing Gear")]
    LandingGear,
    #[serde(rename = "Cabin Systems")]
    CabinSystems,
    Electrical,
    Structural,
}

impl Category {
    /// Returns the dataset label for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Engine => "Engine",
            Category::Avionics => "Avionics",
            Category::Hydraulics => "Hydraulics",
            Category::LandingGear => "Landing Gear",
            Category::CabinSystems => "Cabin Systems",
            Category::Electrical => "Electrical",
            Category::Structural => "Structural",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Engine" => Ok(Category::Engine),
            "Avionics" => Ok(Category::Avionics),
            "Hydraulics" => Ok(Category::Hydraulics),
            "Landing Gear" => Ok(Category::LandingGear),
            "Cabin Systems" => Ok(Category::CabinSystems),
            "Electrical" => Ok(Category::Electrical),
            "Structural" => Ok(Category::Structural),
            other => Err(ValidationError::unrecognized_enum("category", other)),
        }
    }
}

/// How badly an outage of this part grounds an aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criticality {
    Critical,
    High,
    Medium,
    Low,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Critical => "Critical",
            Criticality::High => "High",
            Criticality::Medium => "Medium",
            Criticality::Low => "Low",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criticality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Critical" => Ok(Criticality::Critical),
            "High" => Ok(Criticality::High),
            "Medium" => Ok(Criticality::Medium),
            "Low" => Ok(Criticality::Low),
            other => Err(ValidationError::unrecognized_enum("criticality", other)),
        }
    }
}

/// Variability of the supplier's replenishment lead time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadTimeVolatility {
    High,
    Medium,
    Low,
}

impl LeadTimeVolatility {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadTimeVolatility::High => "High",
            LeadTimeVolatility::Medium => "Medium",
            LeadTimeVolatility::Low => "Low",
        }
    }
}

impl fmt::Display for LeadTimeVolatility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadTimeVolatility {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "High" => Ok(LeadTimeVolatility::High),
            "Medium" => Ok(LeadTimeVolatility::Medium),
            "Low" => Ok(LeadTimeVolatility::Low),
            other => Err(ValidationError::unrecognized_enum("lead_time_volatility", other)),
        }
    }
}

/// A validated inventory part.
///
/// Constructed only through [`Component::try_from`] on an [`InventoryRecord`],
/// so every instance has a lead time, recognized enums, and a positive
/// AOG cost. `current_stock` may be negative: the upstream data set uses
/// negative counts to flag broken stock records, which score as a stock-out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub part_number: PartNumber,
    pub description: String,
    pub category: Category,
    pub criticality: Criticality,
    pub current_stock: i64,
    pub safety_stock: u32,
    pub reorder_point: u32,
    pub lead_time_days: u32,
    pub lead_time_volatility: LeadTimeVolatility,
    #[serde(with = "rust_decimal::serde::float")]
    pub aog_cost_per_day: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub unit_cost_usd: Option<Decimal>,
    pub supplier_id: SupplierId,
}

impl TryFrom<InventoryRecord> for Component {
    type Error = ValidationError;

    fn try_from(record: InventoryRecord) -> Result<Self, Self::Error> {
        let part_number = PartNumber::new(record.part_number)?;
        let category = required("category", &record.category)?.parse()?;
        let criticality = required("criticality", &record.criticality)?.parse()?;
        let lead_time_volatility =
            required("lead_time_volatility", &record.lead_time_volatility)?.parse()?;
        let supplier_id = SupplierId::new(record.supplier_id)?;

        let current_stock = parse_integer("current_stock", &record.current_stock)?;
        let safety_stock = non_negative(
            "safety_stock",
            parse_integer("safety_stock", &record.safety_stock)?,
        )?;
        let reorder_point = non_negative(
            "reorder_point",
            parse_integer("reorder_point", &record.reorder_point)?,
        )?;

        let lead_time_days = match record.lead_time_days.as_deref().map(str::trim) {
            None | Some("") => return Err(ValidationError::missing_field("lead_time_days")),
            Some(raw) => parse_integer("lead_time_days", raw)?,
        };
        let lead_time_days = u32::try_from(lead_time_days)
            .ok()
            .filter(|days| *days > 0)
            .ok_or_else(|| {
                ValidationError::out_of_range("lead_time_days", 1, u32::MAX, lead_time_days)
            })?;

        let aog_cost_per_day = parse_decimal("aog_cost_per_day", &record.aog_cost_per_day)?;
        if aog_cost_per_day <= Decimal::ZERO || aog_cost_per_day > MAX_AOG_COST_PER_DAY {
            return Err(ValidationError::out_of_range(
                "aog_cost_per_day",
                "0 (exclusive)",
                MAX_AOG_COST_PER_DAY,
                aog_cost_per_day,
            ));
        }

        let unit_cost_usd = match record.unit_cost_usd.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let cost = parse_decimal("unit_cost_usd", raw)?;
                if cost <= Decimal::ZERO {
                    return Err(ValidationError::out_of_range(
                        "unit_cost_usd",
                        "0 (exclusive)",
                        "unbounded",
                        cost,
                    ));
                }
                Some(cost)
            }
        };

        Ok(Self {
            part_number,
            description: record.description.unwrap_or_default(),
            category,
            criticality,
            current_stock,
            safety_stock,
            reorder_point,
            lead_time_days,
            lead_time_volatility,
            aog_cost_per_day,
            unit_cost_usd,
            supplier_id,
        })
    }
}

fn non_negative(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value).map_err(|_| ValidationError::out_of_range(field, 0, u32::MAX, value))
}
