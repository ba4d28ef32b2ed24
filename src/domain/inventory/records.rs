//! Raw dataset rows, exactly as read from the inventory and supplier files.
//!
//! Every field is kept as text so a single malformed cell turns into a
//! [`ValidationError`] for that row instead of failing the whole read.
//! Cells a short row lacks decode as blank.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One row of `inventory_master.csv`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryRecord {
    pub part_number: String,
    pub description: Option<String>,
    pub category: String,
    pub criticality: String,
    pub unit_cost_usd: Option<String>,
    pub current_stock: String,
    pub safety_stock: String,
    pub reorder_point: String,
    pub lead_time_days: Option<String>,
    pub lead_time_volatility: String,
    pub aog_cost_per_day: String,
    pub supplier_id: String,
}

impl InventoryRecord {
    /// Header columns a readable inventory file must carry.
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "part_number",
        "category",
        "criticality",
        "current_stock",
        "safety_stock",
        "reorder_point",
        "lead_time_volatility",
        "aog_cost_per_day",
        "supplier_id",
    ];
}

/// One row of `supplier_network.csv`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierRecord {
    pub supplier_id: String,
    pub supplier_name: Option<String>,
    pub region: String,
    pub country: Option<String>,
    pub tier: String,
    pub on_time_delivery_pct: String,
    pub risk_exposure: String,
}

impl SupplierRecord {
    /// Header columns a readable supplier file must carry.
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "supplier_id",
        "region",
        "tier",
        "on_time_delivery_pct",
        "risk_exposure",
    ];
}

/// Returns the trimmed cell, or `MissingField` when it is blank.
pub(crate) fn required<'a>(field: &str, raw: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing_field(field));
    }
    Ok(trimmed)
}

/// Parses a decimal cell.
pub(crate) fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::missing_field(field));
    }
    Decimal::from_str(trimmed)
        .map_err(|e| ValidationError::invalid_format(field, format!("'{}': {}", trimmed, e)))
}

/// Parses a whole-number cell.
///
/// Accepts integral decimals such as `45.0`, which is how spreadsheet
/// exports write integer columns that contain blanks elsewhere.
pub(crate) fn parse_integer(field: &str, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    let value = parse_decimal(field, trimmed)?;
    if !value.fract().is_zero() {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not a whole number", trimmed),
        ));
    }
    i64::try_from(value.trunc())
        .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is too large", trimmed)))
}
