//! Inventory module - components, suppliers, and dataset validation.
//!
//! Raw rows ([`InventoryRecord`], [`SupplierRecord`]) become domain values
//! through `TryFrom`, which is where every data-quality rule lives. All
//! classification enums are closed: an unrecognized label fails here, before
//! any scoring happens.

mod component;
mod dataset;
mod records;
mod supplier;

pub use component::{Category, Component, Criticality, LeadTimeVolatility, MAX_AOG_COST_PER_DAY};
pub use dataset::{Dataset, RecordKind, RejectedRecord};
pub use records::{InventoryRecord, SupplierRecord};
pub use supplier::{Region, RiskExposure, Supplier, Tier};
