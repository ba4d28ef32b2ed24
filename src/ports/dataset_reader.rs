//! Dataset Reader Port - Source of raw inventory and supplier rows.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::inventory::{InventoryRecord, SupplierRecord};

/// Loads raw, unvalidated records.
///
/// Implementations only decode rows into records; every data-quality rule
/// is applied later by `Dataset::from_records`, so a row with missing cells
/// is still returned. A missing or unreadable source is `DatasetUnavailable`;
/// a source lacking a required column or holding undecodable bytes is
/// `DatasetMalformed`.
#[async_trait]
pub trait DatasetReader: Send + Sync {
    async fn load_components(&self) -> Result<Vec<InventoryRecord>, DomainError>;

    async fn load_suppliers(&self) -> Result<Vec<SupplierRecord>, DomainError>;
}
