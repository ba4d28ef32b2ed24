//! Dataset - validated components joined to their suppliers.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::foundation::{SupplierId, ValidationError};

use super::{Component, InventoryRecord, Supplier, SupplierRecord};

/// Which file a rejected record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Component,
    Supplier,
}

/// A row that failed validation and was left out of scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    pub kind: RecordKind,
    /// Zero-based row index in the source file.
    pub row: usize,
    /// Raw identifier of the row, possibly empty.
    pub identifier: String,
    #[serde(serialize_with = "serialize_error")]
    pub error: ValidationError,
}

fn serialize_error<S: serde::Serializer>(
    error: &ValidationError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&error.to_string())
}

/// Validated inventory and supplier data, ready for scoring.
///
/// Built with skip-and-report semantics: a bad row never prevents the
/// remaining rows from being used.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    components: Vec<Component>,
    suppliers: HashMap<SupplierId, Supplier>,
    rejected: Vec<RejectedRecord>,
}

impl Dataset {
    /// Validates raw records into a dataset.
    ///
    /// Rules beyond per-row validation:
    /// - duplicate supplier ids and part numbers keep the first occurrence
    /// - a component whose supplier is unknown (or was rejected) is rejected
    pub fn from_records(inventory: Vec<InventoryRecord>, suppliers: Vec<SupplierRecord>) -> Self {
        let mut dataset = Dataset::default();

        for (row, record) in suppliers.into_iter().enumerate() {
            let identifier = record.supplier_id.trim().to_string();
            match Supplier::try_from(record) {
                Ok(supplier) if dataset.suppliers.contains_key(&supplier.supplier_id) => {
                    dataset.reject(
                        RecordKind::Supplier,
                        row,
                        identifier.clone(),
                        ValidationError::duplicate("supplier_id", identifier),
                    );
                }
                Ok(supplier) => {
                    dataset.suppliers.insert(supplier.supplier_id.clone(), supplier);
                }
                Err(error) => dataset.reject(RecordKind::Supplier, row, identifier, error),
            }
        }

        let mut seen_parts = HashSet::new();
        for (row, record) in inventory.into_iter().enumerate() {
            let identifier = record.part_number.trim().to_string();
            let component = match Component::try_from(record) {
                Ok(component) => component,
                Err(error) => {
                    dataset.reject(RecordKind::Component, row, identifier, error);
                    continue;
                }
            };

            if !seen_parts.insert(component.part_number.clone()) {
                dataset.reject(
                    RecordKind::Component,
                    row,
                    identifier.clone(),
                    ValidationError::duplicate("part_number", identifier),
                );
                continue;
            }

            if !dataset.suppliers.contains_key(&component.supplier_id) {
                let supplier_id = component.supplier_id.to_string();
                dataset.reject(
                    RecordKind::Component,
                    row,
                    identifier,
                    ValidationError::unresolved_reference("supplier_id", supplier_id),
                );
                continue;
            }

            dataset.components.push(component);
        }

        dataset
    }

    fn reject(&mut self, kind: RecordKind, row: usize, identifier: String, error: ValidationError) {
        self.rejected.push(RejectedRecord {
            kind,
            row,
            identifier,
            error,
        });
    }

    /// Components in source order, each paired with its resolved supplier.
    pub fn pairs(&self) -> impl Iterator<Item = (&Component, &Supplier)> + '_ {
        self.components.iter().filter_map(|component| {
            self.suppliers
                .get(&component.supplier_id)
                .map(|supplier| (component, supplier))
        })
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn supplier(&self, id: &SupplierId) -> Option<&Supplier> {
        self.suppliers.get(id)
    }

    pub fn supplier_count(&self) -> usize {
        self.suppliers.len()
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }
}
