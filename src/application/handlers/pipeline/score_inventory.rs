//! ScoreInventoryHandler - Loads, validates, scores, and ranks the inventory.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::inventory::{Dataset, RejectedRecord};
use crate::domain::risk::{rank, RiskAssessment, RiskScorer};
use crate::ports::DatasetReader;

/// Result of scoring the whole inventory.
#[derive(Debug, Clone)]
pub struct ScoreInventoryResult {
    /// Every valid component, in ranking order.
    pub assessments: Vec<RiskAssessment>,
    pub rejected: Vec<RejectedRecord>,
    pub supplier_count: usize,
}

/// Handler for the load, validate, score, and rank stages.
pub struct ScoreInventoryHandler {
    reader: Arc<dyn DatasetReader>,
}

impl ScoreInventoryHandler {
    pub fn new(reader: Arc<dyn DatasetReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self) -> Result<ScoreInventoryResult, DomainError> {
        // 1. Load raw rows
        let suppliers = self.reader.load_suppliers().await?;
        let components = self.reader.load_components().await?;
        tracing::info!(
            components = components.len(),
            suppliers = suppliers.len(),
            "Dataset loaded"
        );

        // 2. Validate
        let dataset = Dataset::from_records(components, suppliers);
        for rejected in dataset.rejected() {
            tracing::warn!(
                kind = ?rejected.kind,
                row = rejected.row,
                identifier = %rejected.identifier,
                error = %rejected.error,
                "Record rejected"
            );
        }

        // 3. Score
        let assessments: Vec<RiskAssessment> = dataset
            .pairs()
            .map(|(component, supplier)| RiskScorer::score(component, supplier))
            .collect();

        // 4. Rank
        let assessments = rank(assessments);
        tracing::info!(
            scored = assessments.len(),
            rejected = dataset.rejected().len(),
            high_risk = assessments.iter().filter(|a| a.is_high_risk()).count(),
            "Inventory scored"
        );

        Ok(ScoreInventoryResult {
            assessments,
            rejected: dataset.rejected().to_vec(),
            supplier_count: dataset.supplier_count(),
        })
    }
}
