//! CSV Dataset Reader - Implementation of DatasetReader over the exported
//! inventory and supplier spreadsheets.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::inventory::{InventoryRecord, SupplierRecord};
use crate::ports::DatasetReader;

pub const DEFAULT_INVENTORY_FILE: &str = "inventory_master.csv";
pub const DEFAULT_SUPPLIER_FILE: &str = "supplier_network.csv";

/// Reads `inventory_master.csv` and `supplier_network.csv` from a data
/// directory.
///
/// Columns are matched by header name; extra columns are ignored and empty
/// cells in optional columns become `None`.
#[derive(Debug, Clone)]
pub struct CsvDatasetReader {
    data_dir: PathBuf,
    inventory_file: String,
    supplier_file: String,
}

impl CsvDatasetReader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            inventory_file: DEFAULT_INVENTORY_FILE.to_string(),
            supplier_file: DEFAULT_SUPPLIER_FILE.to_string(),
        }
    }

    pub fn with_file_names(
        mut self,
        inventory_file: impl Into<String>,
        supplier_file: impl Into<String>,
    ) -> Self {
        self.inventory_file = inventory_file.into();
        self.supplier_file = supplier_file.into();
        self
    }

    async fn read_records<T: DeserializeOwned>(
        &self,
        file_name: &str,
        required_columns: &[&str],
    ) -> Result<Vec<T>, DomainError> {
        let path = self.data_dir.join(file_name);
        let bytes = fs::read(&path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatasetUnavailable,
                format!("Failed to read {}: {}", path.display(), e),
            )
            .with_detail("path", path.display().to_string())
        })?;

        let records = decode_records(&path, &bytes, required_columns)?;
        tracing::debug!(path = %path.display(), rows = records.len(), "Loaded dataset file");
        Ok(records)
    }
}

/// Decodes every row of a CSV file.
///
/// Rows shorter than the header decode with blank cells and are left to
/// record validation. Only a missing required column or undecodable bytes
/// fail the file.
fn decode_records<T: DeserializeOwned>(
    path: &Path,
    bytes: &[u8],
    required_columns: &[&str],
) -> Result<Vec<T>, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| malformed(path, &e))?
        .clone();
    if let Some(column) = required_columns
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(DomainError::new(
            ErrorCode::DatasetMalformed,
            format!("{} has no '{}' column", path.display(), column),
        )
        .with_detail("path", path.display().to_string())
        .with_detail("column", column.to_string()));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(|e| malformed(path, &e)))
        .collect()
}

fn malformed(path: &Path, e: &csv::Error) -> DomainError {
    let mut error = DomainError::new(
        ErrorCode::DatasetMalformed,
        format!("Failed to decode {}: {}", path.display(), e),
    )
    .with_detail("path", path.display().to_string());
    if let Some(position) = e.position() {
        error = error.with_detail("line", position.line().to_string());
    }
    error
}

#[async_trait]
impl DatasetReader for CsvDatasetReader {
    async fn load_components(&self) -> Result<Vec<InventoryRecord>, DomainError> {
        self.read_records(&self.inventory_file, InventoryRecord::REQUIRED_COLUMNS)
            .await
    }

    async fn load_suppliers(&self) -> Result<Vec<SupplierRecord>, DomainError> {
        self.read_records(&self.supplier_file, SupplierRecord::REQUIRED_COLUMNS)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;
    use crate::domain::inventory::{Dataset, RecordKind};
    use tempfile::TempDir;

    // ───────────────────────────────────────────────────────────────
    // Test helpers
    // ───────────────────────────────────────────────────────────────

    const INVENTORY: &str = "\
part_number,description,category,criticality,unit_cost_usd,current_stock,safety_stock,reorder_point,lead_time_days,lead_time_volatility,aog_cost_per_day,supplier_id,last_updated
PN-ENG-00001,Engine Component - Series A,Engine,Critical,52000,12,20,26,88.0,High,450000,SUP-0001,2024-03-01
PN-AVI-00002,Avionics Component - Series X,Avionics,High,14000,-1,10,13,,Unknown,375000,SUP-0002,2024-03-02
";

    const SUPPLIERS: &str = "\
supplier_id,supplier_name,region,country,tier,on_time_delivery_pct,quality_rating,risk_exposure
SUP-0001,Aero Systems Ltd,Middle East,UAE,Tier-1,78.4,91.2,High
SUP-0002,,Europe,Germany,Tier-2,93.1,97.0,Low
";

    async fn create_reader(inventory: &str, suppliers: &str) -> (CsvDatasetReader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(DEFAULT_INVENTORY_FILE), inventory)
            .await
            .unwrap();
        fs::write(temp_dir.path().join(DEFAULT_SUPPLIER_FILE), suppliers)
            .await
            .unwrap();
        (CsvDatasetReader::new(temp_dir.path()), temp_dir)
    }

    // ───────────────────────────────────────────────────────────────
    // Load tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn loads_inventory_rows_as_raw_records() {
        let (reader, _temp) = create_reader(INVENTORY, SUPPLIERS).await;

        let records = reader.load_components().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].part_number, "PN-ENG-00001");
        assert_eq!(records[0].lead_time_days.as_deref(), Some("88.0"));
        assert_eq!(records[1].current_stock, "-1");
        assert_eq!(records[1].lead_time_days, None);
        assert_eq!(records[1].lead_time_volatility, "Unknown");
    }

    #[tokio::test]
    async fn loads_suppliers_and_ignores_extra_columns() {
        let (reader, _temp) = create_reader(INVENTORY, SUPPLIERS).await;

        let records = reader.load_suppliers().await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, "Middle East");
        assert_eq!(records[0].supplier_name.as_deref(), Some("Aero Systems Ltd"));
        assert_eq!(records[1].supplier_name, None);
    }

    #[tokio::test]
    async fn custom_file_names_are_used() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("parts.csv"), INVENTORY).await.unwrap();
        let reader = CsvDatasetReader::new(temp_dir.path()).with_file_names("parts.csv", "vendors.csv");

        assert_eq!(reader.load_components().await.unwrap().len(), 2);
        assert!(reader.load_suppliers().await.is_err());
    }

    // ───────────────────────────────────────────────────────────────
    // Error tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn missing_file_is_dataset_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let reader = CsvDatasetReader::new(temp_dir.path());

        let err = reader.load_components().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatasetUnavailable);
        assert!(err.details.contains_key("path"));
    }

    #[tokio::test]
    async fn missing_required_column_is_dataset_malformed() {
        let inventory = "part_number,category\nPN-1,Engine\n";
        let (reader, _temp) = create_reader(inventory, SUPPLIERS).await;

        let err = reader.load_components().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatasetMalformed);
        assert_eq!(err.details.get("column").map(String::as_str), Some("criticality"));
    }

    #[tokio::test]
    async fn invalid_utf8_is_dataset_malformed_with_line() {
        let temp_dir = TempDir::new().unwrap();
        let mut suppliers = b"supplier_id,region,tier,on_time_delivery_pct,risk_exposure\n".to_vec();
        suppliers.extend_from_slice(b"SUP-0001,Europe,Tier-1,90.0,Low\n");
        suppliers.extend_from_slice(b"SUP-\xff\xfe,Europe,Tier-1,90.0,Low\n");
        fs::write(temp_dir.path().join(DEFAULT_SUPPLIER_FILE), suppliers)
            .await
            .unwrap();
        let reader = CsvDatasetReader::new(temp_dir.path());

        let err = reader.load_suppliers().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatasetMalformed);
        assert_eq!(err.details.get("line").map(String::as_str), Some("3"));
    }

    #[tokio::test]
    async fn short_row_is_rejected_while_others_are_scored() {
        let inventory = "\
part_number,category,criticality,current_stock,safety_stock,reorder_point,lead_time_days,lead_time_volatility,aog_cost_per_day,supplier_id
PN-1,Engine,Critical,12,20,26,88,High,450000,SUP-0001
PN-2,Avionics,High,3
";
        let suppliers = "\
supplier_id,supplier_name,region,country,tier,on_time_delivery_pct,risk_exposure
SUP-0001,Aero,Europe,France,Tier-1,90.0,Low
SUP-0002,Europe
";
        let (reader, _temp) = create_reader(inventory, suppliers).await;

        let components = reader.load_components().await.unwrap();
        let suppliers = reader.load_suppliers().await.unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(suppliers.len(), 2);
        assert_eq!(suppliers[1].supplier_name.as_deref(), Some("Europe"));
        assert_eq!(suppliers[1].region, "");

        let dataset = Dataset::from_records(components, suppliers);

        let scored: Vec<_> = dataset
            .pairs()
            .map(|(component, _)| component.part_number.as_str())
            .collect();
        assert_eq!(scored, vec!["PN-1"]);

        let rejected: Vec<_> = dataset
            .rejected()
            .iter()
            .map(|r| (r.kind, r.row, r.identifier.as_str(), r.error.clone()))
            .collect();
        assert_eq!(
            rejected,
            vec![
                (
                    RecordKind::Supplier,
                    1,
                    "SUP-0002",
                    ValidationError::missing_field("region")
                ),
                (
                    RecordKind::Component,
                    1,
                    "PN-2",
                    ValidationError::missing_field("lead_time_volatility")
                ),
            ]
        );
    }

    #[tokio::test]
    async fn header_only_file_is_empty() {
        let inventory = INVENTORY.lines().next().unwrap().to_string() + "\n";
        let (reader, _temp) = create_reader(&inventory, SUPPLIERS).await;

        assert!(reader.load_components().await.unwrap().is_empty());
    }
}
