//! Pipeline configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the pipeline reads its datasets and writes its reports
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the inventory and supplier CSV files
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory receiving the JSON reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_inventory_file")]
    pub inventory_file: String,

    #[serde(default = "default_supplier_file")]
    pub supplier_file: String,

    /// How many high-risk components are listed as top risks
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl PipelineConfig {
    /// Validate pipeline configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.inventory_file.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PIPELINE__INVENTORY_FILE"));
        }
        if self.supplier_file.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PIPELINE__SUPPLIER_FILE"));
        }
        if self.top_n == 0 {
            return Err(ValidationError::InvalidTopN);
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            inventory_file: default_inventory_file(),
            supplier_file: default_supplier_file(),
            top_n: default_top_n(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data/processed")
}

fn default_inventory_file() -> String {
    "inventory_master.csv".to_string()
}

fn default_supplier_file() -> String {
    "supplier_network.csv".to_string()
}

fn default_top_n() -> usize {
    10
}
