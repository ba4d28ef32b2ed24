//! Dataset Adapters.
//!
//! Implementations of the DatasetReader port.

mod csv_reader;

pub use csv_reader::{CsvDatasetReader, DEFAULT_INVENTORY_FILE, DEFAULT_SUPPLIER_FILE};
