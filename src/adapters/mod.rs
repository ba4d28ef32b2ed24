//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Reasoning service providers (OpenRouter, mock)
//! - `dataset` - CSV dataset reader
//! - `report` - JSON report writer

pub mod ai;
pub mod dataset;
pub mod report;

pub use ai::{MockAIProvider, OpenRouterConfig, OpenRouterProvider};
pub use dataset::CsvDatasetReader;
pub use report::JsonReportWriter;
