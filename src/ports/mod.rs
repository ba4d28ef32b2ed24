//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Reasoning service that drafts recommendations
//! - `DatasetReader` - Source of raw inventory and supplier rows
//! - `ReportWriter` - Destination for risk, recommendation, and ROI reports

mod ai_provider;
mod dataset_reader;
mod report_writer;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use dataset_reader::DatasetReader;
pub use report_writer::{RecommendationMetadata, RecommendationReport, ReportWriter, RiskReport};
