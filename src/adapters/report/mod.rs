//! Report Adapters.
//!
//! Implementations of the ReportWriter port.

mod json_writer;

pub use json_writer::{
    JsonReportWriter, RECOMMENDATIONS_FILE, RISK_REPORT_FILE, ROI_REPORT_FILE,
};
