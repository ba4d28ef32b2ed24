//! JSON Report Writer - Implementation of ReportWriter on the local filesystem.

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::roi::RoiAnalysis;
use crate::ports::{RecommendationReport, ReportWriter, RiskReport};

pub const RISK_REPORT_FILE: &str = "risk_analysis.json";
pub const RECOMMENDATIONS_FILE: &str = "ai_recommendations.json";
pub const ROI_REPORT_FILE: &str = "roi_analysis.json";

/// Writes each report as pretty-printed JSON into one output directory.
///
/// ```text
/// {output_dir}/
/// ├── risk_analysis.json
/// ├── ai_recommendations.json
/// └── roi_analysis.json
/// ```
///
/// Files are written to `{name}.tmp`, synced, then renamed into place, so a
/// crash mid-write never leaves a truncated report behind.
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    output_dir: PathBuf,
}

impl JsonReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    async fn write_json<T: Serialize>(&self, file_name: &str, value: &T) -> Result<(), DomainError> {
        let final_path = self.output_dir.join(file_name);
        let content = serde_json::to_string_pretty(value).map_err(|e| {
            write_error(&final_path, format!("Failed to serialize report: {}", e))
        })?;

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            write_error(
                &final_path,
                format!("Failed to create directory {}: {}", self.output_dir.display(), e),
            )
        })?;

        let temp_path = self.output_dir.join(format!("{}.tmp", file_name));
        if let Err(e) = persist(&temp_path, &final_path, content.as_bytes()).await {
            // the temp file may not exist yet
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        tracing::info!(path = %final_path.display(), bytes = content.len(), "Report written");
        Ok(())
    }
}

/// Writes `bytes` to `temp_path`, syncs it, then renames it over `final_path`.
async fn persist(temp_path: &Path, final_path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
    {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            write_error(
                final_path,
                format!("Failed to create temp file {}: {}", temp_path.display(), e),
            )
        })?;

        file.write_all(bytes).await.map_err(|e| {
            write_error(
                final_path,
                format!("Failed to write to temp file {}: {}", temp_path.display(), e),
            )
        })?;

        file.sync_all().await.map_err(|e| {
            write_error(
                final_path,
                format!("Failed to sync temp file {}: {}", temp_path.display(), e),
            )
        })?;
    }

    fs::rename(temp_path, final_path).await.map_err(|e| {
        write_error(
            final_path,
            format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ),
        )
    })
}

fn write_error(path: &Path, message: String) -> DomainError {
    DomainError::new(ErrorCode::ReportWriteFailed, message)
        .with_detail("path", path.display().to_string())
}

#[async_trait]
impl ReportWriter for JsonReportWriter {
    async fn write_risk_report(&self, report: &RiskReport) -> Result<(), DomainError> {
        self.write_json(RISK_REPORT_FILE, report).await
    }

    async fn write_recommendations(
        &self,
        report: &RecommendationReport,
    ) -> Result<(), DomainError> {
        self.write_json(RECOMMENDATIONS_FILE, report).await
    }

    async fn write_roi_report(&self, analysis: &RoiAnalysis) -> Result<(), DomainError> {
        self.write_json(ROI_REPORT_FILE, analysis).await
    }
}
