//! PipelineHandler - Runs every stage of one Sky-Guard analysis.
//!
//! Stages run in order: score, summarize, write the risk report, recommend
//! (when a provider is configured), compute ROI, write the remaining reports.
//! Only port failures (unreadable dataset, unwritable report) stop the run.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RunId, Timestamp};
use crate::domain::recommendation::{RecommendationCoverage, RecommendationRecord};
use crate::domain::risk::{top_risks, RiskAssessment, RiskSummary};
use crate::domain::roi::{RoiAnalysis, RoiAssumptions, RoiCalculator};
use crate::ports::{
    AIProvider, DatasetReader, RecommendationMetadata, RecommendationReport, ReportWriter,
    RiskReport,
};

use super::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, RecommendationSettings,
    ScoreInventoryHandler,
};

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// How many high-risk components the risk report lists as top risks.
    pub top_n: usize,
    /// How many of the top risks get a recommendation.
    pub max_recommendations: usize,
    pub recommendation: RecommendationSettings,
    pub roi: RoiAssumptions,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            top_n: 10,
            max_recommendations: 5,
            recommendation: RecommendationSettings::default(),
            roi: RoiAssumptions::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunPipelineCommand {
    pub run_id: RunId,
    pub started_at: Timestamp,
}

impl RunPipelineCommand {
    pub fn now() -> Self {
        Self {
            run_id: RunId::new(),
            started_at: Timestamp::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunPipelineResult {
    pub run_id: RunId,
    pub summary: RiskSummary,
    pub top_risk_count: usize,
    /// Absent when the recommendation stage was skipped.
    pub coverage: Option<RecommendationCoverage>,
    pub roi: RoiAnalysis,
}

pub struct PipelineHandler {
    scorer: ScoreInventoryHandler,
    recommender: Option<GenerateRecommendationsHandler>,
    writer: Arc<dyn ReportWriter>,
    settings: PipelineSettings,
}

impl PipelineHandler {
    /// Passing no provider skips the recommendation stage.
    pub fn new(
        reader: Arc<dyn DatasetReader>,
        writer: Arc<dyn ReportWriter>,
        provider: Option<Arc<dyn AIProvider>>,
        settings: PipelineSettings,
    ) -> Self {
        let recommender = provider.map(|provider| {
            GenerateRecommendationsHandler::new(provider, settings.recommendation.clone())
        });
        Self {
            scorer: ScoreInventoryHandler::new(reader),
            recommender,
            writer,
            settings,
        }
    }

    pub async fn handle(&self, cmd: RunPipelineCommand) -> Result<RunPipelineResult, DomainError> {
        let run_id = cmd.run_id;
        tracing::info!(run_id = %run_id, "Pipeline started");

        // 1. Load, validate, score, rank
        let scored = self.scorer.handle().await?;

        // 2. Summarize
        let summary =
            RiskSummary::from_assessments(&scored.assessments, scored.rejected.len(), cmd.started_at);
        let top: Vec<_> = top_risks(&scored.assessments, self.settings.top_n)
            .into_iter()
            .cloned()
            .collect();

        // 3. Persist risk report
        let report = RiskReport {
            run_id,
            summary: summary.clone(),
            top_risks: top.clone(),
            assessments: scored.assessments,
            rejected_records: scored.rejected,
        };
        self.writer.write_risk_report(&report).await?;

        // 4. Recommend
        let (records, coverage) = self.recommend(run_id, &top).await?;

        // 5. ROI
        let roi = RoiCalculator::new(self.settings.roi.clone()).calculate(
            &summary,
            &records,
            cmd.started_at.date(),
        );
        self.writer.write_roi_report(&roi).await?;

        tracing::info!(
            run_id = %run_id,
            analyzed = summary.total_components_analyzed,
            rejected = summary.rejected_records,
            high_risk = summary.risk_distribution.high_risk,
            top_risks = top.len(),
            verdict = ?roi.executive_summary.verdict,
            "Pipeline finished"
        );

        Ok(RunPipelineResult {
            run_id,
            summary,
            top_risk_count: top.len(),
            coverage,
            roi,
        })
    }

    async fn recommend(
        &self,
        run_id: RunId,
        top: &[RiskAssessment],
    ) -> Result<(Vec<RecommendationRecord>, Option<RecommendationCoverage>), DomainError> {
        let Some(recommender) = &self.recommender else {
            tracing::warn!(run_id = %run_id, "No AI provider configured, skipping recommendations");
            return Ok((Vec::new(), None));
        };

        let assessments = top
            .iter()
            .take(self.settings.max_recommendations)
            .cloned()
            .collect();
        let result = recommender
            .handle(GenerateRecommendationsCommand {
                run_id,
                assessments,
            })
            .await;

        let report = RecommendationReport {
            metadata: RecommendationMetadata {
                run_id,
                provider: result.provider.name.clone(),
                model_used: result.provider.model.clone(),
                total_recommendations: result.records.len(),
                coverage: result.coverage,
            },
            recommendations: result.records,
        };
        self.writer.write_recommendations(&report).await?;

        Ok((report.recommendations, Some(result.coverage)))
    }
}
