//! GenerateRecommendationsHandler - Drafts mitigation plans for high-risk components.
//!
//! Each assessment becomes one prompt and one provider call. Calls run with a
//! bounded number in flight and results come back in input order. A failed
//! call or an unreadable reply never aborts the batch; it produces the
//! manual-review fallback for that component instead.

use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::domain::foundation::RunId;
use crate::domain::recommendation::{
    FallbackReason, NormalizedRecommendation, RecommendationCoverage, RecommendationNormalizer,
    RecommendationPrompt, RecommendationRecord,
};
use crate::domain::risk::RiskAssessment;
use crate::ports::{AIProvider, CompletionRequest, MessageRole, ProviderInfo, RequestMetadata};

/// Request shaping and concurrency for recommendation calls.
#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Maximum provider calls in flight.
    pub concurrency: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 1000,
            concurrency: 4,
        }
    }
}

/// Command to generate recommendations for already-ranked assessments.
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsCommand {
    pub run_id: RunId,
    pub assessments: Vec<RiskAssessment>,
}

#[derive(Debug, Clone)]
pub struct GenerateRecommendationsResult {
    /// One record per input assessment, in input order.
    pub records: Vec<RecommendationRecord>,
    pub coverage: RecommendationCoverage,
    pub provider: ProviderInfo,
}

pub struct GenerateRecommendationsHandler {
    provider: Arc<dyn AIProvider>,
    settings: RecommendationSettings,
}

impl GenerateRecommendationsHandler {
    pub fn new(provider: Arc<dyn AIProvider>, settings: RecommendationSettings) -> Self {
        Self { provider, settings }
    }

    pub async fn handle(&self, cmd: GenerateRecommendationsCommand) -> GenerateRecommendationsResult {
        let run_id = cmd.run_id;
        let provider = self.provider.provider_info();
        tracing::info!(
            run_id = %run_id,
            provider = %provider.name,
            model = %provider.model,
            components = cmd.assessments.len(),
            concurrency = self.settings.concurrency,
            "Generating recommendations"
        );

        let records: Vec<RecommendationRecord> = stream::iter(cmd.assessments.iter())
            .map(|assessment| async move {
                let normalized = self.recommend(run_id, assessment).await;
                RecommendationRecord::new(assessment, normalized)
            })
            .buffered(self.settings.concurrency.max(1))
            .collect()
            .await;

        let coverage = RecommendationCoverage::from_records(&records);
        if coverage.fallbacks > 0 {
            tracing::warn!(
                run_id = %run_id,
                requested = coverage.requested,
                fallbacks = coverage.fallbacks,
                "Some recommendations fell back to manual review"
            );
        }
        tracing::info!(
            run_id = %run_id,
            requested = coverage.requested,
            parsed = coverage.parsed,
            fallbacks = coverage.fallbacks,
            "Recommendations generated"
        );

        GenerateRecommendationsResult {
            records,
            coverage,
            provider,
        }
    }

    async fn recommend(&self, run_id: RunId, assessment: &RiskAssessment) -> NormalizedRecommendation {
        let prompt = RecommendationPrompt::for_assessment(assessment);
        let metadata = RequestMetadata::new(run_id, format!("{}:{}", run_id, assessment.part_number))
            .with_part_number(assessment.part_number.clone());
        let request = CompletionRequest::new(metadata)
            .with_message(MessageRole::User, prompt.into_string())
            .with_max_tokens(self.settings.max_tokens)
            .with_temperature(self.settings.temperature);

        match self.provider.complete(request).await {
            Ok(response) => {
                tracing::debug!(
                    part_number = %assessment.part_number,
                    total_tokens = response.usage.total_tokens,
                    "Provider responded"
                );
                RecommendationNormalizer::normalize(&response.content)
            }
            Err(error) => {
                tracing::warn!(
                    part_number = %assessment.part_number,
                    error = %error,
                    "Provider call failed, using fallback recommendation"
                );
                NormalizedRecommendation::fallback(FallbackReason::ServiceUnavailable)
            }
        }
    }
}
