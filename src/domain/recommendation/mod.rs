//! Recommendation module - structured mitigation advice and its recovery
//! from reasoning-service text.

mod normalizer;
mod prompt;
mod record;
#[allow(clippy::module_inception)]
mod recommendation;

pub use normalizer::{FallbackReason, NormalizedRecommendation, RecommendationNormalizer};
pub use prompt::RecommendationPrompt;
pub use record::{ComponentSnapshot, RecommendationCoverage, RecommendationRecord};
pub use recommendation::{
    ConfidenceLevel, MitigationOption, Recommendation, FALLBACK_ACTION, FALLBACK_EXPECTED_ROI,
    FALLBACK_ROOT_CAUSE,
};
