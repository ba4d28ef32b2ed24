//! Pipeline command handlers.

mod generate_recommendations;
mod run_pipeline;
mod score_inventory;

pub use generate_recommendations::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, GenerateRecommendationsResult,
    RecommendationSettings,
};
pub use run_pipeline::{
    PipelineHandler, PipelineSettings, RunPipelineCommand, RunPipelineResult,
};
pub use score_inventory::{ScoreInventoryHandler, ScoreInventoryResult};
