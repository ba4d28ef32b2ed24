//! Application handlers.
//!
//! Command handlers that orchestrate domain operations across ports.

pub mod pipeline;

pub use pipeline::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, GenerateRecommendationsResult,
    PipelineHandler, PipelineSettings, RecommendationSettings, RunPipelineCommand,
    RunPipelineResult, ScoreInventoryHandler, ScoreInventoryResult,
};
