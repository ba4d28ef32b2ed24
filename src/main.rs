//! Sky-Guard pipeline runner.
//!
//! Usage:
//!   sky-guard [--data-dir DIR] [--output-dir DIR] [--top-n N]
//!             [--max-recommendations N] [--skip-ai]
//!
//! Settings not given on the command line come from `SKY_GUARD__*`
//! environment variables (and `.env`).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use sky_guard::adapters::{CsvDatasetReader, JsonReportWriter, OpenRouterConfig, OpenRouterProvider};
use sky_guard::application::{
    PipelineHandler, PipelineSettings, RecommendationSettings, RunPipelineCommand,
};
use sky_guard::config::{AiConfig, AppConfig};
use sky_guard::domain::foundation::group_thousands;
use sky_guard::ports::AIProvider;
use sky_guard::telemetry;

#[derive(Debug, Parser)]
#[command(name = "sky-guard", version, about = "Aviation MRO inventory risk engine")]
struct Args {
    /// Directory holding inventory_master.csv and supplier_network.csv
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory receiving the JSON reports
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Number of high-risk components listed as top risks
    #[arg(long)]
    top_n: Option<usize>,

    /// Number of top risks sent to the reasoning service
    #[arg(long)]
    max_recommendations: Option<usize>,

    /// Skip the recommendation stage even when an API key is configured
    #[arg(long)]
    skip_ai: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.pipeline.data_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.pipeline.output_dir = dir.clone();
        }
        if let Some(top_n) = self.top_n {
            config.pipeline.top_n = top_n;
        }
        if let Some(max) = self.max_recommendations {
            config.ai.max_components = max;
        }
    }
}

fn build_provider(ai: &AiConfig) -> Result<Option<Arc<dyn AIProvider>>> {
    let Some(key) = ai.api_key() else {
        tracing::warn!("OpenRouter API key not configured, recommendations disabled");
        return Ok(None);
    };

    let config = OpenRouterConfig::from_secret(key.clone())
        .with_model(ai.model.clone())
        .with_base_url(ai.base_url.clone())
        .with_referer(ai.referer.clone())
        .with_timeout(ai.timeout());
    let provider = OpenRouterProvider::new(config).context("failed to build OpenRouter client")?;
    Ok(Some(Arc::new(provider)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    args.apply(&mut config);
    telemetry::init(&config.logging);
    config.validate().context("invalid configuration")?;

    let reader = CsvDatasetReader::new(&config.pipeline.data_dir).with_file_names(
        config.pipeline.inventory_file.clone(),
        config.pipeline.supplier_file.clone(),
    );
    let writer = JsonReportWriter::new(&config.pipeline.output_dir);
    let provider = if args.skip_ai {
        tracing::info!("Recommendation stage skipped by --skip-ai");
        None
    } else {
        build_provider(&config.ai)?
    };

    let settings = PipelineSettings {
        top_n: config.pipeline.top_n,
        max_recommendations: config.ai.max_components,
        recommendation: RecommendationSettings {
            temperature: config.ai.temperature,
            max_tokens: config.ai.max_tokens,
            concurrency: config.ai.concurrency,
        },
        roi: config.roi.assumptions(),
    };

    let handler = PipelineHandler::new(Arc::new(reader), Arc::new(writer), provider, settings);
    let result = handler
        .handle(RunPipelineCommand::now())
        .await
        .context("pipeline run failed")?;

    let distribution = result.summary.risk_distribution;
    println!("Sky-Guard run {}", result.run_id);
    println!(
        "  analyzed: {} (rejected {})",
        result.summary.total_components_analyzed, result.summary.rejected_records
    );
    println!(
        "  risk: {} high / {} medium / {} low",
        distribution.high_risk, distribution.medium_risk, distribution.low_risk
    );
    println!(
        "  exposure: ${}",
        group_thousands(result.summary.financial_metrics.total_exposure_usd)
    );
    if let Some(coverage) = result.coverage {
        println!(
            "  recommendations: {} ({} fallback)",
            coverage.requested, coverage.fallbacks
        );
    }
    println!("  {}", result.roi.executive_summary.value_proposition);
    println!("  reports: {}", config.pipeline.output_dir.display());

    Ok(())
}
