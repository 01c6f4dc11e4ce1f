//! Analyze command implementation.

use super::models::{load_profile_file, AnalyzeArgs};
use crate::advisor::{analyze_profile, parse_lines, AdvisorConfig, GeminiClient};
use crate::render::{render_analysis_text, TextOptions};
use crate::utils::config::{ANALYSIS_FAILED_PREFIX, API_KEY_ENV};
use crate::utils::error::AdvisorError;
use anyhow::{Context, Result};
use log::info;

/// Build an advisory client from optional CLI overrides
pub fn build_client(
    api_key: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
) -> Result<GeminiClient, AdvisorError> {
    let api_key = api_key.ok_or(AdvisorError::MissingApiKey(API_KEY_ENV))?;

    let mut config = AdvisorConfig::new(api_key);
    if let Some(model) = model {
        config = config.with_model(model);
    }
    if let Some(endpoint) = endpoint {
        config = config.with_endpoint(endpoint);
    }

    GeminiClient::new(config)
}

/// Send the profile summary to the advisor and print the reply
///
/// **Public** - `analyze` command
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let profile = load_profile_file(&args.input)?;
    let client = build_client(args.api_key, args.model, args.endpoint)
        .context("Failed to create advisory client")?;

    info!("Requesting AI analysis...");
    let reply = analyze_profile(&client, &profile.response)
        .map_err(|e| anyhow::anyhow!("{}{}", ANALYSIS_FAILED_PREFIX, e))?;

    let options = TextOptions::new().with_color(args.color);
    println!("{}", render_analysis_text(&parse_lines(&reply), &options));

    Ok(())
}
