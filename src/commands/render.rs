//! Render, html, validate and summary command implementations.

use super::models::load_profile_file;
use crate::advisor::summarize;
use crate::aggregator::format_millis;
use crate::output::{write_html, write_summary};
use crate::render::{render_html, render_text, ExpansionState, HtmlConfig, TextOptions};
use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Print the profile tree to stdout
///
/// **Public** - `render` command
pub fn execute_render(input: &Path, expand_all: bool, options: &TextOptions) -> Result<()> {
    let profile = load_profile_file(input)?;

    let state = if expand_all {
        ExpansionState::fully_expanded()
    } else {
        ExpansionState::new()
    };

    println!("{}", render_text(&profile.report(&state), options));
    Ok(())
}

/// Write a standalone HTML report
///
/// **Public** - `html` command
pub fn execute_html(input: &Path, output: &Path, title: Option<String>) -> Result<()> {
    let profile = load_profile_file(input)?;

    let mut config = HtmlConfig::new();
    if let Some(title) = title {
        config = config.with_title(title);
    }

    let html = render_html(&profile.report(&ExpansionState::new()), &config);
    write_html(&html, output).context("Failed to write HTML report")?;

    info!("✓ Report written to: {}", output.display());
    Ok(())
}

/// Validate a profile and print its shape
///
/// **Public** - `validate` command
pub fn execute_validate(input: &Path) -> Result<()> {
    println!("Validating profile: {}", input.display());

    let profile = load_profile_file(input)?;
    let shards = profile.response.shards();

    let searches: usize = shards.iter().map(|s| s.searches.len()).sum();
    let aggregations: usize = shards.iter().map(|s| s.aggregations.len()).sum();

    println!("✓ Valid profile JSON");
    println!("  Shards: {}", shards.len());
    println!("  Searches: {}", searches);
    println!("  Aggregations: {}", aggregations);
    println!(
        "  Reference duration: {}",
        format_millis(profile.reference_nanos)
    );

    Ok(())
}

/// Print or write the advisory summary payload
///
/// **Public** - `summary` command
pub fn execute_summary(input: &Path, output: Option<&Path>) -> Result<()> {
    let profile = load_profile_file(input)?;
    let summary = summarize(&profile.response);

    match output {
        Some(path) => {
            write_summary(&summary, path).context("Failed to write summary JSON")?;
            info!("✓ Summary written to: {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
