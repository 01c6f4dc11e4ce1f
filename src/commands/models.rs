use crate::aggregator::reference_duration;
use crate::output::read_input;
use crate::parser::{parse_profile, ProfileResponse};
use crate::render::{build_report, ExpansionState, ReportView};
use crate::utils::error::ParseError;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// A validated profile together with its reference duration
///
/// The reference duration is computed once here and reused for every
/// render of this model.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub response: ProfileResponse,
    pub reference_nanos: u64,
}

impl LoadedProfile {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let response = parse_profile(text)?;
        let reference_nanos = reference_duration(&response);

        info!(
            "Loaded profile: {} shards, reference duration {} ns",
            response.shards().len(),
            reference_nanos
        );

        Ok(Self {
            response,
            reference_nanos,
        })
    }

    pub fn report(&self, state: &ExpansionState) -> ReportView {
        build_report(&self.response, self.reference_nanos, state)
    }
}

/// Read and validate a profile from a file (or stdin for `-`)
pub fn load_profile_file(path: &Path) -> Result<LoadedProfile> {
    let text = read_input(path)
        .with_context(|| format!("Failed to read profile from {}", path.display()))?;
    let profile = LoadedProfile::parse(&text)
        .with_context(|| format!("Invalid profile in {}", path.display()))?;
    Ok(profile)
}

/// Arguments for the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Profile input path (`-` for stdin)
    pub input: PathBuf,

    /// API key for the advisory endpoint
    pub api_key: Option<String>,

    /// Model name
    pub model: Option<String>,

    /// Base URL of the advisory endpoint
    pub endpoint: Option<String>,

    /// Emit ANSI colors
    pub color: bool,
}
