//! HTTP client for the advisory text-generation endpoint.

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::config::{
    API_KEY_ENV, DEFAULT_ADVISOR_ENDPOINT, DEFAULT_ADVISOR_MODEL, DEFAULT_THINKING_BUDGET,
};
use crate::utils::error::AdvisorError;
use log::{debug, info};
use reqwest::blocking::Client;

/// Anything that can turn a prompt into reply text
///
/// Implemented by `GeminiClient`; tests substitute in-memory fakes.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Advisory endpoint configuration
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub thinking_budget: Option<u32>,
}

impl AdvisorConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_ADVISOR_MODEL.to_string(),
            endpoint: DEFAULT_ADVISOR_ENDPOINT.to_string(),
            thinking_budget: Some(DEFAULT_THINKING_BUDGET),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// URL of the `generateContent` method for the configured model
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

/// Client for Gemini-style `generateContent` endpoints
pub struct GeminiClient {
    client: Client,
    config: AdvisorConfig,
}

impl GeminiClient {
    /// Create a new client
    ///
    /// No request timeout is set; a slow reply is waited for.
    pub fn new(config: AdvisorConfig) -> Result<Self, AdvisorError> {
        if config.api_key.trim().is_empty() {
            return Err(AdvisorError::MissingApiKey(API_KEY_ENV));
        }

        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(AdvisorError::RequestFailed)?;

        Ok(Self { client, config })
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
        let url = self.config.url();
        info!("Requesting analysis from model: {}", self.config.model);
        debug!("Prompt length: {} bytes", prompt.len());

        let request = GenerateContentRequest::from_prompt(prompt, self.config.thinking_budget);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .map_err(AdvisorError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisorError::AnalysisFailed(format!(
                "HTTP {}: {}",
                status,
                response.text().unwrap_or_default()
            )));
        }

        let body: GenerateContentResponse = response.json().map_err(AdvisorError::RequestFailed)?;

        if let Some(error) = &body.error {
            return Err(AdvisorError::AnalysisFailed(format!(
                "{} ({}): {}",
                error.code,
                error.status.as_deref().unwrap_or("unknown"),
                error.message
            )));
        }

        Ok(body.text().unwrap_or_default())
    }
}
