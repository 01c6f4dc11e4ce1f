//! Single-slot advisory session.
//!
//! At most one advisory request is outstanding at a time. `begin` checks
//! and sets the in-flight flag before any call is issued, so a repeated
//! trigger while a request is pending is a no-op. The reply (or failure)
//! replaces whatever the slot held before.

use super::client::TextGenerator;
use super::prompt::build_prompt;
use super::summary::summarize;
use crate::parser::ProfileResponse;
use crate::utils::config::{ANALYSIS_FAILED_PREFIX, EMPTY_ANALYSIS_FALLBACK};
use crate::utils::error::AdvisorError;
use log::{debug, info, warn};

/// Summarize, prompt and call the generator once
///
/// **Public** - one-shot advisory call without session state
///
/// # Errors
/// * `AdvisorError::AnalysisFailed` - The generator failed for any reason
/// * `AdvisorError::Serialization` - The summary could not be serialized
pub fn analyze_profile<G>(
    generator: &G,
    response: &ProfileResponse,
) -> Result<String, AdvisorError>
where
    G: TextGenerator + ?Sized,
{
    let prompt = build_prompt(&summarize(response))?;
    run_prompt(generator, &prompt)
}

fn run_prompt<G>(generator: &G, prompt: &str) -> Result<String, AdvisorError>
where
    G: TextGenerator + ?Sized,
{
    match generator.generate(prompt) {
        Ok(text) if text.trim().is_empty() => Ok(EMPTY_ANALYSIS_FALLBACK.to_string()),
        Ok(text) => Ok(text),
        Err(AdvisorError::AnalysisFailed(message)) => {
            warn!("Advisory call failed: {}", message);
            Err(AdvisorError::AnalysisFailed(message))
        }
        Err(other) => {
            warn!("Advisory call failed: {}", other);
            Err(AdvisorError::AnalysisFailed(other.to_string()))
        }
    }
}

/// A prompt that has claimed the in-flight slot
#[derive(Debug)]
pub struct PendingAnalysis {
    prompt: String,
}

impl PendingAnalysis {
    /// Issue the outbound call
    pub fn run<G>(&self, generator: &G) -> Result<String, AdvisorError>
    where
        G: TextGenerator + ?Sized,
    {
        run_prompt(generator, &self.prompt)
    }
}

/// In-flight flag plus the latest analysis
#[derive(Debug, Default)]
pub struct AdvisorSession {
    in_flight: bool,
    analysis: Option<String>,
}

impl AdvisorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn analysis(&self) -> Option<&str> {
        self.analysis.as_deref()
    }

    /// Claim the in-flight slot for `response`
    ///
    /// Returns `Ok(None)` while another request is outstanding.
    pub fn begin(
        &mut self,
        response: &ProfileResponse,
    ) -> Result<Option<PendingAnalysis>, AdvisorError> {
        if self.in_flight {
            debug!("Analysis already in flight, ignoring trigger");
            return Ok(None);
        }

        let prompt = build_prompt(&summarize(response))?;
        self.in_flight = true;
        Ok(Some(PendingAnalysis { prompt }))
    }

    /// Record the outcome of the outstanding request
    ///
    /// On failure the slot is cleared and a user-facing message is returned.
    pub fn finish(&mut self, outcome: Result<String, AdvisorError>) -> Result<&str, String> {
        self.in_flight = false;
        match outcome {
            Ok(text) => {
                info!("Analysis received ({} bytes)", text.len());
                Ok(self.analysis.insert(text).as_str())
            }
            Err(error) => {
                self.analysis = None;
                Err(format!("{}{}", ANALYSIS_FAILED_PREFIX, error))
            }
        }
    }

    /// Begin, call and finish in one step
    ///
    /// Returns `None` if a request was already in flight.
    pub fn trigger<G>(
        &mut self,
        generator: &G,
        response: &ProfileResponse,
    ) -> Option<Result<&str, String>>
    where
        G: TextGenerator + ?Sized,
    {
        let pending = match self.begin(response) {
            Ok(Some(pending)) => pending,
            Ok(None) => return None,
            Err(error) => return Some(Err(format!("{}{}", ANALYSIS_FAILED_PREFIX, error))),
        };
        let outcome = pending.run(generator);
        Some(self.finish(outcome))
    }

    /// Hide the current analysis
    pub fn dismiss(&mut self) {
        self.analysis = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingGenerator {
        calls: Cell<usize>,
        reply: Result<&'static str, &'static str>,
    }

    impl CountingGenerator {
        fn replying(reply: &'static str) -> Self {
            Self {
                calls: Cell::new(0),
                reply: Ok(reply),
            }
        }

        fn failing(message: &'static str) -> Self {
            Self {
                calls: Cell::new(0),
                reply: Err(message),
            }
        }
    }

    impl TextGenerator for CountingGenerator {
        fn generate(&self, _prompt: &str) -> Result<String, AdvisorError> {
            self.calls.set(self.calls.get() + 1);
            self.reply
                .map(str::to_string)
                .map_err(|m| AdvisorError::AnalysisFailed(m.to_string()))
        }
    }

    #[test]
    fn test_second_trigger_while_in_flight_is_ignored() {
        let generator = CountingGenerator::replying("# Summary");
        let response = ProfileResponse::default();
        let mut session = AdvisorSession::new();

        let first = session.begin(&response).unwrap();
        let second = session.begin(&response).unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert!(session.is_in_flight());

        let outcome = first.unwrap().run(&generator);
        assert_eq!(session.finish(outcome), Ok("# Summary"));

        assert_eq!(generator.calls.get(), 1);
        assert!(!session.is_in_flight());
        assert_eq!(session.analysis(), Some("# Summary"));
    }

    #[test]
    fn test_failure_clears_flag_and_slot() {
        let response = ProfileResponse::default();
        let mut session = AdvisorSession::new();

        let ok = CountingGenerator::replying("first");
        assert_eq!(session.trigger(&ok, &response), Some(Ok("first")));

        let failing = CountingGenerator::failing("boom");
        let result = session.trigger(&failing, &response).unwrap();
        let message = result.unwrap_err();

        assert!(message.starts_with(ANALYSIS_FAILED_PREFIX));
        assert!(message.contains("boom"));
        assert!(!session.is_in_flight());
        assert_eq!(session.analysis(), None);
        assert_eq!(failing.calls.get(), 1);
    }

    #[test]
    fn test_empty_reply_falls_back() {
        let generator = CountingGenerator::replying("  \n");
        let text = analyze_profile(&generator, &ProfileResponse::default()).unwrap();
        assert_eq!(text, EMPTY_ANALYSIS_FALLBACK);
    }

    #[test]
    fn test_late_reply_after_dismiss_still_lands() {
        let response = ProfileResponse::default();
        let mut session = AdvisorSession::new();

        let pending = session.begin(&response).unwrap().unwrap();
        session.dismiss();
        let outcome = pending.run(&CountingGenerator::replying("late"));
        session.finish(outcome).unwrap();

        assert_eq!(session.analysis(), Some("late"));
    }
}
