//! AI performance advisor.
//!
//! This module handles:
//! - Reducing a profile to a compact summary
//! - Embedding it in a fixed instructional prompt
//! - Calling the text-generation endpoint (one request at a time)
//! - Splitting the reply into display lines

pub mod client;
pub mod markdown;
pub mod prompt;
pub mod session;
pub mod summary;
pub mod types;

// Re-export main types
pub use client::{AdvisorConfig, GeminiClient, TextGenerator};
pub use markdown::{parse_lines, MarkdownLine};
pub use prompt::build_prompt;
pub use session::{analyze_profile, AdvisorSession, PendingAnalysis};
pub use summary::{summarize, ProfileSummary};
