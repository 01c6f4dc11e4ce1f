//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod explore;
pub mod models;
pub mod render;
pub mod utils;

// Re-export main command functions
pub use analyze::{build_client, execute_analyze};
pub use explore::{execute_explore, parse_command, Command, Explorer};
pub use models::{load_profile_file, AnalyzeArgs, LoadedProfile};
pub use render::{execute_html, execute_render, execute_summary, execute_validate};
pub use utils::display_version;
