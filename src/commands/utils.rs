use crate::utils::config::{DEFAULT_ADVISOR_MODEL, REQUIRED_FIELD};

/// Display version information
pub fn display_version() {
    println!("ES Profile Insight v{}", env!("CARGO_PKG_VERSION"));
    println!("Required input field: {}", REQUIRED_FIELD);
    println!("Default advisor model: {}", DEFAULT_ADVISOR_MODEL);
    println!();
    println!("Time-proportional visualization of Elasticsearch query profiles.");
}
