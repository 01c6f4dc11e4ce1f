//! Reading profile input and writing the advisory summary.

use crate::advisor::ProfileSummary;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Read};
use std::path::Path;

/// Read raw profile text from a file, or from stdin when the path is `-`
///
/// **Public** - input for every command
///
/// # Errors
/// * `OutputError::Io` - File could not be read
pub fn read_input(input_path: impl AsRef<Path>) -> Result<String, OutputError> {
    let input_path = input_path.as_ref();

    if input_path == Path::new("-") {
        debug!("Reading profile from stdin");
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    debug!("Reading profile from: {}", input_path.display());
    let text = std::fs::read_to_string(input_path)?;
    debug!("Read {} bytes", text.len());

    Ok(text)
}

/// Write the advisory summary as pretty JSON
///
/// **Public** - used by the `summary` command
///
/// # Errors
/// * `OutputError::Io` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_summary(
    summary: &ProfileSummary,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    super::prepare_output_path(output_path)?;

    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, summary)?;

    info!(
        "Summary written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
