//! Output record serialization.

use crate::error::ConvertError;
use crate::models::OutputRecord;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Renders records as a JSON array followed by a newline.
///
/// Pretty output uses two-space indentation. HTML-sensitive characters
/// are written as-is.
pub fn render_records(records: &[OutputRecord], pretty: bool) -> serde_json::Result<String> {
    let mut output = if pretty {
        serde_json::to_string_pretty(records)?
    } else {
        serde_json::to_string(records)?
    };
    output.push('\n');
    Ok(output)
}

/// Writes records to `path`, replacing any existing file.
pub fn write_records(
    records: &[OutputRecord],
    path: &Path,
    pretty: bool,
) -> Result<(), ConvertError> {
    let output = render_records(records, pretty)?;

    fs::write(path, &output).map_err(|source| ConvertError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {} bytes to {}", output.len(), path.display());

    Ok(())
}
