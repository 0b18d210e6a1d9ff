//! Donor profile loading.

use crate::error::ConvertError;
use crate::models::DonorDocument;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Parses a JSON array of donor documents. A top-level `null` is an empty batch.
pub fn parse_donors(content: &str) -> serde_json::Result<Vec<DonorDocument>> {
    let donors: Option<Vec<DonorDocument>> = serde_json::from_str(content)?;
    Ok(donors.unwrap_or_default())
}

/// Reads and decodes the donor profile file.
///
/// Fails before any record is transformed if the file is missing,
/// unreadable, or not a well-formed array of donor documents.
pub fn read_donors(path: &Path) -> Result<Vec<DonorDocument>, ConvertError> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", content.len(), path.display());

    parse_donors(&content).map_err(|source| ConvertError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}
