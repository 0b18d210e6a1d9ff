//! Error types for batch conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Field-level problems (missing or mistyped answers, unparseable birth
/// dates) never surface here; they resolve to defaults inside the
/// transformer.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The donor profile file could not be read.
    #[error("Cannot read donor profiles from {}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The donor profile file is not a JSON array of donor documents.
    #[error("Malformed donor profiles in {}", .path.display())]
    MalformedInput {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A donor has no photos and the run is configured to fail on that.
    #[error("Donor {donor_id} has no photos")]
    MissingPhoto { donor_id: String },

    /// Output records could not be encoded.
    #[error("Failed to encode output records")]
    Encode(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("Cannot write output records to {}", .path.display())]
    OutputUnwritable {
        path: PathBuf,
        source: std::io::Error,
    },
}
