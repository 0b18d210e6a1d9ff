//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::transform::MissingPhotoPolicy;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// donorflat - flatten donor survey profiles
///
/// Reads a JSON array of donor profiles, flattens every profile into a
/// fixed record with a derived age and a question-and-answer summary,
/// and writes the records as a JSON array.
///
/// Examples:
///   donorflat
///   donorflat --input exports/donors.json --output flat.json
///   donorflat --as-of 2024-06-15 --missing-photo fail
///   donorflat --dry-run
///   donorflat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Donor profile file to read [default: donorprofiles.json]
    #[arg(short, long, value_name = "FILE", env = "DONORFLAT_INPUT")]
    pub input: Option<PathBuf>,

    /// File to write flattened records to [default: a2_profiles.json]
    #[arg(short, long, value_name = "FILE", env = "DONORFLAT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .donorflat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Processing date for age calculation (YYYY-MM-DD)
    ///
    /// Defaults to today's local date.
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// What to do with donors that have no photos
    #[arg(long, value_name = "POLICY")]
    pub missing_photo: Option<MissingPhotoPolicy>,

    /// Write single-line JSON instead of pretty-printed output
    #[arg(long)]
    pub compact: bool,

    /// Convert and summarise without writing the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .donorflat.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_args() -> Args {
        Args {
            input: None,
            output: None,
            config: None,
            as_of: None,
            missing_photo: None,
            compact: false,
            dry_run: false,
            init_config: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "donorflat",
            "--input",
            "in.json",
            "--as-of",
            "2024-06-15",
            "--missing-photo",
            "fail",
            "--compact",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("in.json")));
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(args.missing_photo, Some(MissingPhotoPolicy::Fail));
        assert!(args.compact);
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        assert!(Args::try_parse_from(["donorflat", "--as-of", "15/06/2024"]).is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
