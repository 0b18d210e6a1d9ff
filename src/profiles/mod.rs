//! Reading donor profiles and writing flattened records.
//!
//! These are the only parts of the converter that touch the filesystem.

pub mod reader;
pub mod writer;

pub use reader::read_donors;
pub use writer::write_records;
