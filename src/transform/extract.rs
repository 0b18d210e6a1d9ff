//! Typed answer extraction.
//!
//! A missing key, a `null` value and a value of the wrong type all yield
//! the same default. No coercion between strings and numbers is attempted.

use crate::fields::{AnswerKey, FieldKind};
use crate::models::{AnswerValue, DonorDocument, FieldValue};

/// Returns the answer as a string, or `""`.
pub fn extract_string(donor: &DonorDocument, key: AnswerKey) -> String {
    match donor.answers.value(key) {
        AnswerValue::Text(s) => s.clone(),
        AnswerValue::Absent | AnswerValue::Number(_) | AnswerValue::Flag(_) => String::new(),
    }
}

/// Returns the answer truncated toward zero, or `0`.
pub fn extract_int(donor: &DonorDocument, key: AnswerKey) -> i64 {
    match donor.answers.value(key) {
        // `as` saturates out-of-range values
        AnswerValue::Number(n) => n.trunc() as i64,
        AnswerValue::Absent | AnswerValue::Text(_) | AnswerValue::Flag(_) => 0,
    }
}

/// Extracts a field according to its kind.
pub fn extract_field(donor: &DonorDocument, key: AnswerKey, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Text => FieldValue::Text(extract_string(donor, key)),
        FieldKind::Integer => FieldValue::Integer(extract_int(donor, key)),
    }
}
