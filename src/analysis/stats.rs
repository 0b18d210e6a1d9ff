//! Per-batch conversion statistics.

use crate::fields::FIELD_TABLE;
use crate::models::{DonorDocument, OutputRecord};
use crate::transform::age::parse_birth_date;
use crate::transform::INTRO;
use std::collections::BTreeMap;

/// Summary of a converted batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Number of records produced.
    pub total: usize,
    /// Records with a non-empty `user_image`.
    pub with_photo: usize,
    /// Records with a non-blank biography.
    pub with_bio: usize,
    /// Records whose summary holds more than the intro sentence.
    pub with_answers: usize,
    /// Donors whose date of birth could not be parsed.
    pub unparsed_birth_dates: usize,
    /// How many records left each answer field at its default.
    pub defaulted_fields: BTreeMap<&'static str, usize>,
}

impl BatchSummary {
    /// Builds a summary from the input documents and their records.
    pub fn from_batch(donors: &[DonorDocument], records: &[OutputRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };

        for donor in donors {
            if parse_birth_date(&donor.user.date_of_birth).is_none() {
                summary.unparsed_birth_dates += 1;
            }
        }

        for record in records {
            if !record.user_image.is_empty() {
                summary.with_photo += 1;
            }
            if !record.profile_bio.trim().is_empty() {
                summary.with_bio += 1;
            }
            if record.text.len() > INTRO.len() {
                summary.with_answers += 1;
            }

            for (key, value) in record.fields.iter() {
                if value.is_default() {
                    *summary.defaulted_fields.entry(key.as_str()).or_insert(0) += 1;
                }
            }
        }

        summary
    }

    /// Fields that were defaulted in every record, in table order.
    pub fn never_answered(&self) -> Vec<&'static str> {
        if self.total == 0 {
            return Vec::new();
        }
        FIELD_TABLE
            .iter()
            .map(|spec| spec.key.as_str())
            .filter(|name| self.defaulted_fields.get(name) == Some(&self.total))
            .collect()
    }
}
