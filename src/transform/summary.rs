//! Summary text assembly.
//!
//! The summary is a short question-and-answer paragraph built from a fixed
//! subset of answers, followed by the donor's biography.

use crate::fields::{AnswerKey, SUMMARY_KEYS};
use crate::models::DonorDocument;

/// Opening sentence of every summary.
pub const INTRO: &str = "the following is a question and answer profile of an egg donor:";

/// Builds the normalized summary text for a donor.
pub fn build_summary(donor: &DonorDocument) -> String {
    let mut parts = vec![INTRO.to_string()];

    for &key in SUMMARY_KEYS {
        let Some(entry) = donor.answers.get(key) else {
            continue;
        };
        let value = match entry.answer.value.render() {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };

        let label = summary_label(key, &entry.question.label);
        parts.push(format!("{}: {}.", label, value));
    }

    let bio = &donor.user.freeze_member.profile_bio;
    if !bio.trim().is_empty() {
        parts.push(format!("Donor Information: {}.", bio));
    }

    normalize(&parts.join(" "))
}

/// Label for a summary line: the fixed override if the key has one,
/// otherwise the trimmed question text.
pub fn summary_label(key: AnswerKey, question_label: &str) -> &str {
    key.spec()
        .and_then(|spec| spec.summary_label)
        .unwrap_or_else(|| question_label.trim())
}

/// Lowercases the text and replaces underscores with spaces.
///
/// Characters are lowercased one at a time, so a word-final `Σ` becomes
/// `σ` rather than `ς`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| if c == '_' { ' ' } else { c })
        .flat_map(char::to_lowercase)
        .collect()
}
