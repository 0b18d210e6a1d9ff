//! Donor record transformation.
//!
//! Turns one [`DonorDocument`] into one [`OutputRecord`]. Records are
//! independent of each other; a batch is the transform applied in order.

pub mod age;
pub mod extract;
pub mod summary;

pub use summary::INTRO;

use age::{age_on, parse_birth_date, zero_date};
use extract::extract_field;
use summary::build_summary;

use crate::error::ConvertError;
use crate::fields::FIELD_TABLE;
use crate::models::{DonorDocument, FlatFields, OutputRecord};
use chrono::NaiveDate;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do with a donor that has no photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingPhotoPolicy {
    /// Leave `user_image` empty and log a warning (default)
    #[default]
    Empty,
    /// Abort the whole batch
    Fail,
}

/// Settings shared by every record in a batch.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Processing date used for age calculation.
    pub today: NaiveDate,
    pub missing_photo: MissingPhotoPolicy,
}

/// Transforms a single donor document.
pub fn transform(
    donor: &DonorDocument,
    options: &TransformOptions,
) -> Result<OutputRecord, ConvertError> {
    let user = &donor.user;
    if donor.answers.is_empty() {
        debug!("Donor {} has no known answers", user.id);
    }

    let user_image = match donor.photos.first() {
        Some(photo) => photo.cropped_source.clone(),
        None => match options.missing_photo {
            MissingPhotoPolicy::Empty => {
                warn!("Donor {} has no photos, leaving user_image empty", user.id);
                String::new()
            }
            MissingPhotoPolicy::Fail => {
                return Err(ConvertError::MissingPhoto {
                    donor_id: user.id.clone(),
                })
            }
        },
    };

    let birth_date = parse_birth_date(&user.date_of_birth).unwrap_or_else(|| {
        warn!(
            "Donor {} has unparseable date of birth {:?}, using {}",
            user.id,
            user.date_of_birth,
            zero_date()
        );
        zero_date()
    });

    let mut fields = FlatFields::default();
    for spec in FIELD_TABLE {
        fields.push(spec.key, extract_field(donor, spec.key, spec.kind));
    }

    Ok(OutputRecord {
        user: user.id.clone(),
        user_image,
        text: build_summary(donor),
        fields,
        donor_code: user.donor_code.clone(),
        profile_bio: user.freeze_member.profile_bio.clone(),
        age: age_on(birth_date, options.today),
    })
}

/// Transforms every document in order, stopping at the first fatal error.
///
/// The progress bar is advanced once per record; pass
/// [`ProgressBar::hidden`] to run silently.
pub fn convert_batch(
    donors: &[DonorDocument],
    options: &TransformOptions,
    progress: &ProgressBar,
) -> Result<Vec<OutputRecord>, ConvertError> {
    progress.set_length(donors.len() as u64);

    let mut records = Vec::with_capacity(donors.len());
    for donor in donors {
        let record = transform(donor, options)?;
        debug!(
            "Converted donor {} ({} known answers)",
            record.user,
            donor.answers.len()
        );
        records.push(record);
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::AnswerKey;
    use crate::models::FieldValue;
    use serde_json::{json, Value};

    fn options(today: NaiveDate) -> TransformOptions {
        TransformOptions {
            today,
            missing_photo: MissingPhotoPolicy::Empty,
        }
    }

    fn june_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn parse(value: Value) -> DonorDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_book_scenario() {
        let donor = parse(json!({
            "answers": {"book": {"answer": {"value": "Dune"}, "question": {"label": "ignored"}}},
            "user": {"id": "u1", "dateOfBirth": "1990-01-01T00:00:00Z"},
            "photos": [{"cropped_source": "img.jpg"}]
        }));

        let record = transform(&donor, &options(june_2024())).unwrap();

        assert!(record.text.ends_with("what are your favorite books: dune."));
        assert_eq!(record.user_image, "img.jpg");
        assert_eq!(record.user, "u1");
        assert_eq!(record.age, 34);
        assert_eq!(
            record.fields.get(AnswerKey::Book),
            Some(&FieldValue::Text("Dune".to_string()))
        );
    }

    #[test]
    fn test_weight_scenario() {
        let with_weight = |value: Value| {
            parse(json!({
                "answers": {"weight": {"answer": {"value": value}, "question": {"label": "Weight"}}},
                "photos": [{"cropped_source": "a.jpg"}]
            }))
        };

        let record = transform(&with_weight(json!(150)), &options(june_2024())).unwrap();
        assert_eq!(
            record.fields.get(AnswerKey::Weight),
            Some(&FieldValue::Integer(150))
        );

        let record = transform(&with_weight(json!("heavy")), &options(june_2024())).unwrap();
        assert_eq!(
            record.fields.get(AnswerKey::Weight),
            Some(&FieldValue::Integer(0))
        );
    }

    #[test]
    fn test_null_answer_entry_is_defaulted() {
        let donor = parse(json!({
            "answers": {"book": null, "weight": {"answer": {"value": 150}}},
            "user": {"id": "u1"},
            "photos": [{"cropped_source": "a"}]
        }));

        let record = transform(&donor, &options(june_2024())).unwrap();
        assert_eq!(record.text, INTRO);
        assert_eq!(
            record.fields.get(AnswerKey::Weight),
            Some(&FieldValue::Integer(150))
        );
        assert_eq!(
            record.fields.get(AnswerKey::Book),
            Some(&FieldValue::Text(String::new()))
        );
    }

    #[test]
    fn test_null_first_photo_gives_empty_image() {
        let strict = TransformOptions {
            today: june_2024(),
            missing_photo: MissingPhotoPolicy::Fail,
        };
        let donor = parse(json!({"user": {"id": "u1"}, "photos": [null]}));

        let record = transform(&donor, &strict).unwrap();
        assert_eq!(record.user_image, "");
    }

    #[test]
    fn test_passthrough_fields_are_verbatim() {
        let donor = parse(json!({
            "user": {
                "id": " ID_42 ",
                "donorCode": "Dc_9",
                "dateOfBirth": "2000-06-15T00:00:00Z",
                "freeze_member": {"profile_bio": "Loves_Hiking"}
            },
            "photos": [{"cropped_source": "first.jpg"}, {"cropped_source": "second.jpg"}]
        }));

        let record = transform(&donor, &options(june_2024())).unwrap();

        assert_eq!(record.user, " ID_42 ");
        assert_eq!(record.donor_code, "Dc_9");
        assert_eq!(record.profile_bio, "Loves_Hiking");
        assert_eq!(record.user_image, "first.jpg");
        assert!(record.text.ends_with("donor information: loves hiking."));
        assert_eq!(record.age, 24);
    }

    #[test]
    fn test_every_table_field_is_populated_with_defaults() {
        let donor = parse(json!({"photos": [{"cropped_source": "x.jpg"}]}));
        let record = transform(&donor, &options(june_2024())).unwrap();

        assert_eq!(record.fields.iter().count(), FIELD_TABLE.len());
        assert!(record.fields.iter().all(|(_, value)| value.is_default()));
        assert_eq!(record.text, INTRO);
    }

    #[test]
    fn test_unparseable_birth_date_falls_back_to_zero_date() {
        let donor = parse(json!({
            "user": {"id": "u1", "dateOfBirth": "not a date"},
            "photos": [{"cropped_source": "x.jpg"}]
        }));

        let record = transform(&donor, &options(june_2024())).unwrap();
        assert_eq!(record.age, 2023);
    }

    #[test]
    fn test_missing_photo_policy() {
        let donor = parse(json!({"user": {"id": "u9"}, "photos": []}));

        let record = transform(&donor, &options(june_2024())).unwrap();
        assert_eq!(record.user_image, "");

        let strict = TransformOptions {
            today: june_2024(),
            missing_photo: MissingPhotoPolicy::Fail,
        };
        match transform(&donor, &strict) {
            Err(ConvertError::MissingPhoto { donor_id }) => assert_eq!(donor_id, "u9"),
            other => panic!("expected MissingPhoto, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_batch_preserves_count_and_order() {
        let donors: Vec<DonorDocument> = (0..5)
            .map(|i| {
                let photos = if i % 2 == 0 {
                    json!([{"cropped_source": "p.jpg"}])
                } else {
                    json!([])
                };
                parse(json!({"user": {"id": format!("u{}", i)}, "photos": photos}))
            })
            .collect();

        let records =
            convert_batch(&donors, &options(june_2024()), &ProgressBar::hidden()).unwrap();

        assert_eq!(records.len(), donors.len());
        let ids: Vec<&str> = records.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(ids, vec!["u0", "u1", "u2", "u3", "u4"]);
    }

    #[test]
    fn test_convert_batch_aborts_on_fatal_record() {
        let donors = vec![
            parse(json!({"user": {"id": "ok"}, "photos": [{"cropped_source": "p.jpg"}]})),
            parse(json!({"user": {"id": "bad"}})),
        ];
        let strict = TransformOptions {
            today: june_2024(),
            missing_photo: MissingPhotoPolicy::Fail,
        };

        assert!(convert_batch(&donors, &strict, &ProgressBar::hidden()).is_err());
    }
}
