//! Data models for the donor profile converter.
//!
//! This module contains the input documents as exported by the donor
//! survey system and the flat output records written downstream.

use crate::fields::AnswerKey;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Like [`null_as_default`], and also defaults `null` elements of the list.
fn nulls_as_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// A single donor profile from the survey export.
///
/// Top-level keys other than these (such as `program`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DonorDocument {
    /// Survey answers keyed by answer key.
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: AnswerSheet,
    /// Identity block.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: User,
    /// Profile photos, most representative first.
    #[serde(default, deserialize_with = "nulls_as_default")]
    pub photos: Vec<Photo>,
}

/// Identity block of a donor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    /// Opaque user id.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Donor code shown to intended parents.
    #[serde(rename = "donorCode", default, deserialize_with = "null_as_default")]
    pub donor_code: String,
    /// Date of birth as an RFC 3339 timestamp.
    #[serde(rename = "dateOfBirth", default, deserialize_with = "null_as_default")]
    pub date_of_birth: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub freeze_member: FreezeMember,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FreezeMember {
    /// Free-text biography.
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_bio: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Photo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cropped_source: String,
}

/// The value a donor gave for one question.
///
/// Decoded once from arbitrary JSON. Arrays and objects carry no usable
/// scalar and decode as [`AnswerValue::Absent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AnswerValue {
    #[default]
    Absent,
    Text(String),
    Number(f64),
    Flag(bool),
}

impl AnswerValue {
    /// Renders the value for the summary text. `Absent` renders as nothing.
    pub fn render(&self) -> Option<String> {
        match self {
            AnswerValue::Absent => None,
            AnswerValue::Text(s) => Some(s.clone()),
            AnswerValue::Number(n) => Some(format_number(*n)),
            AnswerValue::Flag(b) => Some(b.to_string()),
        }
    }
}

/// Shortest round-trip formatting, switching to exponent form (`1e+06`,
/// `1e-05`) when the decimal exponent is below -4 or at least 6.
fn format_number(n: f64) -> String {
    let sci = format!("{:e}", n);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => return n.to_string(),
    };

    if (-4..6).contains(&exp) {
        n.to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}

impl From<Value> for AnswerValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => AnswerValue::Text(s),
            Value::Number(n) => n.as_f64().map_or(AnswerValue::Absent, AnswerValue::Number),
            Value::Bool(b) => AnswerValue::Flag(b),
            Value::Null | Value::Array(_) | Value::Object(_) => AnswerValue::Absent,
        }
    }
}

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(AnswerValue::from)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Answer {
    #[serde(default)]
    pub value: AnswerValue,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Question {
    /// Question prompt, possibly padded with whitespace.
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

/// One answered question.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: Answer,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: Question,
}

/// A donor's answers, restricted to the known answer keys.
///
/// Unknown keys are dropped when the document is decoded.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    entries: HashMap<AnswerKey, AnswerEntry>,
}

impl AnswerSheet {
    /// Returns the entry for a key, if the donor answered it.
    pub fn get(&self, key: AnswerKey) -> Option<&AnswerEntry> {
        self.entries.get(&key)
    }

    /// Returns the answer value for a key. Missing keys yield `Absent`.
    pub fn value(&self, key: AnswerKey) -> &AnswerValue {
        const ABSENT: &AnswerValue = &AnswerValue::Absent;
        self.get(key).map_or(ABSENT, |entry| &entry.answer.value)
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: AnswerKey, entry: AnswerEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, AnswerEntry>> for AnswerSheet {
    fn from(raw: HashMap<String, AnswerEntry>) -> Self {
        let mut sheet = AnswerSheet::default();
        for (name, entry) in raw {
            match AnswerKey::from_name(&name) {
                Some(key) => sheet.insert(key, entry),
                None => debug!("Ignoring unknown answer key: {}", name),
            }
        }
        sheet
    }
}

impl<'de> Deserialize<'de> for AnswerSheet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Option<AnswerEntry>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(name, entry)| (name, entry.unwrap_or_default()))
            .collect::<HashMap<_, _>>()
            .into())
    }
}

/// A flattened answer field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
}

impl FieldValue {
    /// Whether this is the default value for its kind.
    pub fn is_default(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Integer(n) => *n == 0,
        }
    }
}

/// The flat answer fields of an output record, in table order.
///
/// Serializes as a map so it can be flattened into [`OutputRecord`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatFields(Vec<(AnswerKey, FieldValue)>);

impl FlatFields {
    pub fn push(&mut self, key: AnswerKey, value: FieldValue) {
        self.0.push((key, value));
    }

    #[cfg(test)]
    pub fn get(&self, key: AnswerKey) -> Option<&FieldValue> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(AnswerKey, FieldValue)> {
        self.0.iter()
    }
}

impl Serialize for FlatFields {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key.as_str(), value)?;
        }
        map.end()
    }
}

/// One flattened donor profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    /// The donor's user id.
    pub user: String,
    /// Cropped source URL of the first photo.
    pub user_image: String,
    /// Normalized question-and-answer summary.
    pub text: String,
    #[serde(flatten)]
    pub fields: FlatFields,
    #[serde(rename = "donorCode")]
    pub donor_code: String,
    pub profile_bio: String,
    /// Age in whole years on the processing date.
    pub age: i32,
}
