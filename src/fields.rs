//! The answer-field table.
//!
//! Every known answer key appears in [`FIELD_TABLE`] exactly once, together
//! with the type it is flattened to and, where the survey's own question
//! wording is not used, the label it carries in the summary text. The table
//! order is the order of the flat fields in the output record.

use std::fmt;

/// A survey answer key the converter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnswerKey {
    JobTitle,
    ArtisticAbility,
    AthleticAbility,
    MathematicalAbility,
    ScientificAbility,
    SingingAbility,
    HairType,
    HairColor,
    EducationLevel,
    JewishAncestry,
    HeightFt,
    HeightIn,
    LogicalCreative,
    SeriousSilly,
    IntrovertExtrovert,
    RelationshipPreferences,
    Passions,
    GoalsInLife,
    GreatestStrengths,
    PerfectDay,
    DinnerParty,
    Motivation,
    MessageToIps,
    Book,
    Movie,
    Food,
    Allergies,
    DentalWork,
    Dimples,
    EggRetrieval,
    Freckles,
    Siblings,
    Complexion,
    Diet,
    DominantHand,
    EyeColor,
    HairTexture,
    MaritalStatus,
    VisionQuality,
    Weight,
}

impl AnswerKey {
    /// The key as it appears in the survey export and in the output record.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKey::JobTitle => "job_title",
            AnswerKey::ArtisticAbility => "artistic_ability",
            AnswerKey::AthleticAbility => "athletic_ability",
            AnswerKey::MathematicalAbility => "mathematical_ability",
            AnswerKey::ScientificAbility => "scientific_ability",
            AnswerKey::SingingAbility => "singing_ability",
            AnswerKey::HairType => "hair_type",
            AnswerKey::HairColor => "hair_color",
            AnswerKey::EducationLevel => "education_level",
            AnswerKey::JewishAncestry => "jewish_ancestry",
            AnswerKey::HeightFt => "height_ft",
            AnswerKey::HeightIn => "height_in",
            AnswerKey::LogicalCreative => "logical_creative",
            AnswerKey::SeriousSilly => "serious_silly",
            AnswerKey::IntrovertExtrovert => "introvert_extrovert",
            AnswerKey::RelationshipPreferences => "relationship_preferences",
            AnswerKey::Passions => "passions",
            AnswerKey::GoalsInLife => "goals_in_life",
            AnswerKey::GreatestStrengths => "greatest_strengths",
            AnswerKey::PerfectDay => "perfect_day",
            AnswerKey::DinnerParty => "dinner_party",
            AnswerKey::Motivation => "motivation",
            AnswerKey::MessageToIps => "message_to_ips",
            AnswerKey::Book => "book",
            AnswerKey::Movie => "movie",
            AnswerKey::Food => "food",
            AnswerKey::Allergies => "allergies",
            AnswerKey::DentalWork => "dental_work",
            AnswerKey::Dimples => "dimples",
            AnswerKey::EggRetrieval => "egg_retrieval",
            AnswerKey::Freckles => "freckles",
            AnswerKey::Siblings => "siblings",
            AnswerKey::Complexion => "complexion",
            AnswerKey::Diet => "diet",
            AnswerKey::DominantHand => "dominant_hand",
            AnswerKey::EyeColor => "eye_color",
            AnswerKey::HairTexture => "hair_texture",
            AnswerKey::MaritalStatus => "marital_status",
            AnswerKey::VisionQuality => "vision_quality",
            AnswerKey::Weight => "weight",
        }
    }

    /// Looks up a key by its export name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        FIELD_TABLE
            .iter()
            .map(|spec| spec.key)
            .find(|key| key.as_str() == name)
    }

    /// Returns the table entry for this key.
    pub fn spec(&self) -> Option<&'static FieldSpec> {
        FIELD_TABLE.iter().find(|spec| spec.key == *self)
    }
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The type an answer is flattened to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String answers; anything else becomes `""`.
    Text,
    /// Numeric answers truncated to an integer; anything else becomes `0`.
    Integer,
}

/// One row of the field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: AnswerKey,
    pub kind: FieldKind,
    /// Fixed label used in the summary instead of the question text.
    pub summary_label: Option<&'static str>,
}

impl FieldSpec {
    const fn text(key: AnswerKey) -> Self {
        Self {
            key,
            kind: FieldKind::Text,
            summary_label: None,
        }
    }

    const fn integer(key: AnswerKey) -> Self {
        Self {
            key,
            kind: FieldKind::Integer,
            summary_label: None,
        }
    }

    const fn labelled(self, label: &'static str) -> Self {
        Self {
            summary_label: Some(label),
            ..self
        }
    }
}

/// All flattened answer fields, in output order.
pub const FIELD_TABLE: &[FieldSpec] = &[
    FieldSpec::text(AnswerKey::JobTitle),
    FieldSpec::integer(AnswerKey::ArtisticAbility),
    FieldSpec::integer(AnswerKey::AthleticAbility),
    FieldSpec::integer(AnswerKey::MathematicalAbility),
    FieldSpec::integer(AnswerKey::ScientificAbility),
    FieldSpec::integer(AnswerKey::SingingAbility),
    FieldSpec::text(AnswerKey::HairType),
    FieldSpec::text(AnswerKey::HairColor),
    FieldSpec::text(AnswerKey::EducationLevel),
    FieldSpec::text(AnswerKey::JewishAncestry),
    FieldSpec::integer(AnswerKey::HeightFt),
    FieldSpec::integer(AnswerKey::HeightIn),
    FieldSpec::text(AnswerKey::LogicalCreative),
    FieldSpec::text(AnswerKey::SeriousSilly),
    FieldSpec::text(AnswerKey::IntrovertExtrovert),
    FieldSpec::text(AnswerKey::RelationshipPreferences),
    FieldSpec::text(AnswerKey::Passions),
    FieldSpec::text(AnswerKey::GoalsInLife),
    FieldSpec::text(AnswerKey::GreatestStrengths),
    FieldSpec::text(AnswerKey::PerfectDay),
    FieldSpec::text(AnswerKey::DinnerParty),
    FieldSpec::text(AnswerKey::Motivation),
    FieldSpec::text(AnswerKey::MessageToIps),
    FieldSpec::text(AnswerKey::Book).labelled("What are your favorite books"),
    FieldSpec::text(AnswerKey::Movie).labelled("What is your favorite movie"),
    FieldSpec::text(AnswerKey::Food).labelled("What is your favorite food"),
    FieldSpec::text(AnswerKey::Allergies),
    FieldSpec::text(AnswerKey::DentalWork),
    FieldSpec::text(AnswerKey::Dimples),
    FieldSpec::text(AnswerKey::EggRetrieval),
    FieldSpec::text(AnswerKey::Freckles),
    FieldSpec::text(AnswerKey::Siblings),
    FieldSpec::text(AnswerKey::Complexion),
    FieldSpec::text(AnswerKey::Diet),
    FieldSpec::text(AnswerKey::DominantHand),
    FieldSpec::text(AnswerKey::EyeColor),
    FieldSpec::text(AnswerKey::HairTexture),
    FieldSpec::text(AnswerKey::MaritalStatus),
    FieldSpec::text(AnswerKey::VisionQuality),
    FieldSpec::integer(AnswerKey::Weight),
];

/// Answers that feed the summary text, in the order they appear there.
pub const SUMMARY_KEYS: &[AnswerKey] = &[
    AnswerKey::Passions,
    AnswerKey::GoalsInLife,
    AnswerKey::GreatestStrengths,
    AnswerKey::PerfectDay,
    AnswerKey::DinnerParty,
    AnswerKey::Motivation,
    AnswerKey::MessageToIps,
    AnswerKey::Book,
    AnswerKey::Movie,
    AnswerKey::Food,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_keys_are_unique() {
        let keys: HashSet<AnswerKey> = FIELD_TABLE.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), FIELD_TABLE.len());
        assert_eq!(FIELD_TABLE.len(), 40);
    }

    #[test]
    fn test_from_name_round_trips_every_key() {
        for spec in FIELD_TABLE {
            assert_eq!(AnswerKey::from_name(spec.key.as_str()), Some(spec.key));
        }
        assert_eq!(AnswerKey::from_name("favorite_color"), None);
        assert_eq!(AnswerKey::from_name("Book"), None);
    }

    #[test]
    fn test_integer_fields() {
        let integers: Vec<&str> = FIELD_TABLE
            .iter()
            .filter(|s| s.kind == FieldKind::Integer)
            .map(|s| s.key.as_str())
            .collect();
        assert_eq!(
            integers,
            vec![
                "artistic_ability",
                "athletic_ability",
                "mathematical_ability",
                "scientific_ability",
                "singing_ability",
                "height_ft",
                "height_in",
                "weight",
            ]
        );
    }

    #[test]
    fn test_label_overrides_only_on_book_movie_food() {
        let labelled: Vec<AnswerKey> = FIELD_TABLE
            .iter()
            .filter(|s| s.summary_label.is_some())
            .map(|s| s.key)
            .collect();
        assert_eq!(
            labelled,
            vec![AnswerKey::Book, AnswerKey::Movie, AnswerKey::Food]
        );
    }

    #[test]
    fn test_summary_keys_are_text_fields() {
        for key in SUMMARY_KEYS {
            let spec = key.spec().unwrap();
            assert_eq!(spec.kind, FieldKind::Text, "{} should be text", key);
        }
    }
}
