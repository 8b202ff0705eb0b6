//! Profile record and the completeness rule.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    FatLoss,
    MuscleGain,
    Cardio,
    Strength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentLevel {
    Casual,
    Regular,
    Hardcore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferredGender {
    Male,
    Female,
    Any,
}

/// Fields that must be present for a profile to count as complete.
///
/// The onboarding and edit forms validate exactly this set; keep the
/// three places in lockstep (see the tests below).
pub const REQUIRED_FIELDS: [&str; 6] = [
    "first_name",
    "last_name",
    "gender",
    "goal",
    "experience_level",
    "commitment_level",
];

/// A profile row as stored by the profile service.
///
/// Everything except `id` is nullable; only the [`REQUIRED_FIELDS`]
/// subset affects completeness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    // Physical
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub height_cm: Option<u32>,
    #[serde(default)]
    pub weight_kg: Option<u32>,
    // Fitness
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub commitment_level: Option<CommitmentLevel>,
    #[serde(default)]
    pub program_type: Option<String>,
    // Matching
    #[serde(default)]
    pub preferred_gender: Option<PreferredGender>,
    #[serde(default)]
    pub available_time_start: Option<String>,
    #[serde(default)]
    pub available_time_end: Option<String>,
    // Visibility
    #[serde(default)]
    pub is_visible: Option<bool>,
    // System
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Profile {
    /// Empty profile row for a user id.
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            display_name: None,
            first_name: None,
            last_name: None,
            avatar_url: None,
            bio: None,
            gender: None,
            age: None,
            height_cm: None,
            weight_kg: None,
            goal: None,
            experience_level: None,
            commitment_level: None,
            program_type: None,
            preferred_gender: None,
            available_time_start: None,
            available_time_end: None,
            is_visible: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether the profile satisfies the minimum fields required for
    /// matching: first name, last name, gender, goal, experience level,
    /// commitment level. An absent or empty-string field counts as
    /// missing. Optional fields never affect the result.
    pub fn is_complete(&self) -> bool {
        filled(&self.first_name)
            && filled(&self.last_name)
            && self.gender.is_some()
            && self.goal.is_some()
            && self.experience_level.is_some()
            && self.commitment_level.is_some()
    }
}

fn filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}

/// Partial profile mutation. Only fields that are `Some` are sent to the
/// store; a field the form did not collect is left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment_level: Option<CommitmentLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_gender: Option<PreferredGender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_time_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_time_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl ProfileUpdate {
    /// Names from [`REQUIRED_FIELDS`] that this update does not fill.
    ///
    /// Iterates the shared list so form validation cannot drift from the
    /// completeness rule.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !self.fills(field))
            .collect()
    }

    fn fills(&self, field: &str) -> bool {
        match field {
            "first_name" => filled(&self.first_name),
            "last_name" => filled(&self.last_name),
            "gender" => self.gender.is_some(),
            "goal" => self.goal.is_some(),
            "experience_level" => self.experience_level.is_some(),
            "commitment_level" => self.commitment_level.is_some(),
            _ => true,
        }
    }

    /// Merge the collected fields into an existing row.
    pub fn apply_to(&self, profile: &mut Profile) {
        macro_rules! merge {
            ($field:ident) => {
                if let Some(value) = &self.$field {
                    profile.$field = Some(value.clone());
                }
            };
        }
        merge!(display_name);
        merge!(first_name);
        merge!(last_name);
        merge!(bio);
        merge!(gender);
        merge!(age);
        merge!(height_cm);
        merge!(weight_kg);
        merge!(goal);
        merge!(experience_level);
        merge!(commitment_level);
        merge!(program_type);
        merge!(preferred_gender);
        merge!(available_time_start);
        merge!(available_time_end);
        merge!(is_visible);
    }
}
