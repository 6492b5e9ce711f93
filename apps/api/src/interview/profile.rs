//! Candidate Profile: the structured details collected during one session.
//!
//! The profile only grows: empty values are ignored on write, so a field that
//! has been set can be corrected but never cleared.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Location,
    Education,
    YearsOfExperience,
    DesiredPosition,
    TechStack,
}

impl ProfileField {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Location => "location",
            ProfileField::Education => "education",
            ProfileField::YearsOfExperience => "years_of_experience",
            ProfileField::DesiredPosition => "desired_position",
            ProfileField::TechStack => "tech_stack",
        }
    }

    /// Human phrasing used when asking the candidate for the field.
    pub fn describe(self) -> &'static str {
        match self {
            ProfileField::Name => "full name",
            ProfileField::Email => "email address",
            ProfileField::Phone => "phone number",
            ProfileField::Location => "current location",
            ProfileField::Education => "education",
            ProfileField::YearsOfExperience => "years of professional experience",
            ProfileField::DesiredPosition => "desired position",
            ProfileField::TechStack => "tech stack (languages, frameworks, tools)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(u32),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Number(_) => false,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.iter().all(|i| i.trim().is_empty()),
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateProfile {
    fields: BTreeMap<ProfileField, FieldValue>,
}

impl CandidateProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value. Empty values are ignored. Lists are merged with the
    /// existing list (case-insensitive de-duplication); scalars replace.
    /// Returns whether the profile changed.
    pub fn set(&mut self, field: ProfileField, value: FieldValue) -> bool {
        if value.is_empty() {
            return false;
        }

        let merged = match (self.fields.get(&field), value) {
            (Some(FieldValue::List(existing)), FieldValue::List(incoming)) => {
                let mut items = existing.clone();
                for item in incoming {
                    let item = item.trim().to_string();
                    if !item.is_empty() && !items.iter().any(|i| i.eq_ignore_ascii_case(&item)) {
                        items.push(item);
                    }
                }
                FieldValue::List(items)
            }
            (_, FieldValue::Text(text)) => FieldValue::Text(text.trim().to_string()),
            (_, other) => other,
        };

        if self.fields.get(&field) == Some(&merged) {
            return false;
        }
        self.fields.insert(field, merged);
        true
    }

    pub fn contains(&self, field: ProfileField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn text(&self, field: ProfileField) -> Option<&str> {
        match self.fields.get(&field) {
            Some(FieldValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn tech_stack(&self) -> &[String] {
        match self.fields.get(&ProfileField::TechStack) {
            Some(FieldValue::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Fields from `required` that have not been collected yet, in order.
    pub fn missing(&self, required: &[ProfileField]) -> Vec<ProfileField> {
        required
            .iter()
            .copied()
            .filter(|f| !self.contains(*f))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileField, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn list(items: &[&str]) -> FieldValue {
        FieldValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_empty_value_never_clears_existing_field() {
        let mut profile = CandidateProfile::new();
        assert!(profile.set(ProfileField::Name, text("Jane Doe")));
        assert!(!profile.set(ProfileField::Name, text("   ")));
        assert!(!profile.set(ProfileField::Name, FieldValue::List(vec![])));
        assert_eq!(profile.text(ProfileField::Name), Some("Jane Doe"));
    }

    #[test]
    fn test_text_value_is_trimmed_and_replaceable() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::DesiredPosition, text("  Backend Engineer "));
        assert_eq!(profile.text(ProfileField::DesiredPosition), Some("Backend Engineer"));
        profile.set(ProfileField::DesiredPosition, text("Platform Engineer"));
        assert_eq!(profile.text(ProfileField::DesiredPosition), Some("Platform Engineer"));
    }

    #[test]
    fn test_lists_merge_without_duplicates() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::TechStack, list(&["Rust", "Docker"]));
        profile.set(ProfileField::TechStack, list(&["docker", "Kubernetes"]));
        assert_eq!(profile.tech_stack(), &["Rust", "Docker", "Kubernetes"]);
    }

    #[test]
    fn test_setting_identical_value_reports_no_change() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::YearsOfExperience, FieldValue::Number(4));
        assert!(!profile.set(ProfileField::YearsOfExperience, FieldValue::Number(4)));
        assert!(profile.set(ProfileField::YearsOfExperience, FieldValue::Number(5)));
    }

    #[test]
    fn test_missing_preserves_required_order() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::Phone, text("+1 555 123 4567"));
        let missing = profile.missing(&[
            ProfileField::Email,
            ProfileField::Phone,
            ProfileField::TechStack,
        ]);
        assert_eq!(missing, vec![ProfileField::Email, ProfileField::TechStack]);
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let mut profile = CandidateProfile::new();
        profile.set(ProfileField::Name, text("Sam"));
        profile.set(ProfileField::YearsOfExperience, FieldValue::Number(7));
        profile.set(ProfileField::TechStack, list(&["Go"]));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Sam");
        assert_eq!(json["years_of_experience"], 7);
        assert_eq!(json["tech_stack"][0], "Go");

        let back: CandidateProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_display_joins_lists() {
        assert_eq!(list(&["Rust", "Go"]).to_string(), "Rust, Go");
        assert_eq!(FieldValue::Number(3).to_string(), "3");
    }
}
