//! Person model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default avatar for people recorded as male
pub const DEFAULT_MALE_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/147/147142.png";

/// Default avatar for people recorded as female
pub const DEFAULT_FEMALE_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/147/147137.png";

/// Default avatar for everyone else
pub const DEFAULT_NEUTRAL_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/1659/1659727.png";

/// Gender of a person, serialized with the labels used in family data files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Recorded as male
    #[default]
    Male,
    /// Recorded as female
    Female,
    /// Recorded as non-binary
    #[serde(rename = "Gender Non-Binary")]
    NonBinary,
    /// Gender withheld
    #[serde(rename = "Prefer Not to Say")]
    PreferNotToSay,
}

impl Gender {
    /// Get the label used in data files and the page UI
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Gender Non-Binary",
            Self::PreferNotToSay => "Prefer Not to Say",
        }
    }

    /// Get the default avatar image URL for this gender
    #[must_use]
    pub const fn default_avatar(&self) -> &'static str {
        match self {
            Self::Male => DEFAULT_MALE_AVATAR,
            Self::Female => DEFAULT_FEMALE_AVATAR,
            Self::NonBinary | Self::PreferNotToSay => DEFAULT_NEUTRAL_AVATAR,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Represents one person in the family registry
///
/// The person's identifier is not stored on the struct; people are keyed by
/// id in [`FamilyTree`](super::FamilyTree). Relationship fields (`parents`,
/// `children`, `married_to`, `divorced_from`) hold the ids of other people.
///
/// All fields are optional in data files; missing fields deserialize to
/// their defaults so files from older versions load cleanly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Given (first) name
    #[serde(default)]
    pub given_name: Option<String>,

    /// Family (last) name
    #[serde(default)]
    pub family_name: Option<String>,

    /// Maiden name, shown in parentheses in the display name
    #[serde(default)]
    pub maiden_name: Option<String>,

    /// Middle or other names
    #[serde(default)]
    pub other_names: Option<String>,

    /// Nickname, appended in quotes to the display name
    #[serde(default)]
    pub nickname: Option<String>,

    /// Custom avatar image URL (falls back to a gender default when unset)
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Gender, used for the default avatar and shown in the profile
    #[serde(default)]
    pub gender: Gender,

    /// Date of birth
    #[serde(default)]
    pub dob: Option<NaiveDate>,

    /// Date of death
    #[serde(default)]
    pub dod: Option<NaiveDate>,

    /// Id of the current spouse (reciprocal link)
    #[serde(default)]
    pub married_to: Option<String>,

    /// Id of a former spouse (reciprocal link)
    #[serde(default)]
    pub divorced_from: Option<String>,

    /// Ids of this person's parents
    #[serde(default)]
    pub parents: Vec<String>,

    /// Ids of this person's children
    #[serde(default)]
    pub children: Vec<String>,
}

/// Treat empty strings as absent, mirroring how blank form fields are stored
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl Person {
    /// Create a new person with only a given name set
    #[must_use]
    pub fn new(given_name: &str) -> Self {
        Self {
            given_name: Some(given_name.to_string()),
            ..Self::default()
        }
    }

    /// Build the display name from the name parts
    ///
    /// Format: `given other (maiden) family "nickname"`, skipping any parts
    /// that are unset. Falls back to "Unknown Name" when every part is empty.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(given) = non_empty(&self.given_name) {
            parts.push(given.to_string());
        }
        if let Some(other) = non_empty(&self.other_names) {
            parts.push(other.to_string());
        }
        if let Some(maiden) = non_empty(&self.maiden_name) {
            parts.push(format!("({maiden})"));
        }
        if let Some(family) = non_empty(&self.family_name) {
            parts.push(family.to_string());
        }

        let mut full_name = parts.join(" ");
        if let Some(nickname) = non_empty(&self.nickname) {
            if full_name.is_empty() {
                full_name = format!("\"{nickname}\"");
            } else {
                full_name.push_str(&format!(" \"{nickname}\""));
            }
        }

        if full_name.is_empty() {
            "Unknown Name".to_string()
        } else {
            full_name
        }
    }

    /// Get the avatar image URL, falling back to the gender default
    #[must_use]
    pub fn avatar(&self) -> &str {
        non_empty(&self.avatar_url).unwrap_or_else(|| self.gender.default_avatar())
    }

    /// Get the current spouse id, treating an empty string as unset
    #[must_use]
    pub fn spouse(&self) -> Option<&str> {
        non_empty(&self.married_to)
    }

    /// Get the former spouse id, treating an empty string as unset
    #[must_use]
    pub fn former_spouse(&self) -> Option<&str> {
        non_empty(&self.divorced_from)
    }

    /// Get the given name, treating an empty string as unset
    #[must_use]
    pub fn given(&self) -> Option<&str> {
        non_empty(&self.given_name)
    }

    /// Get the family name, treating an empty string as unset
    #[must_use]
    pub fn family(&self) -> Option<&str> {
        non_empty(&self.family_name)
    }

    /// Get the maiden name, treating an empty string as unset
    #[must_use]
    pub fn maiden(&self) -> Option<&str> {
        non_empty(&self.maiden_name)
    }

    /// Get the other names, treating an empty string as unset
    #[must_use]
    pub fn other(&self) -> Option<&str> {
        non_empty(&self.other_names)
    }

    /// Get the nickname, treating an empty string as unset
    #[must_use]
    pub fn nick(&self) -> Option<&str> {
        non_empty(&self.nickname)
    }

    /// Add a parent id (no-op if already present)
    pub fn add_parent(&mut self, parent_id: &str) {
        if !self.parents.iter().any(|p| p == parent_id) {
            self.parents.push(parent_id.to_string());
        }
    }

    /// Add a child id (no-op if already present)
    pub fn add_child(&mut self, child_id: &str) {
        if !self.children.iter().any(|c| c == child_id) {
            self.children.push(child_id.to_string());
        }
    }

    /// Remove a parent id if present
    pub fn remove_parent(&mut self, parent_id: &str) {
        self.parents.retain(|p| p != parent_id);
    }

    /// Remove a child id if present
    pub fn remove_child(&mut self, child_id: &str) {
        self.children.retain(|c| c != child_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_all_parts() {
        let person = Person {
            given_name: Some("Eleanor".to_string()),
            family_name: Some("Vance".to_string()),
            maiden_name: Some("Crain".to_string()),
            other_names: Some("Rose".to_string()),
            nickname: Some("Nell".to_string()),
            ..Person::default()
        };

        assert_eq!(person.display_name(), "Eleanor Rose (Crain) Vance \"Nell\"");
    }

    #[test]
    fn test_display_name_given_only() {
        let person = Person::new("Ada");
        assert_eq!(person.display_name(), "Ada");
    }

    #[test]
    fn test_display_name_empty_person() {
        let person = Person::default();
        assert_eq!(person.display_name(), "Unknown Name");
    }

    #[test]
    fn test_display_name_ignores_empty_strings() {
        let person = Person {
            given_name: Some("Ada".to_string()),
            family_name: Some(String::new()),
            ..Person::default()
        };

        assert_eq!(person.display_name(), "Ada");
    }

    #[test]
    fn test_avatar_fallback_by_gender() {
        let mut person = Person::new("Sam");
        assert_eq!(person.avatar(), DEFAULT_MALE_AVATAR);

        person.gender = Gender::Female;
        assert_eq!(person.avatar(), DEFAULT_FEMALE_AVATAR);

        person.gender = Gender::NonBinary;
        assert_eq!(person.avatar(), DEFAULT_NEUTRAL_AVATAR);

        person.gender = Gender::PreferNotToSay;
        assert_eq!(person.avatar(), DEFAULT_NEUTRAL_AVATAR);
    }

    #[test]
    fn test_avatar_custom_url_wins() {
        let person = Person {
            avatar_url: Some("https://example.com/me.png".to_string()),
            ..Person::default()
        };

        assert_eq!(person.avatar(), "https://example.com/me.png");
    }

    #[test]
    fn test_spouse_empty_string_is_unset() {
        let person = Person {
            married_to: Some(String::new()),
            ..Person::default()
        };

        assert!(person.spouse().is_none());
    }

    #[test]
    fn test_add_parent_is_idempotent() {
        let mut person = Person::new("Bob");
        person.add_parent("p1");
        person.add_parent("p1");

        assert_eq!(person.parents.len(), 1);
    }

    #[test]
    fn test_gender_labels_round_trip() {
        let json = "\"Gender Non-Binary\"";
        let gender: Gender = serde_json::from_str(json).unwrap();
        assert_eq!(gender, Gender::NonBinary);
        assert_eq!(serde_json::to_string(&gender).unwrap(), json);
    }

    #[test]
    fn test_person_deserializes_from_partial_record() {
        let json = r#"{"given_name": "Ada", "gender": "Female"}"#;
        let person: Person = serde_json::from_str(json).unwrap();

        assert_eq!(person.given(), Some("Ada"));
        assert_eq!(person.gender, Gender::Female);
        assert!(person.parents.is_empty());
        assert!(person.dob.is_none());
    }
}
