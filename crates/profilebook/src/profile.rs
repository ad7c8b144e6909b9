//! Core profile types for profilebook.
//!
//! This module defines the stored [`Profile`] record together with the
//! validated payloads that create and update it.

use serde::{Deserialize, Serialize};

/// Gender of a profile owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Anything else.
    Other,
}

impl Gender {
    /// All accepted values, in the order they are reported to clients.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// The wire name of this gender.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse a wire name, returning `None` for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored profile.
///
/// The `id` is assigned by [`ProfileStore`](crate::store::ProfileStore) and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Store-assigned identifier.
    pub id: u64,

    /// Display name.
    pub name: String,

    /// Contact email address.
    pub email: String,

    /// Contact phone number, kept as submitted.
    pub phone: String,

    /// Age in years.
    pub age: u32,

    /// Gender.
    pub gender: Gender,

    /// Hobbies in submission order. Duplicates are allowed.
    pub hobbies: Vec<String>,

    /// Whether the owner wants notifications.
    pub notifications: bool,

    /// Whether the profile is marked as a favorite.
    pub favorite: bool,

    /// Optional image, usually a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Profile {
    /// Build a stored profile from validated fields and an allocated id.
    #[must_use]
    pub fn from_new(id: u64, fields: NewProfile) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            age: fields.age,
            gender: fields.gender,
            hobbies: fields.hobbies,
            notifications: fields.notifications,
            favorite: fields.favorite,
            image_url: fields.image_url,
        }
    }

    /// Shallow-merge a patch onto this profile.
    ///
    /// Supplied fields overwrite, everything else is kept. The id is never
    /// touched.
    pub fn apply(&mut self, patch: ProfilePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(hobbies) = patch.hobbies {
            self.hobbies = hobbies;
        }
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
        if let Some(favorite) = patch.favorite {
            self.favorite = favorite;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
    }
}

/// A fully validated create payload: every profile field except `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    /// Display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Age in years.
    pub age: u32,
    /// Gender.
    pub gender: Gender,
    /// Hobbies, at least one.
    pub hobbies: Vec<String>,
    /// Notification preference, `false` unless supplied.
    pub notifications: bool,
    /// Favorite flag, `false` unless supplied.
    pub favorite: bool,
    /// Optional image.
    pub image_url: Option<String>,
}

/// A validated partial update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    /// New display name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
    /// New age.
    pub age: Option<u32>,
    /// New gender.
    pub gender: Option<Gender>,
    /// Replacement hobby list.
    pub hobbies: Option<Vec<String>>,
    /// New notification preference.
    pub notifications: Option<bool>,
    /// New favorite flag.
    pub favorite: Option<bool>,
    /// New image.
    pub image_url: Option<String>,
}

impl ProfilePatch {
    /// Check whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new() -> NewProfile {
        NewProfile {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555-123-4567".to_string(),
            age: 28,
            gender: Gender::Female,
            hobbies: vec!["Reading".to_string()],
            notifications: false,
            favorite: false,
            image_url: None,
        }
    }

    #[test]
    fn test_gender_display() {
        assert_eq!(Gender::Male.to_string(), "male");
        assert_eq!(Gender::Female.to_string(), "female");
        assert_eq!(Gender::Other.to_string(), "other");
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("other"), Some(Gender::Other));
        assert_eq!(Gender::parse("alien"), None);
        assert_eq!(Gender::parse("Male"), None);
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let profile = Profile::from_new(7, sample_new());
        assert_eq!(profile.id, 7);
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.hobbies, vec!["Reading".to_string()]);
        assert!(!profile.favorite);
    }

    #[test]
    fn test_apply_overwrites_only_supplied_fields() {
        let mut profile = Profile::from_new(1, sample_new());
        profile.apply(ProfilePatch {
            favorite: Some(true),
            age: Some(29),
            ..ProfilePatch::default()
        });

        assert!(profile.favorite);
        assert_eq!(profile.age, 29);
        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.id, 1);
    }

    #[test]
    fn test_apply_empty_patch_is_noop() {
        let mut profile = Profile::from_new(1, sample_new());
        let before = profile.clone();
        profile.apply(ProfilePatch::default());
        assert_eq!(profile, before);
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProfilePatch::default().is_empty());
        let patch = ProfilePatch {
            favorite: Some(false),
            ..ProfilePatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let mut profile = Profile::from_new(1, sample_new());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["gender"], "female");
        assert!(json.get("imageUrl").is_none());

        profile.image_url = Some("data:image/png;base64,AAAA".to_string());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["imageUrl"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_profile_roundtrip() {
        let profile = Profile::from_new(3, sample_new());
        let json = serde_json::to_string(&profile).unwrap();
        let parsed: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, parsed);
    }
}
