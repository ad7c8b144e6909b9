//! Profile payload validation.
//!
//! Submitted JSON is checked field by field against the profile rules. Every
//! violated rule is collected so a client can fix all problems in one round
//! trip; nothing here stops at the first failure.
//!
//! # Example
//!
//! ```
//! use profilebook::validation::validate_create;
//! use serde_json::json;
//!
//! let errors = validate_create(&json!({ "name": "A", "age": 12 })).unwrap_err();
//! assert!(errors.contains_field("name"));
//! assert!(errors.contains_field("age"));
//! assert!(errors.contains_field("email"));
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::profile::{Gender, NewProfile, ProfilePatch};

/// Minimum name length, in UTF-16 code units.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum accepted age in years.
pub const MIN_AGE: u32 = 13;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s-]{10,}$").expect("phone pattern is valid"));

/// A single violated rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// JSON key of the offending field, or `body` for the payload itself.
    pub field: String,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every rule a payload violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Check whether the given field has at least one violation.
    #[must_use]
    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a create payload.
///
/// All fields are required except `notifications` and `favorite` (default
/// `false`) and `imageUrl`. An `id` key is ignored.
///
/// # Errors
///
/// Returns every violated rule if the payload is not acceptable.
pub fn validate_create(input: &Value) -> Result<NewProfile, ValidationErrors> {
    let mut fields = Fields::new(input)?;

    let name = fields.required("name", check_name);
    let email = fields.required("email", check_email);
    let phone = fields.required("phone", check_phone);
    let age = fields.required("age", check_age);
    let gender = fields.required("gender", check_gender);
    let hobbies = fields.required("hobbies", check_hobbies);
    let notifications = fields.optional("notifications", check_bool);
    let favorite = fields.optional("favorite", check_bool);
    let image_url = fields.optional("imageUrl", check_string);

    match (name, email, phone, age, gender, hobbies) {
        (Some(name), Some(email), Some(phone), Some(age), Some(gender), Some(hobbies))
            if fields.errors.is_empty() =>
        {
            Ok(NewProfile {
                name,
                email,
                phone,
                age,
                gender,
                hobbies,
                notifications: notifications.unwrap_or(false),
                favorite: favorite.unwrap_or(false),
                image_url,
            })
        }
        _ => Err(fields.into_errors()),
    }
}

/// Validate a partial update payload.
///
/// Every field is optional; any field present must satisfy its rule. An `id`
/// key is ignored.
///
/// # Errors
///
/// Returns every violated rule if the payload is not acceptable.
pub fn validate_update(input: &Value) -> Result<ProfilePatch, ValidationErrors> {
    let mut fields = Fields::new(input)?;

    let patch = ProfilePatch {
        name: fields.optional("name", check_name),
        email: fields.optional("email", check_email),
        phone: fields.optional("phone", check_phone),
        age: fields.optional("age", check_age),
        gender: fields.optional("gender", check_gender),
        hobbies: fields.optional("hobbies", check_hobbies),
        notifications: fields.optional("notifications", check_bool),
        favorite: fields.optional("favorite", check_bool),
        image_url: fields.optional("imageUrl", check_string),
    };

    if fields.errors.is_empty() {
        Ok(patch)
    } else {
        Err(fields.into_errors())
    }
}

/// Check whether a string looks like an email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_PATTERN.is_match(email)
}

/// Check whether a string looks like a phone number.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Field accessor that records violations as it goes.
struct Fields<'a> {
    input: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> Fields<'a> {
    fn new(input: &'a Value) -> Result<Self, ValidationErrors> {
        let Value::Object(input) = input else {
            let mut errors = ValidationErrors::default();
            errors.push("body", expected("object", input));
            return Err(errors);
        };
        if input.contains_key("id") {
            debug!("Ignoring client-supplied id in profile payload");
        }
        Ok(Self {
            input,
            errors: ValidationErrors::default(),
        })
    }

    fn optional<T>(
        &mut self,
        key: &'static str,
        rule: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Option<T> {
        let value = self.input.get(key)?;
        match rule(value) {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(key, message);
                None
            }
        }
    }

    fn required<T>(
        &mut self,
        key: &'static str,
        rule: impl FnOnce(&Value) -> Result<T, String>,
    ) -> Option<T> {
        if !self.input.contains_key(key) {
            self.errors.push(key, "Required");
            return None;
        }
        self.optional(key, rule)
    }

    fn into_errors(self) -> ValidationErrors {
        debug!(errors = %self.errors, "Rejected profile payload");
        self.errors
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn expected(kind: &str, value: &Value) -> String {
    format!("Expected {kind}, received {}", type_name(value))
}

fn check_string(value: &Value) -> Result<String, String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| expected("string", value))
}

fn check_bool(value: &Value) -> Result<bool, String> {
    value.as_bool().ok_or_else(|| expected("boolean", value))
}

fn check_name(value: &Value) -> Result<String, String> {
    let name = check_string(value)?;
    // UTF-16 code units, not chars.
    if name.encode_utf16().count() < MIN_NAME_LENGTH {
        return Err(format!(
            "Name must be at least {MIN_NAME_LENGTH} characters"
        ));
    }
    Ok(name)
}

fn check_email(value: &Value) -> Result<String, String> {
    let email = check_string(value)?;
    if !is_valid_email(&email) {
        return Err("Invalid email address".to_string());
    }
    Ok(email)
}

fn check_phone(value: &Value) -> Result<String, String> {
    let phone = check_string(value)?;
    if !is_valid_phone(&phone) {
        return Err("Invalid phone number".to_string());
    }
    Ok(phone)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn check_age(value: &Value) -> Result<u32, String> {
    let Some(age) = value.as_f64() else {
        return Err(expected("number", value));
    };
    if age.fract() != 0.0 {
        return Err("Expected integer, received float".to_string());
    }
    if age < f64::from(MIN_AGE) {
        return Err(format!("Must be at least {MIN_AGE} years old"));
    }
    if age > f64::from(u32::MAX) {
        return Err("Age is out of range".to_string());
    }
    // Integral and within u32 range, checked above.
    Ok(age as u32)
}

fn check_gender(value: &Value) -> Result<Gender, String> {
    let gender = check_string(value)?;
    Gender::parse(&gender).ok_or_else(|| {
        let options = Gender::ALL
            .iter()
            .map(|g| format!("'{g}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        format!("Invalid enum value. Expected {options}, received '{gender}'")
    })
}

fn check_hobbies(value: &Value) -> Result<Vec<String>, String> {
    let Some(items) = value.as_array() else {
        return Err(expected("array", value));
    };
    let mut hobbies = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(hobby) => hobbies.push(hobby.to_owned()),
            None => return Err(format!("Item {i}: {}", expected("string", item))),
        }
    }
    if hobbies.is_empty() {
        return Err("Select at least one hobby".to_string());
    }
    Ok(hobbies)
}
