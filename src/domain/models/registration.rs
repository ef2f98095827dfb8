use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, models::null_as_default};

/// Keys owned by [`Registration`] itself. A form that submits one of them
/// must not end up writing the key twice.
const RESERVED_KEYS: [&str; 3] = ["registration_number", "user_id", "registered_at"];

/// Human-readable visitor identifier, e.g. `DT-0000A`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifiers are compared case-insensitively at the front desk.
    pub fn matches(&self, candidate: &str) -> bool {
        !self.0.is_empty() && self.0.eq_ignore_ascii_case(candidate.trim())
    }
}

/// Everything the visitor types into the registration form.
///
/// Field names follow the form's camelCase payload so records stay
/// compatible with files written by earlier deployments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VisitorProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub middle_initial: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub suffix: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gender: String,
    #[serde(deserialize_with = "null_as_default")]
    pub birthdate: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nationality: String,
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub building: String,
    #[serde(deserialize_with = "null_as_default")]
    pub street: String,
    #[serde(deserialize_with = "null_as_default")]
    pub barangay: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub province: String,
    #[serde(deserialize_with = "null_as_default")]
    pub services: Vec<String>,
    /// Any other form fields, kept as submitted.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl VisitorProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.trim().is_empty() {
            return Err(DomainError::MissingEmail);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default, deserialize_with = "null_as_default")]
    registration_number: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    user_id: UserId,
    // records without a timestamp read as the Unix epoch
    #[serde(default, deserialize_with = "null_as_default")]
    registered_at: DateTime<Utc>,
    #[serde(flatten)]
    profile: VisitorProfile,
}

impl Registration {
    pub fn new(
        registration_number: u64,
        user_id: UserId,
        registered_at: DateTime<Utc>,
        mut profile: VisitorProfile,
    ) -> Self {
        for key in RESERVED_KEYS {
            profile.extra.remove(key);
        }
        Self {
            registration_number,
            user_id,
            registered_at,
            profile,
        }
    }

    pub fn registration_number(&self) -> u64 {
        self.registration_number
    }
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
    pub fn profile(&self) -> &VisitorProfile {
        &self.profile
    }
    pub fn email(&self) -> &str {
        &self.profile.email
    }

    /// Emails are unique ignoring case.
    pub fn has_email(&self, email: &str) -> bool {
        !self.email().is_empty() && self.email().to_lowercase() == email.to_lowercase()
    }
}
