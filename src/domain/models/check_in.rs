use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::{
    null_as_default,
    registration::{Registration, UserId},
};

/// A single visit. Visitors may check in any number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(default, deserialize_with = "null_as_default")]
    registration_number: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    user_id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    checkin_at: DateTime<Utc>,
    /// Fields of older records (such as a `services` list), kept on rewrite.
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl CheckIn {
    /// Build a check-in against an already resolved registration.
    pub fn for_registration(
        registration: &Registration,
        service: String,
        notes: Option<String>,
        checkin_at: DateTime<Utc>,
    ) -> Self {
        Self {
            registration_number: registration.registration_number(),
            user_id: registration.user_id().clone(),
            service,
            notes: notes.filter(|n| !n.trim().is_empty()),
            checkin_at,
            extra: serde_json::Map::new(),
        }
    }

    pub fn registration_number(&self) -> u64 {
        self.registration_number
    }
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
    pub fn service(&self) -> &str {
        &self.service
    }
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
    pub fn checkin_at(&self) -> DateTime<Utc> {
        self.checkin_at
    }
}
