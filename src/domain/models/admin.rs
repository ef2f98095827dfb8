use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Value object representing a hashed password
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The single administrator account, supplied through configuration.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    username: String,
    password_hash: HashedPassword,
}

impl AdminCredential {
    pub fn new(username: String, password_hash: HashedPassword) -> Self {
        Self {
            username,
            password_hash,
        }
    }

    pub fn validate(&self, is_valid: bool) -> Result<(), DomainError> {
        if is_valid {
            Ok(())
        } else {
            Err(DomainError::AuthenticationFailed)
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}
