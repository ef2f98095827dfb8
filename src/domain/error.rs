use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Email already exists")]
    DuplicateEmail,

    #[error("User ID not found")]
    UserNotFound,

    #[error("Email is required")]
    MissingEmail,

    #[error("User ID is required")]
    MissingUserId,

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Weak password (minimum 8 characters required)")]
    WeakPassword,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
