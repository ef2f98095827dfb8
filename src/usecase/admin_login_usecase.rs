use crate::domain::{
    error::DomainError,
    models::admin::AdminCredential,
    services::{password_service::PasswordHasher, token_service::{Token, TokenService}},
};

pub struct AdminLoginUsecase<P: PasswordHasher, T: TokenService> {
    // None when no administrator is configured; every login then fails
    credential: Option<AdminCredential>,
    password_hasher: P,
    token_service: T,
}

impl<P: PasswordHasher, T: TokenService> AdminLoginUsecase<P, T> {
    pub fn new(credential: Option<AdminCredential>, password_hasher: P, token_service: T) -> Self {
        Self {
            credential,
            password_hasher,
            token_service,
        }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Token, DomainError> {
        let Some(credential) = &self.credential else {
            tracing::warn!("Admin login attempted but no administrator is configured");
            return Err(DomainError::AuthenticationFailed);
        };

        // verify before comparing usernames so both failures cost the same
        let is_valid = self
            .password_hasher
            .verify(password, credential.password_hash())?;
        credential.validate(is_valid && credential.username() == username)?;

        self.token_service.generate(credential.username())
    }

    /// Check a bearer token, returning the admin username it was issued to.
    pub fn authorize(&self, token: &str) -> Result<String, DomainError> {
        let Some(credential) = &self.credential else {
            return Err(DomainError::AuthenticationFailed);
        };
        let subject = self.token_service.verify(token)?;
        if subject != credential.username() {
            return Err(DomainError::AuthenticationFailed);
        }
        Ok(subject)
    }
}
