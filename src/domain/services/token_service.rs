use crate::domain::error::DomainError;

pub type Token = String;

/// Issues and checks admin session tokens.
pub trait TokenService: Send + Sync {
    fn generate(&self, subject: &str) -> Result<Token, DomainError>;

    /// Returns the subject the token was issued for.
    fn verify(&self, token: &str) -> Result<String, DomainError>;
}
