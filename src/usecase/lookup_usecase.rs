use chrono::NaiveDate;

use crate::domain::{
    error::DomainError,
    models::registration::Registration,
    repositories::record_store::RecordStore,
};

/// Read-only queries the forms use for instant feedback.
pub struct LookupUsecase<R: RecordStore<Registration>> {
    registration_store: R,
}

impl<R: RecordStore<Registration>> LookupUsecase<R> {
    pub fn new(registration_store: R) -> Self {
        Self { registration_store }
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        if email.trim().is_empty() {
            return Err(DomainError::MissingEmail);
        }
        let registrations = self.registration_store.load().await?;
        Ok(registrations.iter().any(|r| r.has_email(email)))
    }

    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Registration>, DomainError> {
        if user_id.trim().is_empty() {
            return Err(DomainError::MissingUserId);
        }
        let registrations = self.registration_store.load().await?;
        Ok(registrations
            .into_iter()
            .find(|r| r.user_id().matches(user_id)))
    }

    pub async fn registrations_on(&self, day: NaiveDate) -> Result<Vec<Registration>, DomainError> {
        Ok(self.registration_store.load_daily(day).await?)
    }
}
