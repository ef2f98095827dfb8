use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;

use crate::domain::{
    error::DomainError,
    models::{check_in::CheckIn, registration::Registration},
    repositories::record_store::RecordStore,
};

pub struct CheckInUsecase<R: RecordStore<Registration>, C: RecordStore<CheckIn>> {
    registration_store: R,
    check_in_store: C,
    write_lock: Mutex<()>,
}

impl<R: RecordStore<Registration>, C: RecordStore<CheckIn>> CheckInUsecase<R, C> {
    pub fn new(registration_store: R, check_in_store: C) -> Self {
        Self {
            registration_store,
            check_in_store,
            write_lock: Mutex::new(()),
        }
    }

    /// Record a visit for an existing registration. The user ID is matched
    /// case-insensitively and stored in its canonical form.
    pub async fn check_in(
        &self,
        user_id: &str,
        service: String,
        notes: Option<String>,
    ) -> Result<CheckIn, DomainError> {
        if user_id.trim().is_empty() {
            return Err(DomainError::MissingUserId);
        }

        let registrations = self.registration_store.load().await?;
        let registration = registrations
            .iter()
            .find(|r| r.user_id().matches(user_id))
            .ok_or(DomainError::UserNotFound)?;

        let check_in = CheckIn::for_registration(registration, service, notes, Utc::now());

        let _guard = self.write_lock.lock().await;
        let mut check_ins = self.check_in_store.load().await?;
        check_ins.push(check_in.clone());
        self.check_in_store.save(&check_ins).await?;

        let day = check_in.checkin_at().date_naive();
        if let Err(e) = self.check_in_store.append_daily(day, &check_in).await {
            tracing::warn!(%day, error = %e, "Failed to record check-in in daily file");
        }

        tracing::info!(
            registration_number = check_in.registration_number(),
            user_id = check_in.user_id().as_str(),
            service = check_in.service(),
            "Visitor checked in"
        );
        Ok(check_in)
    }

    pub async fn list(&self) -> Result<Vec<CheckIn>, DomainError> {
        Ok(self.check_in_store.load().await?)
    }

    pub async fn list_on(&self, day: NaiveDate) -> Result<Vec<CheckIn>, DomainError> {
        Ok(self.check_in_store.load_daily(day).await?)
    }
}
