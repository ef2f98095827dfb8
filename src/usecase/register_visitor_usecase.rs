use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::{
    error::DomainError,
    models::registration::{Registration, VisitorProfile},
    repositories::record_store::RecordStore,
    services::id_allocator::IdAllocator,
};

pub struct RegisterVisitorUsecase<R: RecordStore<Registration>> {
    registration_store: R,
    allocator: IdAllocator,
    // serializes load -> allocate -> save so each call gets its own numbers
    write_lock: Mutex<()>,
}

impl<R: RecordStore<Registration>> RegisterVisitorUsecase<R> {
    pub fn new(registration_store: R, allocator: IdAllocator) -> Self {
        Self {
            registration_store,
            allocator,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn register(&self, profile: VisitorProfile) -> Result<Registration, DomainError> {
        profile.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut registrations = self.registration_store.load().await?;

        if registrations.iter().any(|r| r.has_email(&profile.email)) {
            return Err(DomainError::DuplicateEmail);
        }

        let registration = Registration::new(
            self.allocator.next_registration_number(&registrations),
            self.allocator.next_user_id(&registrations),
            Utc::now(),
            profile,
        );
        registrations.push(registration.clone());
        self.registration_store.save(&registrations).await?;

        let day = registration.registered_at().date_naive();
        if let Err(e) = self.registration_store.append_daily(day, &registration).await {
            tracing::warn!(%day, error = %e, "Failed to record registration in daily file");
        }

        tracing::info!(
            registration_number = registration.registration_number(),
            user_id = registration.user_id().as_str(),
            "Visitor registered"
        );
        Ok(registration)
    }

    pub async fn list(&self) -> Result<Vec<Registration>, DomainError> {
        Ok(self.registration_store.load().await?)
    }
}
