use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::error::RepositoryError;

/// Flat sequence storage for one record kind.
///
/// `load`/`save` operate on the all-time sequence as a whole; the daily
/// methods keep a secondary per-day copy used by the admin views.
#[async_trait]
pub trait RecordStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Read the full sequence. Missing or unreadable data reads as empty.
    async fn load(&self) -> Result<Vec<T>, RepositoryError>;

    /// Replace the full sequence.
    async fn save(&self, records: &[T]) -> Result<(), RepositoryError>;

    async fn load_daily(&self, day: NaiveDate) -> Result<Vec<T>, RepositoryError>;

    async fn append_daily(&self, day: NaiveDate, record: &T) -> Result<(), RepositoryError>;
}
