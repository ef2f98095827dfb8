use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::domain::{error::RepositoryError, repositories::record_store::RecordStore};

/// In-process stand-in for [`JsonFileStore`](super::json_file_store::JsonFileStore).
/// Clones share the same records.
pub struct InMemoryStore<T> {
    total: Arc<Mutex<Vec<T>>>,
    daily: Arc<Mutex<HashMap<NaiveDate, Vec<T>>>>,
    fail_saves: Arc<AtomicBool>,
}

impl<T> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            total: Arc::clone(&self.total),
            daily: Arc::clone(&self.daily),
            fail_saves: Arc::clone(&self.fail_saves),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self {
            total: Arc::new(Mutex::new(Vec::new())),
            daily: Arc::new(Mutex::new(HashMap::new())),
            fail_saves: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<T> InMemoryStore<T> {
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            total: Arc::new(Mutex::new(records)),
            ..Self::default()
        }
    }

    /// Make every subsequent `save` fail with a storage error.
    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T> RecordStore<T> for InMemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Vec<T>, RepositoryError> {
        let records = self.total.lock().await.clone();
        // give concurrent callers a chance to interleave
        tokio::task::yield_now().await;
        Ok(records)
    }

    async fn save(&self, records: &[T]) -> Result<(), RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Storage("disk full".to_string()));
        }
        *self.total.lock().await = records.to_vec();
        Ok(())
    }

    async fn load_daily(&self, day: NaiveDate) -> Result<Vec<T>, RepositoryError> {
        Ok(self.daily.lock().await.get(&day).cloned().unwrap_or_default())
    }

    async fn append_daily(&self, day: NaiveDate, record: &T) -> Result<(), RepositoryError> {
        self.daily
            .lock()
            .await
            .entry(day)
            .or_default()
            .push(record.clone());
        Ok(())
    }
}
