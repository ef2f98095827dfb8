use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;

use crate::domain::{error::RepositoryError, repositories::record_store::RecordStore};

/// JSON-array file storage for one record kind.
///
/// Layout under the data directory, for kind `checkins`:
///
/// ```text
/// checkins/total/checkins.json              all-time sequence
/// checkins/daily/checkins_2025-03-01.json   records created that UTC day
/// ```
pub struct JsonFileStore<T> {
    kind: String,
    total_path: PathBuf,
    daily_dir: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFileStore<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            total_path: self.total_path.clone(),
            daily_dir: self.daily_dir.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> JsonFileStore<T> {
    /// Prepare the directory layout for `kind` under `data_dir`.
    ///
    /// A flat `<data_dir>/<kind>.json` left by older deployments is moved into
    /// the total file (kept as `<kind>.json.backup`) when no total file exists.
    pub async fn open(data_dir: &Path, kind: &str) -> Result<Self, RepositoryError> {
        let kind_dir = data_dir.join(kind);
        let total_dir = kind_dir.join("total");
        let daily_dir = kind_dir.join("daily");
        for dir in [&total_dir, &daily_dir] {
            fs::create_dir_all(dir).await.map_err(storage_error)?;
        }

        let total_path = total_dir.join(format!("{kind}.json"));
        let legacy_path = data_dir.join(format!("{kind}.json"));
        if !exists(&total_path).await? && exists(&legacy_path).await? {
            tracing::info!(from = %legacy_path.display(), to = %total_path.display(), "Migrating legacy data file");
            fs::copy(&legacy_path, &total_path)
                .await
                .map_err(storage_error)?;
            fs::rename(&legacy_path, with_suffix(&legacy_path, "backup"))
                .await
                .map_err(storage_error)?;
        }
        if !exists(&total_path).await? {
            fs::write(&total_path, b"[]").await.map_err(storage_error)?;
        }

        Ok(Self {
            kind: kind.to_string(),
            total_path,
            daily_dir,
            _record: PhantomData,
        })
    }

    pub fn total_path(&self) -> &Path {
        &self.total_path
    }

    pub fn daily_path(&self, day: NaiveDate) -> PathBuf {
        self.daily_dir
            .join(format!("{}_{}.json", self.kind, day.format("%Y-%m-%d")))
    }
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Read failures of any kind read as an empty sequence. A file that does
    /// not parse is copied to `<file>.corrupt-<UTC timestamp>` first, since
    /// the next save would otherwise overwrite it.
    async fn read_records(&self, path: &Path) -> Vec<T> {
        let raw = match fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read records, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => records,
            Err(e) => {
                let stamp = Utc::now().format("%Y%m%dT%H%M%S%.9fZ");
                let quarantine = with_suffix(path, &format!("corrupt-{stamp}"));
                tracing::warn!(
                    path = %path.display(),
                    copy = %quarantine.display(),
                    error = %e,
                    "Failed to parse records, treating as empty"
                );
                if let Err(e) = fs::write(&quarantine, &raw).await {
                    tracing::error!(path = %quarantine.display(), error = %e, "Failed to keep copy of unparseable file");
                }
                Vec::new()
            }
        }
    }

    async fn write_records(&self, path: &Path, records: &[T]) -> Result<(), RepositoryError> {
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        // write-then-rename so concurrent readers never see a partial file
        let tmp = with_suffix(path, "tmp");
        fs::write(&tmp, json).await.map_err(storage_error)?;
        fs::rename(&tmp, path).await.map_err(storage_error)
    }
}

#[async_trait]
impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.read_records(&self.total_path).await)
    }

    async fn save(&self, records: &[T]) -> Result<(), RepositoryError> {
        self.write_records(&self.total_path, records).await
    }

    async fn load_daily(&self, day: NaiveDate) -> Result<Vec<T>, RepositoryError> {
        Ok(self.read_records(&self.daily_path(day)).await)
    }

    async fn append_daily(&self, day: NaiveDate, record: &T) -> Result<(), RepositoryError> {
        let path = self.daily_path(day);
        let mut records = self.read_records(&path).await;
        records.push(record.clone());
        self.write_records(&path, &records).await
    }
}

async fn exists(path: &Path) -> Result<bool, RepositoryError> {
    fs::try_exists(path).await.map_err(storage_error)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn storage_error(e: std::io::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}
