use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::{Database, Mutation, QuizStore, StoreError};
use crate::metrics::track_store_operation;

/// JSON document on disk, rewritten in full on every mutation.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Database {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Store file {} missing, using empty database", self.path.display());
                return Database::default();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read store file {}: {}, using empty database",
                    self.path.display(),
                    e
                );
                return Database::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Database::from_value(value),
            Err(e) => {
                tracing::warn!(
                    "Store file {} is not valid JSON ({}), using empty database",
                    self.path.display(),
                    e
                );
                Database::default()
            }
        }
    }

    async fn write(&self, db: &Database) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(db)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, body).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl QuizStore for FileStore {
    async fn load(&self) -> Database {
        track_store_operation("load", async { Ok::<_, StoreError>(self.read().await) })
            .await
            .unwrap_or_default()
    }

    async fn mutate(&self, mutation: Mutation) -> Result<Database, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut db = self.load().await;
        mutation(&mut db);

        track_store_operation("save", self.write(&db)).await?;
        tracing::debug!(
            "Store saved: quizzes={}, results={}",
            db.quizzes.len(),
            db.results.len()
        );

        Ok(db)
    }
}
