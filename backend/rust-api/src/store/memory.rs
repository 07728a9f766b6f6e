use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Database, Mutation, QuizStore, StoreError};

/// In-process store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    db: RwLock<Database>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(db: Database) -> Self {
        Self {
            db: RwLock::new(db),
        }
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn load(&self) -> Database {
        self.db.read().await.clone()
    }

    async fn mutate(&self, mutation: Mutation) -> Result<Database, StoreError> {
        let mut db = self.db.write().await;
        mutation(&mut *db);
        Ok(db.clone())
    }
}
