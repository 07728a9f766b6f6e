use crate::config::Config;
use crate::store::{FileStore, QuizStore};
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn QuizStore>,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let file_store = FileStore::new(config.data_path.clone());
        tracing::info!("Opening quiz store at {}", file_store.path().display());
        let store: Arc<dyn QuizStore> = Arc::new(file_store);

        if config.seed_on_start {
            seed::ensure_seeded(store.as_ref()).await?;
        }

        Ok(Self { config, store })
    }

    pub fn with_store(config: Config, store: Arc<dyn QuizStore>) -> Self {
        Self { config, store }
    }
}

pub mod quiz_service;
pub mod scoring;
pub mod seed;
pub mod validation;
