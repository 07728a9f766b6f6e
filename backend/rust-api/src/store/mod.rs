//! Whole-document JSON persistence.
//!
//! Every mutation is a full read, an in-memory change and a full rewrite of
//! the document. Implementations only promise that contract; `FileStore`
//! additionally serializes mutations issued from the same process.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::models::{Quiz, QuizResult};

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
    #[serde(default)]
    pub results: Vec<QuizResult>,
}

impl Database {
    /// Lenient decode: a collection that is missing or is not an array reads
    /// as empty, and a record that does not parse is skipped on its own.
    pub fn from_value(value: Value) -> Self {
        let quizzes = decode_collection(value.get("quizzes"), "quizzes");
        let results = decode_collection(value.get("results"), "results");
        Self { quizzes, results }
    }

    pub fn find_quiz(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|q| q.id == quiz_id)
    }

    pub fn find_result(&self, result_id: &str) -> Option<&QuizResult> {
        self.results.iter().find(|r| r.id == result_id)
    }
}

fn decode_collection<T: DeserializeOwned>(value: Option<&Value>, name: &str) -> Vec<T> {
    let items = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            tracing::warn!("Ignoring '{}' collection in store: not an array", name);
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping unreadable record '{}' in '{}': {}",
                    item.get("id").and_then(serde_json::Value::as_str).unwrap_or("<no id>"),
                    name,
                    e
                );
                None
            }
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode store document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Change applied to the loaded document before it is written back.
pub type Mutation = Box<dyn FnOnce(&mut Database) + Send>;

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Reads the whole document. Unreadable state reads as an empty database.
    async fn load(&self) -> Database;

    /// Loads, applies `mutation`, persists and returns the new document.
    async fn mutate(&self, mutation: Mutation) -> Result<Database, StoreError>;
}
