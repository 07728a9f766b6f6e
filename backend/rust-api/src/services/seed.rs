use chrono::Utc;

use crate::models::{Question, Quiz, QuizSettings, TimerMode, TimerSettings};
use crate::store::{QuizStore, StoreError};

/// Inserts the sample quizzes into an empty store. A non-empty store is
/// rewritten once so fields backfilled on read get persisted.
pub async fn ensure_seeded(store: &dyn QuizStore) -> Result<(), StoreError> {
    let db = store
        .mutate(Box::new(|db| {
            if db.quizzes.is_empty() {
                db.quizzes = sample_quizzes();
            }
        }))
        .await?;

    tracing::info!(
        "Store ready: quizzes={}, results={}",
        db.quizzes.len(),
        db.results.len()
    );
    Ok(())
}

pub fn sample_quizzes() -> Vec<Quiz> {
    let now = Utc::now();
    vec![
        Quiz {
            id: "quiz_js_basics".to_string(),
            title: "JavaScript Basics".to_string(),
            description: "Test your JS knowledge".to_string(),
            category: "JavaScript".to_string(),
            settings: QuizSettings {
                shuffle_questions: true,
                timer: TimerSettings {
                    mode: TimerMode::Total,
                    total_seconds: Some(60),
                    per_question_seconds: None,
                },
            },
            created_at: now,
            questions: vec![
                question(
                    "q_js_1",
                    "What is the typeof null?",
                    &["null", "undefined", "object", "number"],
                    2,
                ),
                question(
                    "q_js_2",
                    "Which is not a primitive type?",
                    &["string", "boolean", "array", "symbol"],
                    2,
                ),
                question(
                    "q_js_3",
                    "Which keyword declares a block-scoped variable?",
                    &["var", "let", "function", "this"],
                    1,
                ),
            ],
        },
        Quiz {
            id: "quiz_react_fundamentals".to_string(),
            title: "React Fundamentals".to_string(),
            description: "Components, hooks, and more".to_string(),
            category: "React".to_string(),
            settings: QuizSettings {
                shuffle_questions: true,
                timer: TimerSettings {
                    mode: TimerMode::PerQuestion,
                    total_seconds: None,
                    per_question_seconds: Some(20),
                },
            },
            created_at: now,
            questions: vec![
                question(
                    "q_r_1",
                    "Which hook is used for state in a function component?",
                    &["useMemo", "useState", "useRef", "useCallback"],
                    1,
                ),
                question(
                    "q_r_2",
                    "Keys in lists help React with…",
                    &["Animations", "Reconciliation", "Styling", "Routing"],
                    1,
                ),
                question(
                    "q_r_3",
                    "Which prop renders nested content?",
                    &["children", "content", "slot", "nested"],
                    0,
                ),
            ],
        },
    ]
}

fn question(id: &str, text: &str, options: &[&str], correct_index: usize) -> Question {
    Question {
        id: id.to_string(),
        question: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
    }
}
