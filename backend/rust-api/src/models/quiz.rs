use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_CATEGORY: &str = "General";

/// Quiz stored in the JSON database, answer key included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: QuizSettings,
    pub created_at: DateTime<Utc>,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    #[serde(default = "default_shuffle", deserialize_with = "shuffle_or_default")]
    pub shuffle_questions: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timer: TimerSettings,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            shuffle_questions: true,
            timer: TimerSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredTimer")]
pub struct TimerSettings {
    pub mode: TimerMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_question_seconds: Option<u64>,
}

impl TimerSettings {
    /// Countdown length for the configured mode, if the mode has one.
    pub fn countdown_seconds(&self) -> Option<u64> {
        match self.mode {
            TimerMode::Off => None,
            TimerMode::Total => self.total_seconds,
            TimerMode::PerQuestion => self.per_question_seconds,
        }
        .filter(|seconds| *seconds > 0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerMode {
    #[default]
    Off,
    Total,
    PerQuestion,
}

impl TimerMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "off" => Some(TimerMode::Off),
            "total" => Some(TimerMode::Total),
            "perQuestion" => Some(TimerMode::PerQuestion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Off => "off",
            TimerMode::Total => "total",
            TimerMode::PerQuestion => "perQuestion",
        }
    }
}

/// Timer as found on disk. Records written before validation was strict may
/// carry an unknown mode or non-numeric seconds; those read as absent.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct StoredTimer {
    mode: Option<Value>,
    total_seconds: Option<Value>,
    per_question_seconds: Option<Value>,
}

impl From<StoredTimer> for TimerSettings {
    fn from(raw: StoredTimer) -> Self {
        let seconds = |value: Option<Value>| value.and_then(|v| v.as_u64()).filter(|s| *s > 0);
        TimerSettings {
            mode: raw
                .mode
                .as_ref()
                .and_then(Value::as_str)
                .and_then(TimerMode::parse)
                .unwrap_or_default(),
            total_seconds: seconds(raw.total_seconds),
            per_question_seconds: seconds(raw.per_question_seconds),
        }
    }
}

/// `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn category_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(default_category))
}

fn shuffle_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_else(default_shuffle))
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_shuffle() -> bool {
    true
}

/// Validated quiz creation payload.
#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub settings: Option<QuizSettings>,
    pub questions: Vec<NewQuestion>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Public listing projection of a quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub question_count: usize,
    pub created_at: DateTime<Utc>,
    pub settings: QuizSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizListResponse {
    pub quizzes: Vec<QuizSummary>,
}

/// Quiz as handed to a player: no answer key, no creation timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizForTaking {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub settings: QuizSettings,
    pub questions: Vec<QuestionForTaking>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionForTaking {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

impl Quiz {
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            question_count: self.questions.len(),
            created_at: self.created_at,
            settings: self.settings.clone(),
        }
    }

    pub fn for_taking(&self) -> QuizForTaking {
        QuizForTaking {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            settings: self.settings.clone(),
            questions: self
                .questions
                .iter()
                .map(|q| QuestionForTaking {
                    id: q.id.clone(),
                    question: q.question.clone(),
                    options: q.options.clone(),
                })
                .collect(),
        }
    }
}
