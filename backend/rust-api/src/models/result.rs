use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::quiz::QuizForTaking;

/// Selected option index meaning "no answer given".
pub const UNANSWERED: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub selected_index: i64,
}

/// Outcome of one submitted attempt. Never updated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: String,
    pub quiz_id: String,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub meta: Option<Value>,
    pub completed_at: DateTime<Utc>,
}

/// Validated submission payload. Also what the attempt client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub player_name: String,
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub question_id: String,
    pub question: String,
    pub selected_index: i64,
    pub correct_index: usize,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub result_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub results: Vec<QuestionOutcome>,
    pub meta: Option<Value>,
    pub player_name: String,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub id: String,
    pub quiz_id: String,
    pub player_name: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub results: Vec<QuestionOutcome>,
    pub meta: Option<Value>,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultDetailResponse {
    pub quiz: QuizForTaking,
    pub result: ResultView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}
