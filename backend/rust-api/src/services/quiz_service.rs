use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;

use super::scoring::{self, LEADERBOARD_LIMIT};
use super::validation::{validate_create_quiz, validate_submit};
use crate::metrics::{record_submission, QUIZZES_CREATED_TOTAL};
use crate::models::{
    quiz::DEFAULT_CATEGORY, LeaderboardEntry, NewQuiz, Question, Quiz, QuizForTaking, QuizResult,
    QuizSummary, ResultDetailResponse, ResultView, SubmissionResponse,
};
use crate::store::{QuizStore, StoreError};
use crate::utils::ids::{new_id, QUESTION_PREFIX, QUIZ_PREFIX, RESULT_PREFIX};

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("validation failed: {}", .0.join(" "))]
    Validation(Vec<String>),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct QuizService {
    store: Arc<dyn QuizStore>,
}

impl QuizService {
    pub fn new(store: Arc<dyn QuizStore>) -> Self {
        Self { store }
    }

    pub async fn create_quiz(&self, payload: &Value) -> Result<QuizSummary, QuizError> {
        let new_quiz = validate_create_quiz(payload).map_err(QuizError::Validation)?;
        let quiz = build_quiz(new_quiz);
        let summary = quiz.summary();

        self.store
            .mutate(Box::new(move |db| db.quizzes.insert(0, quiz)))
            .await?;

        QUIZZES_CREATED_TOTAL.inc();
        tracing::info!(
            "Quiz created: id={}, questions={}",
            summary.id,
            summary.question_count
        );

        Ok(summary)
    }

    pub async fn list_quizzes(&self) -> Vec<QuizSummary> {
        let db = self.store.load().await;
        db.quizzes.iter().map(Quiz::summary).collect()
    }

    pub async fn get_quiz_for_taking(&self, quiz_id: &str) -> Result<QuizForTaking, QuizError> {
        let db = self.store.load().await;
        db.find_quiz(quiz_id)
            .map(Quiz::for_taking)
            .ok_or(QuizError::NotFound("Quiz not found"))
    }

    pub async fn submit(
        &self,
        quiz_id: &str,
        payload: &Value,
    ) -> Result<SubmissionResponse, QuizError> {
        let submission = validate_submit(payload).map_err(QuizError::Validation)?;

        let db = self.store.load().await;
        let quiz = db
            .find_quiz(quiz_id)
            .ok_or(QuizError::NotFound("Quiz not found"))?;

        let results = scoring::grade(&quiz.questions, &submission.answers);
        let score = scoring::score(&results);
        let total_questions = quiz.questions.len() as u32;
        let percentage = scoring::percentage(score, total_questions);

        let record = QuizResult {
            id: new_id(RESULT_PREFIX),
            quiz_id: quiz.id.clone(),
            player_name: submission.player_name,
            score,
            total_questions,
            percentage,
            answers: submission.answers,
            meta: submission.meta,
            completed_at: Utc::now(),
        };

        let response = SubmissionResponse {
            result_id: record.id.clone(),
            quiz_id: record.quiz_id.clone(),
            score,
            total_questions,
            percentage,
            results,
            meta: record.meta.clone(),
            player_name: record.player_name.clone(),
            completed_at: record.completed_at,
        };

        self.store
            .mutate(Box::new(move |db| db.results.insert(0, record)))
            .await?;

        let timer_expired = response
            .meta
            .as_ref()
            .and_then(|meta| meta.get("timerExpired"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        record_submission(timer_expired);
        tracing::info!(
            "Submission scored: quiz={}, result={}, score={}/{}, timer_expired={}",
            response.quiz_id,
            response.result_id,
            score,
            total_questions,
            timer_expired
        );

        Ok(response)
    }

    /// The stored score is returned as recorded, while the per-question rows
    /// are graded against the quiz as it currently stands.
    pub async fn get_result(&self, result_id: &str) -> Result<ResultDetailResponse, QuizError> {
        let db = self.store.load().await;
        let result = db
            .find_result(result_id)
            .ok_or(QuizError::NotFound("Result not found"))?;
        let quiz = db
            .find_quiz(&result.quiz_id)
            .ok_or(QuizError::NotFound("Quiz not found for result"))?;

        Ok(ResultDetailResponse {
            quiz: quiz.for_taking(),
            result: ResultView {
                id: result.id.clone(),
                quiz_id: result.quiz_id.clone(),
                player_name: result.player_name.clone(),
                score: result.score,
                total_questions: result.total_questions,
                percentage: result.percentage,
                results: scoring::grade(&quiz.questions, &result.answers),
                meta: result.meta.clone(),
                completed_at: result.completed_at,
            },
        })
    }

    pub async fn leaderboard(&self, quiz_id: &str) -> Result<Vec<LeaderboardEntry>, QuizError> {
        let db = self.store.load().await;
        if db.find_quiz(quiz_id).is_none() {
            return Err(QuizError::NotFound("Quiz not found"));
        }

        Ok(scoring::rank_leaderboard(
            db.results.iter().filter(|r| r.quiz_id == quiz_id),
            LEADERBOARD_LIMIT,
        ))
    }
}

fn build_quiz(new_quiz: NewQuiz) -> Quiz {
    Quiz {
        id: new_id(QUIZ_PREFIX),
        title: new_quiz.title,
        description: new_quiz.description,
        category: new_quiz
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        settings: new_quiz.settings.unwrap_or_default(),
        created_at: Utc::now(),
        questions: new_quiz
            .questions
            .into_iter()
            .map(|q| Question {
                id: new_id(QUESTION_PREFIX),
                question: q.question,
                options: q.options,
                correct_index: q.correct_index,
            })
            .collect(),
    }
}
