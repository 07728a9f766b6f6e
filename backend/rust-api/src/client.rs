//! HTTP client for the QuizRoom API, used by the terminal front end.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{
    LeaderboardEntry, LeaderboardResponse, NewSubmission, QuizForTaking, QuizListResponse,
    QuizSummary, ResultDetailResponse, SubmissionResponse,
};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid API URL '{0}'")]
    InvalidBaseUrl(String),
    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::InvalidBaseUrl(_) => None,
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let invalid = || ClientError::InvalidBaseUrl(base_url.to_string());
        let base_url = Url::parse(base_url).map_err(|_| invalid())?;
        if base_url.cannot_be_a_base() {
            return Err(invalid());
        }

        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { http, base_url })
    }

    /// `<base>/api/<segments...>`, each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    pub async fn list_quizzes(&self) -> Result<Vec<QuizSummary>, ClientError> {
        let response = self.http.get(self.url(&["quizzes"])?).send().await?;
        let body: QuizListResponse = decode(response).await?;
        Ok(body.quizzes)
    }

    pub async fn get_quiz(&self, quiz_id: &str) -> Result<QuizForTaking, ClientError> {
        let response = self
            .http
            .get(self.url(&["quizzes", quiz_id])?)
            .send()
            .await?;
        decode(response).await
    }

    /// Sends a raw quiz document; the server validates it.
    pub async fn create_quiz(&self, quiz: &Value) -> Result<QuizSummary, ClientError> {
        let response = self.http.post(self.url(&["quizzes"])?).json(quiz).send().await?;
        decode(response).await
    }

    pub async fn submit(
        &self,
        quiz_id: &str,
        submission: &NewSubmission,
    ) -> Result<SubmissionResponse, ClientError> {
        let response = self
            .http
            .post(self.url(&["quizzes", quiz_id, "submit"])?)
            .json(submission)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_result(&self, result_id: &str) -> Result<ResultDetailResponse, ClientError> {
        let response = self
            .http
            .get(self.url(&["results", result_id])?)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn leaderboard(&self, quiz_id: &str) -> Result<Vec<LeaderboardEntry>, ClientError> {
        let response = self
            .http
            .get(self.url(&["quizzes", quiz_id, "leaderboard"])?)
            .send()
            .await?;
        let body: LeaderboardResponse = decode(response).await?;
        Ok(body.leaderboard)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Api {
        status,
        message: error_message(status, &body),
    })
}

/// Pulls a readable message out of `{ "error" }` or `{ "errors": [...] }`.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let from_body = parsed.as_ref().and_then(|value| {
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Some(message.to_string());
        }
        let errors: Vec<&str> = value
            .get("errors")?
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .collect();
        (!errors.is_empty()).then(|| errors.join(" "))
    });

    from_body.unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
}
