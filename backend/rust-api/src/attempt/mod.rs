//! Client-side state for one pass through a quiz.
//!
//! The controller owns the per-attempt question order, the selected options,
//! the player name and the countdown. It is driven by a one-second `tick`
//! from whatever event loop hosts it and never talks to the network itself.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{
    Answer, NewSubmission, QuestionForTaking, QuizForTaking, TimerMode, UNANSWERED,
};

pub mod shuffle;
pub mod timer;

use timer::{AttemptTimer, TimerState, TimerTick};

#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("Please enter your name before submitting.")]
    MissingPlayerName,
    #[error("Option {0} does not exist for this question.")]
    InvalidOption(usize),
    #[error("This attempt has already been submitted.")]
    AlreadySubmitted,
    #[error("failed to encode attempt metadata: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStep {
    Waiting,
    Counting { remaining_seconds: u64 },
    /// The per-question countdown moved the attempt to the next question.
    Advanced,
    /// Time is up; submit with `timer_expired = true`.
    SubmitDue,
}

/// Timing and ordering details sent along with a submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptMeta {
    pub timer_mode: TimerMode,
    pub total_seconds: Option<u64>,
    pub per_question_seconds: Option<u64>,
    pub attempt_seed: u32,
    pub started_at: i64,
    pub finished_at: i64,
    pub time_taken_seconds: i64,
    pub timer_expired: bool,
}

pub struct AttemptController {
    quiz: QuizForTaking,
    seed: u32,
    index: usize,
    selections: HashMap<String, usize>,
    player_name: String,
    timer: AttemptTimer,
    started_at: DateTime<Utc>,
}

impl AttemptController {
    pub fn start(quiz: QuizForTaking) -> Self {
        Self::start_with_seed(quiz, shuffle::draw_seed(), Utc::now())
    }

    pub fn start_with_seed(mut quiz: QuizForTaking, seed: u32, started_at: DateTime<Utc>) -> Self {
        if quiz.settings.shuffle_questions {
            shuffle::shuffle_with_seed(&mut quiz.questions, seed);
        }

        let mut timer = AttemptTimer::new(&quiz.settings.timer);
        timer.start();

        tracing::debug!(
            "Attempt started: quiz={}, seed={}, timer={}",
            quiz.id,
            seed,
            timer.mode().as_str()
        );

        Self {
            quiz,
            seed,
            index: 0,
            selections: HashMap::new(),
            player_name: String::new(),
            timer,
            started_at,
        }
    }

    pub fn quiz(&self) -> &QuizForTaking {
        &self.quiz
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn timer(&self) -> &AttemptTimer {
        &self.timer
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total_questions(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuestionForTaking> {
        self.quiz.questions.get(self.index)
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 >= self.total_questions()
    }

    pub fn answered_count(&self) -> usize {
        self.selections.len()
    }

    /// Position through the quiz, `round((index + 1) / total * 100)`.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total_questions();
        if total == 0 {
            return 0;
        }
        ((200 * (self.index + 1) + total) / (2 * total)) as u32
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player_name = name.into();
    }

    pub fn selection(&self, question_id: &str) -> Option<usize> {
        self.selections.get(question_id).copied()
    }

    /// Selects an option on the current question.
    pub fn select(&mut self, option: usize) -> Result<(), AttemptError> {
        if self.timer.state() == TimerState::Submitted {
            return Err(AttemptError::AlreadySubmitted);
        }
        let question = self
            .current_question()
            .filter(|q| option < q.options.len())
            .ok_or(AttemptError::InvalidOption(option))?;
        let question_id = question.id.clone();
        self.selections.insert(question_id, option);
        Ok(())
    }

    /// Moves by `delta` questions, clamped to the quiz. Returns whether the
    /// current question changed.
    pub fn go(&mut self, delta: isize) -> bool {
        let last = self.total_questions().saturating_sub(1);
        let target = self.index.saturating_add_signed(delta).min(last);
        if target == self.index {
            return false;
        }
        self.index = target;
        self.timer.question_changed();
        true
    }

    pub fn tick(&mut self) -> AttemptStep {
        match self.timer.tick(self.is_last_question()) {
            TimerTick::Inactive => AttemptStep::Waiting,
            TimerTick::Counting { remaining_seconds } => AttemptStep::Counting { remaining_seconds },
            TimerTick::AdvanceQuestion => {
                self.index = (self.index + 1).min(self.total_questions().saturating_sub(1));
                AttemptStep::Advanced
            }
            TimerTick::TimeExpired => AttemptStep::SubmitDue,
        }
    }

    /// Builds the payload for the submit endpoint. A blank player name blocks
    /// submission here, before any request is made.
    pub fn build_submission(
        &self,
        timer_expired: bool,
        finished_at: DateTime<Utc>,
    ) -> Result<NewSubmission, AttemptError> {
        if self.timer.state() == TimerState::Submitted {
            return Err(AttemptError::AlreadySubmitted);
        }
        let player_name = self.player_name.trim();
        if player_name.is_empty() {
            return Err(AttemptError::MissingPlayerName);
        }

        let answers = self
            .quiz
            .questions
            .iter()
            .map(|q| Answer {
                question_id: q.id.clone(),
                selected_index: self
                    .selection(&q.id)
                    .and_then(|i| i64::try_from(i).ok())
                    .unwrap_or(UNANSWERED),
            })
            .collect();

        let started_ms = self.started_at.timestamp_millis();
        let finished_ms = finished_at.timestamp_millis();
        let timer_settings = &self.quiz.settings.timer;
        let meta = AttemptMeta {
            timer_mode: timer_settings.mode,
            total_seconds: timer_settings.total_seconds,
            per_question_seconds: timer_settings.per_question_seconds,
            attempt_seed: self.seed,
            started_at: started_ms,
            finished_at: finished_ms,
            time_taken_seconds: ((finished_ms - started_ms).max(0) + 500) / 1000,
            timer_expired,
        };

        Ok(NewSubmission {
            player_name: player_name.to_string(),
            answers,
            meta: Some(serde_json::to_value(meta)?),
        })
    }

    /// Call once the server accepted the submission.
    pub fn mark_submitted(&mut self) {
        self.timer.mark_submitted();
    }
}

/// `MM:SS`, minutes not capped at 59.
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
