use crate::models::{TimerMode, TimerSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    Submitted,
}

/// What a one-second tick did to the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTick {
    /// No countdown is active (mode off, not running, or already finished).
    Inactive,
    Counting { remaining_seconds: u64 },
    /// Per-question countdown hit zero before the last question.
    AdvanceQuestion,
    /// Countdown hit zero; the attempt must be submitted with `timerExpired`.
    TimeExpired,
}

/// Countdown for one attempt: `idle -> running -> expired | submitted`.
#[derive(Debug, Clone)]
pub struct AttemptTimer {
    mode: TimerMode,
    duration: Option<u64>,
    remaining: Option<u64>,
    state: TimerState,
}

impl AttemptTimer {
    pub fn new(settings: &TimerSettings) -> Self {
        Self {
            mode: settings.mode,
            duration: settings.countdown_seconds(),
            remaining: None,
            state: TimerState::Idle,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_seconds(&self) -> Option<u64> {
        self.remaining
    }

    pub fn start(&mut self) {
        if self.state != TimerState::Idle {
            return;
        }
        self.state = TimerState::Running;
        self.remaining = self.duration;
    }

    /// Restarts the per-question countdown after navigation.
    pub fn question_changed(&mut self) {
        if self.state == TimerState::Running && self.mode == TimerMode::PerQuestion {
            self.remaining = self.duration;
        }
    }

    pub fn tick(&mut self, on_last_question: bool) -> TimerTick {
        if self.state != TimerState::Running {
            return TimerTick::Inactive;
        }
        let Some(remaining) = self.remaining else {
            return TimerTick::Inactive;
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.remaining = Some(remaining);
            return TimerTick::Counting {
                remaining_seconds: remaining,
            };
        }

        if self.mode == TimerMode::PerQuestion && !on_last_question {
            self.remaining = self.duration;
            return TimerTick::AdvanceQuestion;
        }

        self.remaining = Some(0);
        self.state = TimerState::Expired;
        TimerTick::TimeExpired
    }

    pub fn mark_submitted(&mut self) {
        self.state = TimerState::Submitted;
        self.remaining = None;
    }
}
