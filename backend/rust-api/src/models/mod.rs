pub mod quiz;
pub mod result;

pub use quiz::{
    NewQuestion, NewQuiz, Question, QuestionForTaking, Quiz, QuizForTaking, QuizListResponse,
    QuizSettings, QuizSummary, TimerMode, TimerSettings,
};
pub use result::{
    Answer, LeaderboardEntry, LeaderboardResponse, NewSubmission, QuestionOutcome, QuizResult,
    ResultDetailResponse, ResultView, SubmissionResponse, UNANSWERED,
};
