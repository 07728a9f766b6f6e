use uuid::Uuid;

pub const QUIZ_PREFIX: &str = "quiz";
pub const QUESTION_PREFIX: &str = "q";
pub const RESULT_PREFIX: &str = "result";

/// Opaque identifier `<prefix>_<32 hex chars>`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
