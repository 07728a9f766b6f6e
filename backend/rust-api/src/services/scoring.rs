use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Answer, LeaderboardEntry, Question, QuestionOutcome, QuizResult, UNANSWERED};

pub const LEADERBOARD_LIMIT: usize = 20;

/// Grades answers against questions in the quiz's canonical order.
/// Answers are matched by question id; a later duplicate overrides an earlier one.
pub fn grade(questions: &[Question], answers: &[Answer]) -> Vec<QuestionOutcome> {
    let selected: HashMap<&str, i64> = answers
        .iter()
        .map(|a| (a.question_id.as_str(), a.selected_index))
        .collect();

    questions
        .iter()
        .map(|q| {
            let selected_index = selected.get(q.id.as_str()).copied().unwrap_or(UNANSWERED);
            QuestionOutcome {
                question_id: q.id.clone(),
                question: q.question.clone(),
                selected_index,
                correct_index: q.correct_index,
                is_correct: i64::try_from(q.correct_index).is_ok_and(|c| c == selected_index),
            }
        })
        .collect()
}

pub fn score(outcomes: &[QuestionOutcome]) -> u32 {
    outcomes.iter().filter(|o| o.is_correct).count() as u32
}

/// `round(100 * score / total)` with halves rounded up; 0 for an empty quiz.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (score, total) = (u64::from(score), u64::from(total));
    ((200 * score + total) / (2 * total)) as u32
}

/// Best attempt per player, ranked and truncated to `limit` rows.
pub fn rank_leaderboard<'a>(
    results: impl IntoIterator<Item = &'a QuizResult>,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    let mut best: Vec<&QuizResult> = Vec::new();
    let mut slot_by_player: HashMap<&str, usize> = HashMap::new();

    for result in results {
        match slot_by_player.get(result.player_name.as_str()) {
            Some(&slot) => {
                // Equal score with unequal percentage only happens when
                // totalQuestions changed between attempts.
                if compare_attempts(result, best[slot]) == Ordering::Greater {
                    best[slot] = result;
                }
            }
            None => {
                slot_by_player.insert(result.player_name.as_str(), best.len());
                best.push(result);
            }
        }
    }

    best.sort_by(|a, b| compare_attempts(b, a));
    best.into_iter()
        .take(limit)
        .map(|r| LeaderboardEntry {
            player_name: r.player_name.clone(),
            score: r.score,
            percentage: r.percentage,
        })
        .collect()
}

fn compare_attempts(a: &QuizResult, b: &QuizResult) -> Ordering {
    a.score
        .cmp(&b.score)
        .then(a.percentage.cmp(&b.percentage))
        .then(a.completed_at.cmp(&b.completed_at))
}
