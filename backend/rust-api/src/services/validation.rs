//! Structural checks for incoming payloads.
//!
//! Validation parses while it checks: every rule runs, all failures are
//! collected, and a typed request comes out only when the list is empty.

use serde_json::{Map, Value};

use crate::models::{
    Answer, NewQuestion, NewQuiz, NewSubmission, QuizSettings, TimerMode, TimerSettings,
};

pub type ValidationErrors = Vec<String>;

pub fn validate_create_quiz(body: &Value) -> Result<NewQuiz, ValidationErrors> {
    let mut errors = Vec::new();
    let empty = Map::new();
    let obj = body.as_object().unwrap_or_else(|| {
        errors.push("Body must be an object.".to_string());
        &empty
    });

    let title = match obj.get("title").and_then(Value::as_str).map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => {
            errors.push("title is required.".to_string());
            String::new()
        }
    };

    let description = match obj.get("description") {
        Some(Value::String(description)) => description.clone(),
        _ => {
            errors.push("description must be a string.".to_string());
            String::new()
        }
    };

    let category = match obj.get("category") {
        None | Some(Value::Null) => None,
        Some(Value::String(category)) => Some(category.trim().to_string()),
        Some(_) => {
            errors.push("category must be a string.".to_string());
            None
        }
    };

    let settings = match obj.get("settings") {
        None | Some(Value::Null) => None,
        Some(Value::Object(settings)) => Some(parse_settings(settings, &mut errors)),
        Some(_) => {
            errors.push("settings must be an object.".to_string());
            None
        }
    };

    let questions = match obj.get("questions") {
        Some(Value::Array(items)) => {
            if items.is_empty() {
                errors.push("questions must be a non-empty array.".to_string());
            }
            items
                .iter()
                .enumerate()
                .filter_map(|(idx, item)| parse_question(idx, item, &mut errors))
                .collect()
        }
        _ => {
            errors.push("questions must be a non-empty array.".to_string());
            Vec::new()
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewQuiz {
        title,
        description,
        category,
        settings,
        questions,
    })
}

fn parse_settings(settings: &Map<String, Value>, errors: &mut ValidationErrors) -> QuizSettings {
    let shuffle_questions = match settings.get("shuffleQuestions") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(shuffle)) => *shuffle,
        Some(_) => {
            errors.push("settings.shuffleQuestions must be a boolean.".to_string());
            true
        }
    };

    let timer = match settings.get("timer") {
        None | Some(Value::Null) => TimerSettings::default(),
        Some(Value::Object(timer)) => parse_timer(timer, errors),
        Some(_) => {
            errors.push("settings.timer must be an object.".to_string());
            TimerSettings::default()
        }
    };

    QuizSettings {
        shuffle_questions,
        timer,
    }
}

fn parse_timer(timer: &Map<String, Value>, errors: &mut ValidationErrors) -> TimerSettings {
    let Some(mode) = timer
        .get("mode")
        .and_then(Value::as_str)
        .and_then(TimerMode::parse)
    else {
        errors.push("settings.timer.mode must be one of: off, total, perQuestion.".to_string());
        return TimerSettings::default();
    };

    let mut parsed = TimerSettings {
        mode,
        ..TimerSettings::default()
    };

    match mode {
        TimerMode::Off => {}
        TimerMode::Total => match timer.get("totalSeconds").and_then(positive_integer) {
            Some(seconds) => parsed.total_seconds = Some(seconds),
            None => {
                errors.push("settings.timer.totalSeconds must be a positive integer.".to_string())
            }
        },
        TimerMode::PerQuestion => {
            match timer.get("perQuestionSeconds").and_then(positive_integer) {
                Some(seconds) => parsed.per_question_seconds = Some(seconds),
                None => errors.push(
                    "settings.timer.perQuestionSeconds must be a positive integer.".to_string(),
                ),
            }
        }
    }

    parsed
}

fn parse_question(idx: usize, item: &Value, errors: &mut ValidationErrors) -> Option<NewQuestion> {
    let Some(q) = item.as_object() else {
        errors.push(format!("questions[{}] must be an object.", idx));
        return None;
    };
    let errors_before = errors.len();

    let text = match q.get("question").and_then(Value::as_str).map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            errors.push(format!("questions[{}].question is required.", idx));
            String::new()
        }
    };

    let options = q.get("options").and_then(Value::as_array);
    match options {
        Some(options) if options.len() >= 2 => {}
        _ => errors.push(format!(
            "questions[{}].options must have at least 2 items.",
            idx
        )),
    }
    if options.is_some_and(|options| options.iter().any(|o| !o.is_string())) {
        errors.push(format!("questions[{}].options must be strings.", idx));
    }

    let correct_index = match q.get("correctIndex").and_then(integer) {
        None => {
            errors.push(format!("questions[{}].correctIndex must be an integer.", idx));
            None
        }
        Some(index) => match options {
            Some(options) if index < 0 || index as usize >= options.len() => {
                errors.push(format!("questions[{}].correctIndex out of range.", idx));
                None
            }
            _ => usize::try_from(index).ok(),
        },
    };

    if errors.len() > errors_before {
        return None;
    }

    Some(NewQuestion {
        question: text,
        options: options
            .map(|options| {
                options
                    .iter()
                    .filter_map(|o| o.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        correct_index: correct_index?,
    })
}

pub fn validate_submit(body: &Value) -> Result<NewSubmission, ValidationErrors> {
    let mut errors = Vec::new();
    let empty = Map::new();
    let obj = body.as_object().unwrap_or_else(|| {
        errors.push("Body must be an object.".to_string());
        &empty
    });

    let player_name = match obj.get("playerName").and_then(Value::as_str).map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            errors.push("playerName is required.".to_string());
            String::new()
        }
    };

    let raw_answers = match obj.get("answers") {
        Some(Value::Array(items)) => items.as_slice(),
        _ => {
            errors.push("answers must be an array.".to_string());
            &[]
        }
    };

    let meta = match obj.get("meta") {
        None | Some(Value::Null) => None,
        Some(meta @ Value::Object(_)) => Some(meta.clone()),
        Some(_) => {
            errors.push("meta must be an object.".to_string());
            None
        }
    };

    // shape errors come before per-answer errors
    let answers = raw_answers
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| parse_answer(idx, item, &mut errors))
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewSubmission {
        player_name,
        answers,
        meta,
    })
}

fn parse_answer(idx: usize, item: &Value, errors: &mut ValidationErrors) -> Option<Answer> {
    let Some(a) = item.as_object() else {
        errors.push(format!("answers[{}] must be an object.", idx));
        return None;
    };

    let question_id = a.get("questionId").and_then(Value::as_str);
    if question_id.is_none() {
        errors.push(format!("answers[{}].questionId is required.", idx));
    }
    let selected_index = a.get("selectedIndex").and_then(integer);
    if selected_index.is_none() {
        errors.push(format!("answers[{}].selectedIndex must be an integer.", idx));
    }

    Some(Answer {
        question_id: question_id?.to_string(),
        selected_index: selected_index?,
    })
}

/// JSON numbers without a fractional part count as integers (`2.0` included).
fn integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(i) = number.as_i64() {
        return Some(i);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn positive_integer(value: &Value) -> Option<u64> {
    integer(value)
        .filter(|i| *i > 0)
        .and_then(|i| u64::try_from(i).ok())
}
