use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use quizroom_api::{
    attempt::{format_clock, timer::TimerState, AttemptController, AttemptStep},
    client::{ApiClient, DEFAULT_API_URL},
    models::{QuizForTaking, ResultView, SubmissionResponse},
};

#[derive(Parser, Debug)]
#[command(name = "quizroom-cli", version, about = "Take QuizRoom quizzes from the terminal")]
struct Args {
    #[arg(long, env = "QUIZROOM_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available quizzes
    List,
    /// Take a quiz interactively
    Take {
        quiz_id: String,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Show a stored result
    Result { result_id: String },
    /// Show the top players for a quiz
    Leaderboard { quiz_id: String },
    /// Create a quiz from a JSON file
    Create { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quizroom_api=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ApiClient::new(&args.api_url)?;

    match args.command {
        Command::List => list(&client).await,
        Command::Take { quiz_id, name } => take(&client, &quiz_id, name).await,
        Command::Result { result_id } => show_result(&client, &result_id).await,
        Command::Leaderboard { quiz_id } => leaderboard(&client, &quiz_id).await,
        Command::Create { file } => create(&client, &file).await,
    }
}

async fn list(client: &ApiClient) -> anyhow::Result<()> {
    let quizzes = client.list_quizzes().await?;
    if quizzes.is_empty() {
        println!("No quizzes yet.");
        return Ok(());
    }
    for quiz in quizzes {
        println!(
            "{}  {} [{}] {} questions, timer: {}",
            quiz.id,
            quiz.title,
            quiz.category,
            quiz.question_count,
            quiz.settings.timer.mode.as_str()
        );
        if !quiz.description.is_empty() {
            println!("    {}", quiz.description);
        }
    }
    Ok(())
}

async fn create(client: &ApiClient, file: &Path) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload: serde_json::Value =
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", file.display()))?;
    let summary = client.create_quiz(&payload).await?;
    println!(
        "Created {} ({}, {} questions)",
        summary.id, summary.title, summary.question_count
    );
    Ok(())
}

async fn leaderboard(client: &ApiClient, quiz_id: &str) -> anyhow::Result<()> {
    let rows = client.leaderboard(quiz_id).await?;
    if rows.is_empty() {
        println!("No attempts yet.");
    }
    for (rank, row) in rows.iter().enumerate() {
        println!(
            "{:>2}. {:<24} {:>3} pts {:>3}%",
            rank + 1,
            row.player_name,
            row.score,
            row.percentage
        );
    }
    Ok(())
}

async fn show_result(client: &ApiClient, result_id: &str) -> anyhow::Result<()> {
    let detail = client.get_result(result_id).await?;
    println!("{}", detail.quiz.title);
    print_breakdown(&detail.quiz, &detail.result);
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Select(usize),
    Next,
    Prev,
    Submit,
    Name(String),
    Help,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if let Some(name) = line.strip_prefix("name ") {
        return Input::Name(name.trim().to_string());
    }
    match line {
        "n" | "next" => Input::Next,
        "p" | "prev" => Input::Prev,
        "s" | "submit" => Input::Submit,
        "h" | "help" | "?" => Input::Help,
        _ => match line.parse::<usize>() {
            Ok(n) if n > 0 => Input::Select(n - 1),
            _ => Input::Unknown,
        },
    }
}

async fn take(client: &ApiClient, quiz_id: &str, name: Option<String>) -> anyhow::Result<()> {
    let quiz = client.get_quiz(quiz_id).await?;
    if quiz.questions.is_empty() {
        anyhow::bail!("Quiz {} has no questions", quiz_id);
    }

    let mut attempt = AttemptController::start(quiz);
    if let Some(name) = name {
        attempt.set_player_name(name);
    }

    println!("{}", attempt.quiz().title);
    println!("Question order seed: {}", attempt.seed());
    print_help();
    render(&attempt);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => match attempt.tick() {
                AttemptStep::Waiting => {}
                AttemptStep::Counting { remaining_seconds } => {
                    if remaining_seconds <= 5 || remaining_seconds % 15 == 0 {
                        println!("[{} left]", format_clock(remaining_seconds));
                    }
                }
                AttemptStep::Advanced => {
                    println!("Time is up for that question.");
                    render(&attempt);
                }
                AttemptStep::SubmitDue => {
                    println!("Time is up. Submitting...");
                    if submit(client, &mut attempt, true).await {
                        return Ok(());
                    }
                }
            },
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!("Input closed, attempt abandoned.");
                    return Ok(());
                };
                match parse_input(&line) {
                    Input::Select(option) => match attempt.select(option) {
                        Ok(()) => render(&attempt),
                        Err(e) => println!("{}", e),
                    },
                    Input::Next => {
                        if attempt.go(1) {
                            render(&attempt);
                        }
                    }
                    Input::Prev => {
                        if attempt.go(-1) {
                            render(&attempt);
                        }
                    }
                    Input::Name(name) => {
                        attempt.set_player_name(name);
                        println!("Playing as {}", attempt.player_name());
                    }
                    Input::Submit => {
                        let expired = attempt.timer().state() == TimerState::Expired;
                        if submit(client, &mut attempt, expired).await {
                            return Ok(());
                        }
                    }
                    Input::Help => print_help(),
                    Input::Unknown => println!("Unknown command, type `help`."),
                }
            }
        }
    }
}

/// Returns true once the server has accepted the attempt.
async fn submit(client: &ApiClient, attempt: &mut AttemptController, timer_expired: bool) -> bool {
    let submission = match attempt.build_submission(timer_expired, Utc::now()) {
        Ok(submission) => submission,
        Err(e) => {
            println!("{} Use `name <your name>` then `s`.", e);
            return false;
        }
    };

    let quiz_id = attempt.quiz().id.clone();
    match client.submit(&quiz_id, &submission).await {
        Ok(response) => {
            attempt.mark_submitted();
            print_submission(attempt.quiz(), &response);
            true
        }
        Err(e) => {
            match e.status() {
                Some(status) => println!("Submission failed ({}): {}", status.as_u16(), e),
                None => println!("Submission failed: {}", e),
            }
            false
        }
    }
}

fn print_help() {
    println!("Commands: <number> select option, n next, p prev, name <x>, s submit, help");
}

fn render(attempt: &AttemptController) {
    let Some(question) = attempt.current_question() else {
        return;
    };
    let total = attempt.total_questions();
    let selected = attempt.selection(&question.id);

    println!();
    print!(
        "Question {}/{} ({}%), answered {}/{}",
        attempt.current_index() + 1,
        total,
        attempt.progress_percent(),
        attempt.answered_count(),
        total
    );
    match attempt.timer().remaining_seconds() {
        Some(seconds) => println!(", {} left", format_clock(seconds)),
        None => println!(),
    }
    println!("{}", question.question);
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(i) { '*' } else { ' ' };
        println!(" {} {}. {}", marker, i + 1, option);
    }
}

fn print_submission(quiz: &QuizForTaking, response: &SubmissionResponse) {
    println!();
    println!(
        "{} scored {}/{} ({}%)",
        response.player_name, response.score, response.total_questions, response.percentage
    );
    for outcome in &response.results {
        let text = quiz
            .questions
            .iter()
            .find(|q| q.id == outcome.question_id)
            .map(|q| q.question.as_str())
            .unwrap_or(outcome.question.as_str());
        let mark = if outcome.is_correct { "ok " } else { "XX " };
        println!("{}{}", mark, text);
    }
    println!("Result id: {}", response.result_id);
}

fn print_breakdown(quiz: &QuizForTaking, result: &ResultView) {
    println!(
        "{} scored {}/{} ({}%) at {}",
        result.player_name,
        result.score,
        result.total_questions,
        result.percentage,
        result.completed_at.format("%Y-%m-%d %H:%M")
    );
    for outcome in &result.results {
        let options = quiz
            .questions
            .iter()
            .find(|q| q.id == outcome.question_id)
            .map(|q| q.options.as_slice())
            .unwrap_or_default();
        let option_text = |index: i64| {
            usize::try_from(index)
                .ok()
                .and_then(|i| options.get(i))
                .map(String::as_str)
                .unwrap_or("(no answer)")
        };
        let mark = if outcome.is_correct { "ok " } else { "XX " };
        println!("{}{}", mark, outcome.question);
        println!("    yours: {}", option_text(outcome.selected_index));
        if !outcome.is_correct {
            println!("    correct: {}", option_text(outcome.correct_index as i64));
        }
    }
}
