use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

/// Records request count and latency per method and normalized path.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(duration);

    response
}

/// Collapses the id segment after a collection name so each route yields
/// one label value regardless of which quiz or result was requested.
fn normalize_path(path: &str) -> String {
    let mut normalized = Vec::new();
    let mut previous = "";

    for segment in path.split('/') {
        if !segment.is_empty() && is_collection(previous) {
            normalized.push("{id}");
        } else {
            normalized.push(segment);
        }
        previous = segment;
    }

    normalized.join("/")
}

fn is_collection(segment: &str) -> bool {
    matches!(segment, "quizzes" | "results")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/api/quizzes/quiz_0f3a9c2e4b6d48e1a7c5d3b2e1f09a8c"),
            "/api/quizzes/{id}"
        );
        assert_eq!(
            normalize_path("/api/quizzes/quiz_js_basics/leaderboard"),
            "/api/quizzes/{id}/leaderboard"
        );
        assert_eq!(
            normalize_path("/api/results/result_123/"),
            "/api/results/{id}/"
        );
        assert_eq!(normalize_path("/api/quizzes"), "/api/quizzes");
        assert_eq!(normalize_path("/api/health"), "/api/health");
        assert_eq!(normalize_path("/metrics"), "/metrics");
    }

    #[test]
    fn test_is_collection() {
        assert!(is_collection("quizzes"));
        assert!(is_collection("results"));
        assert!(!is_collection("api"));
        assert!(!is_collection(""));
    }
}
