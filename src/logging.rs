//! Middleware for logging requests and responses.

use axum::{extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response};
use serde_json::{Value, json};

/// The maximum number of body bytes to log at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the response body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and logged at the `debug` level. One-time codes in JSON request
/// bodies are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (headers, body_text) = extract_header_and_body_text_from_request(request).await;

    if headers.method.eq(&axum::http::Method::POST)
        && headers.headers.get(CONTENT_TYPE) == Some(&"application/json".parse().unwrap())
    {
        let display_text = redact_json_field(&body_text, "code");
        log_request(&headers, &display_text);
    } else {
        log_request(&headers, &body_text);
    }

    let request = Request::from_parts(headers, body_text.into());
    let response = next.run(request).await;

    let (headers, body_text) = extract_header_and_body_text_from_response(response).await;
    log_response(&headers, &body_text);

    Response::from_parts(headers, body_text.into())
}

/// Replace the top-level field `field_name` in a JSON object with asterisks.
///
/// Bodies that do not parse as a JSON object are returned unchanged.
fn redact_json_field(body_text: &str, field_name: &str) -> String {
    let Ok(mut value) = serde_json::from_str::<Value>(body_text) else {
        return body_text.to_string();
    };

    if let Some(field) = value.get_mut(field_name) {
        *field = json!("********");
    }

    value.to_string()
}

async fn extract_header_and_body_text_from_request(
    request: Request,
) -> (axum::http::request::Parts, String) {
    let (headers, body) = request.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

async fn extract_header_and_body_text_from_response(
    response: Response,
) -> (axum::http::response::Parts, String) {
    let (headers, body) = response.into_parts();
    let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();

    (headers, String::from_utf8_lossy(&body_bytes).to_string())
}

/// Truncate `body` to at most `limit` bytes without splitting a character.
///
/// Slicing at a fixed byte index would panic on a multi-byte character that
/// straddles the limit, so back up to the nearest character boundary.
fn truncate_on_char_boundary(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }

    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate_on_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate_on_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}

#[cfg(test)]
mod redact_tests {
    use super::redact_json_field;

    #[test]
    fn redacts_code_field() {
        let body = r#"{"challenge_id":"abc","code":"987654"}"#;

        let redacted = redact_json_field(body, "code");

        assert!(!redacted.contains("987654"));
        assert!(redacted.contains("abc"));
    }

    #[test]
    fn leaves_non_json_bodies_unchanged() {
        let body = "code=987654";

        assert_eq!(redact_json_field(body, "code"), body);
    }

    #[test]
    fn leaves_bodies_without_the_field_unchanged() {
        let body = r#"{"identity":"user@example.com"}"#;

        let redacted = redact_json_field(body, "code");

        assert!(redacted.contains("user@example.com"));
    }
}

#[cfg(test)]
mod truncate_tests {
    use super::{LOG_BODY_LENGTH_LIMIT, truncate_on_char_boundary};

    #[test]
    fn short_bodies_are_unchanged() {
        assert_eq!(truncate_on_char_boundary("hello", 64), "hello");
    }

    #[test]
    fn long_ascii_bodies_are_cut_at_the_limit() {
        let body = "a".repeat(100);

        let truncated = truncate_on_char_boundary(&body, LOG_BODY_LENGTH_LIMIT);

        assert_eq!(truncated.len(), LOG_BODY_LENGTH_LIMIT);
    }

    #[test]
    fn multi_byte_character_straddling_the_limit_does_not_panic() {
        // 'ç' occupies bytes 63..65, straddling the 64-byte limit.
        let body = format!("{}ção e mais texto para passar do limite", "a".repeat(63));
        assert!(body.len() > LOG_BODY_LENGTH_LIMIT);

        let truncated = truncate_on_char_boundary(&body, LOG_BODY_LENGTH_LIMIT);

        assert_eq!(truncated.len(), 63);
        assert!(truncated.chars().all(|character| character == 'a'));
    }
}
