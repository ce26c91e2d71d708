//! Middleware for logging requests and responses.

use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::{request, response},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::Error;

/// Bodies longer than this many bytes are truncated in `info` logs.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body the middleware will read, in bytes.
///
/// Matches the default body limit of axum's extractors.
pub const MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Bodies are passed on byte for byte. A request body larger than
/// [MAX_REQUEST_BODY_SIZE] is rejected before it reaches the handlers.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, MAX_REQUEST_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::debug!("could not read request body: {error}");
            return Error::InvalidRequest(format!("could not read request body: {error}"))
                .into_response();
        }
    };
    log_request(&parts, &body_text(&body_bytes));

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return Error::ResponseBodyError(error.to_string()).into_response();
        }
    };
    log_response(&parts, &body_text(&body_bytes));

    Response::from_parts(parts, Body::from(body_bytes))
}

/// The body as text for the logs. Invalid UTF-8 is replaced.
fn body_text(body: &Bytes) -> String {
    String::from_utf8_lossy(body).into_owned()
}

/// The longest prefix of `body` that fits in [LOG_BODY_LENGTH_LIMIT] bytes
/// without splitting a character.
fn truncate_body(body: &str) -> &str {
    let end = body
        .char_indices()
        .map(|(index, c)| index + c.len_utf8())
        .take_while(|&end| end <= LOG_BODY_LENGTH_LIMIT)
        .last()
        .unwrap_or(0);

    &body[..end]
}

fn log_request(parts: &request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {parts:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {parts:#?}\nbody: {body:?}");
    }
}

fn log_response(parts: &response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {parts:#?}\nbody: {:}...",
            truncate_body(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {parts:#?}\nbody: {body:?}");
    }
}
