use axum::{
    body::{Body, to_bytes},
    http::StatusCode,
    response::Response,
};
use serde::de::DeserializeOwned;

#[track_caller]
pub(crate) fn assert_status(response: &Response<Body>, status: StatusCode) {
    assert_eq!(
        response.status(),
        status,
        "want status {status}, got {}",
        response.status()
    );
}

/// Read the body of `response` and parse it as JSON.
pub(crate) async fn response_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("could not read response body");

    serde_json::from_slice(&body).expect("response body is not the expected JSON")
}
