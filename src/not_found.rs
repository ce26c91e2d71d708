//! The response for routes and resources that do not exist.

use axum::{http::StatusCode, response::Response};

use crate::error_response;

/// A route handler for requests that do not match any route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// A 404 response with the body `{"error": "Not found"}`.
pub fn get_404_not_found_response() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}
