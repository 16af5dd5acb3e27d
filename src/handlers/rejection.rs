// Fallback route and rejection recovery

use crate::error::internal_error_body;
use crate::models::ErrorBody;
use std::convert::Infallible;
use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reject::{LengthRequired, PayloadTooLarge, Reject};
use warp::{Rejection, Reply};

/// Raised by the fallback route for any request no endpoint matched
#[derive(Debug)]
pub struct RouteNotFound {
    pub method: Method,
    pub path: String,
}

impl Reject for RouteNotFound {}

impl RouteNotFound {
    pub fn new(method: Method, path: &FullPath, query: &str) -> Self {
        let path = if query.is_empty() {
            path.as_str().to_string()
        } else {
            format!("{}?{}", path.as_str(), query)
        };
        Self { method, path }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody::new(
            "Route not found",
            format!("The route {} {} does not exist", self.method, self.path),
        )
    }
}

pub async fn route_not_found(
    method: Method,
    path: FullPath,
    query: String,
) -> Result<String, Rejection> {
    Err(warp::reject::custom(RouteNotFound::new(method, &path, &query)))
}

/// Convert every rejection into the JSON error contract
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if err.find::<PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorBody::new("Payload too large", "Request body must not exceed 10 MiB"),
        )
    } else if err.find::<LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            ErrorBody::new("Length required", "A Content-Length header is required"),
        )
    } else if let Some(not_found) = err.find::<RouteNotFound>() {
        (StatusCode::NOT_FOUND, not_found.body())
    } else if err.is_not_found() {
        (
            StatusCode::NOT_FOUND,
            ErrorBody::new("Route not found", "The requested route does not exist"),
        )
    } else {
        tracing::error!(rejection = ?err, "unhandled rejection");
        (StatusCode::INTERNAL_SERVER_ERROR, internal_error_body())
    };

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}
