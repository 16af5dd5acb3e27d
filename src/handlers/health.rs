// GET /health handler

use crate::models::HealthResponse;
use chrono::Utc;
use std::convert::Infallible;

pub async fn health_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::json(&HealthResponse::ok(Utc::now())))
}
