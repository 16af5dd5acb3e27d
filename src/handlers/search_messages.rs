// GET /api/messages?name=NAME handler

use crate::error::ApiError;
use crate::handlers::guarded;
use crate::models::SearchResponse;
use crate::routes::SharedStore;
use crate::storage::MessageStore;
use crate::validation::{split_field_key, validate_search_name, ValidationError};
use std::convert::Infallible;
use warp::http::StatusCode;

pub async fn search_messages_handler(
    store: SharedStore,
    query: Vec<(String, String)>,
) -> Result<impl warp::Reply, Infallible> {
    Ok(guarded("GET /api/messages", async move {
        let response = search_messages(store.as_ref(), &query).await?;
        Ok(warp::reply::with_status(
            warp::reply::json(&response),
            StatusCode::OK,
        ))
    })
    .await)
}

async fn search_messages(
    store: &dyn MessageStore,
    query: &[(String, String)],
) -> Result<SearchResponse, ApiError> {
    let mut names = Vec::new();
    for (key, value) in query {
        match split_field_key(key) {
            ("name", false) => names.push(value.clone()),
            // `name[]=..` nests the value, which is never a plain string
            ("name", true) => return Err(ValidationError::InvalidSearchName.into()),
            _ => {}
        }
    }

    let name = validate_search_name(&names)?;

    let latest = store
        .find_latest_by_name(&name)
        .await
        .map_err(ApiError::SearchFailed)?;

    tracing::debug!(name = %name, found = latest.is_some(), "message search");
    Ok(SearchResponse::from(latest))
}
