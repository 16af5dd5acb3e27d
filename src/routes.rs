// Route definitions and middleware

use crate::handlers;
use crate::storage::MessageStore;
use std::sync::Arc;
use warp::http::header::{HeaderMap, HeaderValue};
use warp::Filter;

/// Store handle shared by every request
pub type SharedStore = Arc<dyn MessageStore>;

/// Largest accepted request body
pub const MAX_BODY_BYTES: u64 = 10 * 1024 * 1024;

pub fn configure_routes(
    store: SharedStore,
    client_origin: &str,
) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
    // GET /health
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(handlers::health_handler);

    let messages = warp::path("api")
        .and(warp::path("messages"))
        .and(warp::path::end());

    // POST /api/messages
    let create_message = messages
        .and(warp::post())
        .and(with_store(store.clone()))
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and_then(handlers::create_message_handler);

    // GET /api/messages?name=NAME
    let search_messages = messages
        .and(warp::get())
        .and(with_store(store))
        .and(warp::query::<Vec<(String, String)>>())
        .and_then(handlers::search_messages_handler);

    // Anything else
    let not_found = warp::any()
        .and(warp::method())
        .and(warp::path::full())
        .and(raw_query())
        .and_then(handlers::route_not_found);

    let access_log = warp::log::custom(|info| {
        tracing::info!(
            target: "guestbook::access",
            method = %info.method(),
            path = info.path(),
            status = info.status().as_u16(),
            elapsed_ms = info.elapsed().as_millis() as u64,
            "request"
        );
    });

    let api = health
        .or(create_message)
        .or(search_messages)
        .or(not_found)
        .recover(handlers::handle_rejection);

    // Requests from any other origin are served without CORS headers and
    // left for the browser to block
    let cross_origin = from_origin(client_origin.to_string())
        .and(api.clone().with(cors(client_origin)));

    cross_origin
        .or(api)
        .with(warp::reply::with::headers(security_headers()))
        .with(access_log)
}

fn from_origin(
    client_origin: String,
) -> impl Filter<Extract = (), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>("origin")
        .and_then(move |origin: Option<String>| {
            let allowed = origin.as_deref() == Some(client_origin.as_str());
            async move {
                if allowed {
                    Ok(())
                } else {
                    Err(warp::reject::not_found())
                }
            }
        })
        .untuple_one()
}

fn with_store(
    store: SharedStore,
) -> impl Filter<Extract = (SharedStore,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn raw_query() -> impl Filter<Extract = (String,), Error = std::convert::Infallible> + Clone {
    warp::query::raw()
        .or(warp::any().map(String::new))
        .unify()
}

fn cors(client_origin: &str) -> warp::cors::Builder {
    warp::cors()
        .allow_origin(client_origin)
        .allow_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_headers(vec!["content-type"])
        .allow_credentials(true)
}

fn security_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-content-type-options", HeaderValue::from_static("nosniff"));
    headers.insert("x-frame-options", HeaderValue::from_static("SAMEORIGIN"));
    headers.insert("referrer-policy", HeaderValue::from_static("no-referrer"));
    headers.insert("x-dns-prefetch-control", HeaderValue::from_static("off"));
    headers
}
