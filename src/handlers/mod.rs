// Handlers module

pub mod create_message;
pub mod health;
pub mod rejection;
pub mod search_messages;

pub use create_message::create_message_handler;
pub use health::health_handler;
pub use rejection::{handle_rejection, route_not_found};
pub use search_messages::search_messages_handler;

use crate::error::ApiError;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use warp::reply::{Json, WithStatus};

/// Top-level boundary around a handler body
///
/// Errors become their JSON reply; a panic inside the handler is logged and
/// answered with the generic 500 body instead of dropping the connection.
pub(crate) async fn guarded<F>(route: &'static str, handler: F) -> WithStatus<Json>
where
    F: Future<Output = Result<WithStatus<Json>, ApiError>>,
{
    match AssertUnwindSafe(handler).catch_unwind().await {
        Ok(Ok(reply)) => reply,
        Ok(Err(err)) => err.into_reply(),
        Err(_) => {
            tracing::error!(route, "handler panicked");
            ApiError::Internal(format!("{} panicked", route)).into_reply()
        }
    }
}
