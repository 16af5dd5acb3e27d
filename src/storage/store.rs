//! Storage seam for guestbook messages

use async_trait::async_trait;

use crate::models::{Message, NewMessage};
use crate::storage::error::Result;

/// Persistence operations the HTTP layer needs
///
/// Implementations own id and timestamp generation: `insert_message` returns
/// the stored row with `id` and `created_at` filled in.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert a new message and return the stored record
    async fn insert_message(&self, message: NewMessage) -> Result<Message>;

    /// Find the most recent message whose name equals `name`, ignoring case
    async fn find_latest_by_name(&self, name: &str) -> Result<Option<Message>>;
}
