//! Guestbook client: typed API access, form state machines and rendering
//!
//! ```no_run
//! use guestbook::client::{HttpGuestbookClient, SubmissionForm};
//!
//! # async fn example() {
//! let api = HttpGuestbookClient::new("http://localhost:3001");
//! let mut form = SubmissionForm::with_values("Ada", "Hello world");
//! if let Some(notification) = form.submit(&api).await {
//!     println!("{}", notification.description);
//! }
//! # }
//! ```

pub mod api;
pub mod error;
pub mod forms;
pub mod render;

pub use api::{GuestbookApi, HttpGuestbookClient, DEFAULT_API_URL};
pub use error::ClientError;
pub use forms::{
    FieldErrors, Notification, SearchForm, SearchState, SubmissionForm, SubmitState, Variant,
};
