//! Submission and search form state machines
//!
//! Each form moves `Idle -> Pending -> Resolved`. Local validation only gives
//! early feedback; the API re-validates every request.

use crate::client::api::GuestbookApi;
use crate::client::error::ClientError;
use crate::models::{Message, SearchResponse};
use crate::validation::{text_len, MESSAGE_MIN_LEN, NAME_MIN_LEN};

/// Visual weight of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

/// Transient toast shown after a request resolves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            variant: Variant::Default,
        }
    }

    fn error(title: &str, description: String) -> Self {
        Self {
            title: title.to_string(),
            description,
            variant: Variant::Destructive,
        }
    }
}

/// Inline validation messages for the submission form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.message.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmitState {
    #[default]
    Idle,
    Submitting,
    Submitted(Message),
    Failed(String),
}

/// "Leave a Message" form
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub name: String,
    pub message: String,
    errors: FieldErrors,
    state: SubmitState,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Error text for the inline error panel, if the last submit failed
    pub fn error_panel(&self) -> Option<&str> {
        match &self.state {
            SubmitState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Run local validation and record field errors
    pub fn validate(&mut self) -> bool {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.name = Some("Name is required");
        } else if text_len(name) < NAME_MIN_LEN {
            errors.name = Some("Name must be at least 2 characters");
        }

        let message = self.message.trim();
        if message.is_empty() {
            errors.message = Some("Message is required");
        } else if text_len(message) < MESSAGE_MIN_LEN {
            errors.message = Some("Message must be at least 5 characters");
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and enter the submitting state
    ///
    /// Returns the trimmed `(name, message)` to send, or `None` when the form
    /// is invalid or a submission is already in flight.
    pub fn begin(&mut self) -> Option<(String, String)> {
        if self.is_submitting() || !self.validate() {
            return None;
        }

        self.state = SubmitState::Submitting;
        Some((self.name.trim().to_string(), self.message.trim().to_string()))
    }

    /// Record the API outcome. Fields are cleared only on success.
    pub fn resolve(&mut self, result: Result<Message, ClientError>) -> Notification {
        match result {
            Ok(message) => {
                self.name.clear();
                self.message.clear();
                self.errors = FieldErrors::default();
                self.state = SubmitState::Submitted(message);
                Notification::success(
                    "Success!",
                    "Your message has been added to the guestbook.",
                )
            }
            Err(err) => {
                let text = err.user_message();
                self.state = SubmitState::Failed(text.clone());
                Notification::error("Error", text)
            }
        }
    }

    /// Validate, submit and resolve in one step
    ///
    /// Returns `None` when local validation stopped the request.
    pub async fn submit<A>(&mut self, api: &A) -> Option<Notification>
    where
        A: GuestbookApi + ?Sized,
    {
        let (name, message) = self.begin()?;
        let result = api.create_message(&name, &message).await;
        Some(self.resolve(result))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Found(Message),
    NotFound,
    Failed(String),
}

/// "Search Messages" form
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    term: String,
    error: Option<&'static str>,
    state: SearchState,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Editing the term clears the inline error
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.error = None;
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Whether the loading indicator should be shown
    pub fn is_loading(&self) -> bool {
        self.state == SearchState::Searching
    }

    pub fn error_panel(&self) -> Option<&str> {
        match &self.state {
            SearchState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Validate and enter the searching state; the previous result is dropped
    pub fn begin(&mut self) -> Option<String> {
        if self.is_loading() {
            return None;
        }

        let term = self.term.trim();
        if term.is_empty() {
            self.error = Some("Please enter a name to search");
            return None;
        }

        let term = term.to_string();
        self.error = None;
        self.state = SearchState::Searching;
        Some(term)
    }

    /// Record the API outcome. Only failures produce a notification.
    pub fn resolve(&mut self, result: Result<SearchResponse, ClientError>) -> Option<Notification> {
        match result {
            Ok(SearchResponse {
                found: true,
                message: Some(message),
            }) => {
                self.state = SearchState::Found(message);
                None
            }
            Ok(_) => {
                self.state = SearchState::NotFound;
                None
            }
            Err(err) => {
                let text = err.user_message();
                self.state = SearchState::Failed(text.clone());
                Some(Notification::error("Search Error", text))
            }
        }
    }

    /// Validate, search and resolve in one step
    ///
    /// When local validation stops the request the state is left untouched and
    /// [`SearchForm::error`] holds the reason.
    pub async fn search<A>(&mut self, api: &A) -> Option<Notification>
    where
        A: GuestbookApi + ?Sized,
    {
        let term = self.begin()?;
        let result = api.search(&term).await;
        self.resolve(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    fn message(name: &str, text: &str) -> Message {
        Message {
            id: Uuid::new_v4(),
            name: name.to_string(),
            message: text.to_string(),
            created_at: Utc::now(),
        }
    }

    // Records calls and replays canned responses
    #[derive(Default)]
    struct FakeApi {
        created: Mutex<Vec<(String, String)>>,
        searched: Mutex<Vec<String>>,
        fail_with: Option<u16>,
        stored: Option<Message>,
    }

    impl FakeApi {
        fn failing(status: u16) -> Self {
            Self {
                fail_with: Some(status),
                ..Self::default()
            }
        }

        fn api_error(&self) -> Option<ClientError> {
            self.fail_with.map(|status| ClientError::Api {
                status,
                error: "Internal server error".to_string(),
                details: Some("An unexpected error occurred".to_string()),
            })
        }
    }

    #[async_trait]
    impl GuestbookApi for FakeApi {
        async fn create_message(&self, name: &str, text: &str) -> Result<Message, ClientError> {
            self.created
                .lock()
                .unwrap()
                .push((name.to_string(), text.to_string()));
            match self.api_error() {
                Some(err) => Err(err),
                None => Ok(message(name, text)),
            }
        }

        async fn search(&self, name: &str) -> Result<SearchResponse, ClientError> {
            self.searched.lock().unwrap().push(name.to_string());
            match self.api_error() {
                Some(err) => Err(err),
                None => Ok(SearchResponse::from(self.stored.clone())),
            }
        }
    }

    #[test]
    fn test_submission_validation_messages() {
        let mut form = SubmissionForm::new();
        assert!(!form.validate());
        assert_eq!(form.errors().name, Some("Name is required"));
        assert_eq!(form.errors().message, Some("Message is required"));

        let mut form = SubmissionForm::with_values(" A ", "Hey");
        assert!(!form.validate());
        assert_eq!(form.errors().name, Some("Name must be at least 2 characters"));
        assert_eq!(form.errors().message, Some("Message must be at least 5 characters"));

        let mut form = SubmissionForm::with_values("Ada", "Hello world");
        assert!(form.validate());
        assert!(form.errors().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_submission_never_calls_api() {
        let api = FakeApi::default();
        let mut form = SubmissionForm::with_values("A", "Hello world");

        assert!(form.submit(&api).await.is_none());
        assert!(api.created.lock().unwrap().is_empty());
        assert_eq!(form.state(), &SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_successful_submission_clears_fields() {
        let api = FakeApi::default();
        let mut form = SubmissionForm::with_values("  Ada ", " Hello world ");

        let notification = form.submit(&api).await.unwrap();

        assert_eq!(notification.title, "Success!");
        assert_eq!(notification.variant, Variant::Default);
        assert_eq!(
            api.created.lock().unwrap().as_slice(),
            &[("Ada".to_string(), "Hello world".to_string())]
        );
        assert!(form.name.is_empty());
        assert!(form.message.is_empty());
        assert!(matches!(form.state(), SubmitState::Submitted(m) if m.name == "Ada"));
        assert!(form.error_panel().is_none());
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_fields() {
        let api = FakeApi::failing(500);
        let mut form = SubmissionForm::with_values("Ada", "Hello world");

        let notification = form.submit(&api).await.unwrap();

        assert_eq!(notification.title, "Error");
        assert_eq!(notification.variant, Variant::Destructive);
        assert_eq!(form.name, "Ada");
        assert_eq!(
            form.error_panel(),
            Some("Internal server error: An unexpected error occurred")
        );
    }

    #[test]
    fn test_begin_blocks_double_submit() {
        let mut form = SubmissionForm::with_values("Ada", "Hello world");
        assert!(form.begin().is_some());
        assert!(form.is_submitting());
        assert!(form.begin().is_none());
    }

    #[tokio::test]
    async fn test_empty_search_term() {
        let api = FakeApi::default();
        let mut form = SearchForm::new();
        form.set_term("   ");

        assert!(form.search(&api).await.is_none());
        assert_eq!(form.error(), Some("Please enter a name to search"));
        assert_eq!(form.state(), &SearchState::Idle);
        assert!(api.searched.lock().unwrap().is_empty());

        form.set_term("Ada");
        assert!(form.error().is_none());
    }

    #[tokio::test]
    async fn test_search_found() {
        let api = FakeApi {
            stored: Some(message("Ada", "Hello world")),
            ..FakeApi::default()
        };
        let mut form = SearchForm::new();
        form.set_term(" ada ");

        let notification = form.search(&api).await;

        assert!(notification.is_none());
        assert_eq!(api.searched.lock().unwrap().as_slice(), &["ada".to_string()]);
        assert!(matches!(form.state(), SearchState::Found(m) if m.name == "Ada"));
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_search_not_found() {
        let api = FakeApi::default();
        let mut form = SearchForm::new();
        form.set_term("Grace");

        assert!(form.search(&api).await.is_none());
        assert_eq!(form.state(), &SearchState::NotFound);
    }

    #[tokio::test]
    async fn test_search_failure_notifies() {
        let api = FakeApi::failing(500);
        let mut form = SearchForm::new();
        form.set_term("Grace");

        let notification = form.search(&api).await.unwrap();
        assert_eq!(notification.title, "Search Error");
        assert_eq!(notification.variant, Variant::Destructive);
        assert!(form.error_panel().is_some());
    }

    #[test]
    fn test_search_shows_loading_while_pending() {
        let mut form = SearchForm::new();
        form.set_term("Ada");
        assert_eq!(form.begin(), Some("Ada".to_string()));
        assert!(form.is_loading());

        form.resolve(Ok(SearchResponse::from(None)));
        assert!(!form.is_loading());
    }
}
