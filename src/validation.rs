//! Input validation shared by the HTTP handlers
//!
//! Rules run in a fixed order and the first failure wins, so each bad
//! request maps to exactly one error body.

use serde_json::Value;
use thiserror::Error;

use crate::models::NewMessage;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 100;
pub const MESSAGE_MIN_LEN: usize = 5;
pub const MESSAGE_MAX_LEN: usize = 1000;
pub const SEARCH_MIN_LEN: usize = 2;

/// A rejected client input, rendered as a 400 response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name and message are required")]
    MissingFields,

    #[error("Invalid data types")]
    InvalidTypes,

    #[error("Invalid name length")]
    NameLength,

    #[error("Invalid message length")]
    MessageLength,

    #[error("Name parameter is required")]
    MissingSearchName,

    #[error("Invalid name parameter")]
    InvalidSearchName,

    #[error("Name too short")]
    SearchNameTooShort,
}

impl ValidationError {
    /// Machine-readable error code sent as `error`
    pub fn error(&self) -> String {
        self.to_string()
    }

    /// Human-readable explanation sent as `details`
    pub fn details(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => {
                "Both name and message fields must be provided and cannot be empty"
            }
            ValidationError::InvalidTypes => "Name and message must be strings",
            ValidationError::NameLength => "Name must be between 2 and 100 characters",
            ValidationError::MessageLength => "Message must be between 5 and 1000 characters",
            ValidationError::MissingSearchName => "Please provide a name to search for",
            ValidationError::InvalidSearchName => "Name must be a string",
            ValidationError::SearchNameTooShort => "Search name must be at least 2 characters",
        }
    }
}

/// Length in UTF-16 code units, the unit browsers count in
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

// Absent, null, false, zero and "" all carry no value
fn is_missing(field: Option<&Value>) -> bool {
    match field {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Split a form or query key into its field name and whether it uses
/// bracket syntax (`name[]`, `name[first]`), which nests the value
pub fn split_field_key(key: &str) -> (&str, bool) {
    match key.find('[') {
        Some(idx) if idx > 0 && key.ends_with(']') => (&key[..idx], true),
        _ => (key, false),
    }
}

/// Validate a create-message body and return the trimmed insert payload
///
/// `body` is any JSON value; non-objects simply have no fields.
pub fn validate_new_message(body: &Value) -> Result<NewMessage, ValidationError> {
    let name = body.get("name");
    let message = body.get("message");

    if is_missing(name) || is_missing(message) {
        return Err(ValidationError::MissingFields);
    }

    let (Some(Value::String(name)), Some(Value::String(message))) = (name, message) else {
        return Err(ValidationError::InvalidTypes);
    };

    let name = name.trim();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&text_len(name)) {
        return Err(ValidationError::NameLength);
    }

    let message = message.trim();
    if !(MESSAGE_MIN_LEN..=MESSAGE_MAX_LEN).contains(&text_len(message)) {
        return Err(ValidationError::MessageLength);
    }

    Ok(NewMessage {
        name: name.to_string(),
        message: message.to_string(),
    })
}

/// Validate the `name` query values and return the trimmed search term
///
/// A repeated parameter arrives as several values and is treated like a
/// non-string value.
pub fn validate_search_name(values: &[String]) -> Result<String, ValidationError> {
    let name = match values {
        [] => return Err(ValidationError::MissingSearchName),
        [name] => name,
        _ => return Err(ValidationError::InvalidSearchName),
    };

    if name.is_empty() {
        return Err(ValidationError::MissingSearchName);
    }

    let name = name.trim();
    if text_len(name) < SEARCH_MIN_LEN {
        return Err(ValidationError::SearchNameTooShort);
    }

    Ok(name.to_string())
}
