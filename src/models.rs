// Data structures (Message, request/response bodies)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Stored guestbook entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

// Validated, trimmed insert payload handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub message: String,
}

// Request Types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageRequest {
    pub name: String,
    pub message: String,
}

// Response Types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateMessageResponse {
    pub success: bool,
    pub message: Message,
}

impl CreateMessageResponse {
    pub fn created(message: Message) -> Self {
        Self {
            success: true,
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub found: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl From<Option<Message>> for SearchResponse {
    fn from(message: Option<Message>) -> Self {
        Self {
            found: message.is_some(),
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn ok(timestamp: DateTime<Utc>) -> Self {
        Self {
            status: "OK".to_string(),
            timestamp,
        }
    }
}

// Error body shared by every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub details: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_message() -> Message {
        Message {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            message: "Hello world".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 15, 4, 0).unwrap(),
        }
    }

    #[test]
    fn test_message_serialization() {
        let message = sample_message();
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["message"], "Hello world");
        assert_eq!(value["id"], message.id.to_string());
        assert_eq!(value["created_at"], "2025-01-05T15:04:00Z");
    }

    #[test]
    fn test_search_response_not_found_omits_message() {
        let response = SearchResponse::from(None);
        let serialized = serde_json::to_string(&response).unwrap();
        assert_eq!(serialized, r#"{"found":false}"#);
    }

    #[test]
    fn test_search_response_found() {
        let message = sample_message();
        let response = SearchResponse::from(Some(message.clone()));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["message"]["name"], "Ada");

        let deserialized: SearchResponse = serde_json::from_value(value).unwrap();
        assert_eq!(deserialized.message, Some(message));
    }

    #[test]
    fn test_create_message_response_serialization() {
        let response = CreateMessageResponse::created(sample_message());
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"]["message"], "Hello world");
    }

    #[test]
    fn test_health_response_serialization() {
        let timestamp = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let value = serde_json::to_value(HealthResponse::ok(timestamp)).unwrap();
        assert_eq!(value["status"], "OK");
        assert_eq!(value["timestamp"], "2025-06-01T12:00:00Z");
    }

    #[test]
    fn test_error_body_serialization() {
        let body = ErrorBody::new("Route not found", "The route GET /nope does not exist");
        let serialized = serde_json::to_string(&body).unwrap();
        assert_eq!(
            serialized,
            r#"{"error":"Route not found","details":"The route GET /nope does not exist"}"#
        );
    }
}
