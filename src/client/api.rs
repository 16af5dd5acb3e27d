//! HTTP client for the guestbook API

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::client::error::ClientError;
use crate::models::{
    CreateMessageRequest, CreateMessageResponse, ErrorBody, Message, SearchResponse,
};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Operations the forms need from the API
#[async_trait]
pub trait GuestbookApi: Send + Sync {
    /// POST /api/messages
    async fn create_message(&self, name: &str, message: &str) -> Result<Message, ClientError>;

    /// GET /api/messages?name=NAME
    async fn search(&self, name: &str) -> Result<SearchResponse, ClientError>;
}

/// reqwest-backed [`GuestbookApi`]
#[derive(Debug, Clone)]
pub struct HttpGuestbookClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpGuestbookClient {
    /// Create a client for the API at `base_url`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use guestbook::client::{GuestbookApi, HttpGuestbookClient};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = HttpGuestbookClient::new("http://localhost:3001");
    /// let stored = client.create_message("Ada", "Hello world").await?;
    /// let result = client.search("ada").await?;
    /// assert!(result.found);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn messages_url(&self) -> String {
        format!("{}/api/messages", self.base_url)
    }
}

#[async_trait]
impl GuestbookApi for HttpGuestbookClient {
    async fn create_message(&self, name: &str, message: &str) -> Result<Message, ClientError> {
        let request = CreateMessageRequest {
            name: name.to_string(),
            message: message.to_string(),
        };

        let response = self
            .http
            .post(self.messages_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let created: CreateMessageResponse = decode_response(status, &body)?;
        Ok(created.message)
    }

    async fn search(&self, name: &str) -> Result<SearchResponse, ClientError> {
        let response = self
            .http
            .get(self.messages_url())
            .query(&[("name", name)])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        decode_response(status, &body)
    }
}

/// Decode a response body, turning non-2xx statuses into [`ClientError::Api`]
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ClientError> {
    if !(200..300).contains(&status) {
        return Err(match serde_json::from_slice::<ErrorBody>(body) {
            Ok(err) => ClientError::Api {
                status,
                error: err.error,
                details: Some(err.details),
            },
            Err(_) => ClientError::Api {
                status,
                error: format!("Request failed with status {}", status),
                details: None,
            },
        });
    }

    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}
