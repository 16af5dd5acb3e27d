// POST /api/messages handler

use crate::error::ApiError;
use crate::handlers::guarded;
use crate::models::CreateMessageResponse;
use crate::routes::SharedStore;
use crate::storage::MessageStore;
use crate::validation::{split_field_key, validate_new_message};
use bytes::Bytes;
use serde_json::map::Entry;
use serde_json::{Map, Value};
use std::convert::Infallible;
use warp::http::StatusCode;

pub async fn create_message_handler(
    store: SharedStore,
    content_type: Option<String>,
    body: Bytes,
) -> Result<impl warp::Reply, Infallible> {
    Ok(guarded("POST /api/messages", async move {
        let response = create_message(store.as_ref(), content_type.as_deref(), &body).await?;
        Ok(warp::reply::with_status(
            warp::reply::json(&response),
            StatusCode::CREATED,
        ))
    })
    .await)
}

async fn create_message(
    store: &dyn MessageStore,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<CreateMessageResponse, ApiError> {
    let body = if is_form(content_type) {
        parse_form(body)?
    } else {
        parse_body(body)?
    };
    let new_message = validate_new_message(&body)?;

    let stored = store
        .insert_message(new_message)
        .await
        .map_err(ApiError::SaveFailed)?;

    tracing::info!(id = %stored.id, "message created");
    Ok(CreateMessageResponse::created(stored))
}

// An empty body carries no fields, the same as `{}`
fn parse_body(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

fn is_form(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// Decode a urlencoded body into the same shape a JSON body has
///
/// A repeated key or a bracketed key (`name[]`) becomes an array, so it
/// fails validation as a non-string value.
fn parse_form(body: &[u8]) -> Result<Value, ApiError> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_bytes(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let mut fields = Map::new();
    for (key, value) in pairs {
        let (field, nested) = split_field_key(&key);
        let value = Value::String(value);

        match fields.entry(field) {
            Entry::Vacant(entry) => {
                entry.insert(if nested {
                    Value::Array(vec![value])
                } else {
                    value
                });
            }
            Entry::Occupied(mut entry) => {
                let mut items = match entry.get_mut().take() {
                    Value::Array(items) => items,
                    other => vec![other],
                };
                items.push(value);
                entry.insert(Value::Array(items));
            }
        }
    }

    Ok(Value::Object(fields))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_body() {
        assert_eq!(parse_body(b"").unwrap(), serde_json::json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_parse_invalid_body() {
        let err = parse_body(b"{name: Ada").unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[test]
    fn test_form_content_type() {
        assert!(is_form(Some("application/x-www-form-urlencoded")));
        assert!(is_form(Some("Application/X-WWW-Form-Urlencoded; charset=UTF-8")));
        assert!(!is_form(Some("application/json")));
        assert!(!is_form(None));
    }

    #[test]
    fn test_parse_form_body() {
        let value = parse_form(b"name=Ada&message=Hello+world%21").unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Ada", "message": "Hello world!" }));
    }

    #[test]
    fn test_parse_form_repeated_and_bracketed_keys() {
        let value = parse_form(b"name=Ada&name=Grace&message[]=Hello+world").unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "name": ["Ada", "Grace"], "message": ["Hello world"] })
        );
        assert_eq!(
            validate_new_message(&value),
            Err(crate::validation::ValidationError::InvalidTypes)
        );
    }

    #[test]
    fn test_parse_json_body() {
        let value = parse_body(br#"{"name":"Ada","message":"Hello world"}"#).unwrap();
        assert_eq!(value["name"], "Ada");
    }
}
