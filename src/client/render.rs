//! Plain-text rendering of messages, panels and notifications

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use crate::client::forms::{Notification, SearchForm, SearchState, Variant};
use crate::models::Message;

/// Format like `January 5, 2025 at 03:04 PM`
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// Message card: author and date on the first line, text below
pub fn render_message_card<Tz>(message: &Message, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let created_at = message.created_at.with_timezone(tz);
    let mut card = format!("┌ {}  ·  {}\n", message.name, format_timestamp(&created_at));
    for line in message.message.lines() {
        card.push_str("│ ");
        card.push_str(line);
        card.push('\n');
    }
    card.push('└');
    card
}

pub fn render_not_found() -> String {
    "Person not found\nNo messages found for that name. Try searching for someone else!"
        .to_string()
}

pub fn render_error_panel(message: &str) -> String {
    format!("Error\n{}", message)
}

pub fn render_notification(notification: &Notification) -> String {
    let marker = match notification.variant {
        Variant::Default => "✓",
        Variant::Destructive => "✗",
    };
    format!("{} {}: {}", marker, notification.title, notification.description)
}

/// Result area below the search form, if there is anything to show
pub fn render_search_result<Tz>(form: &SearchForm, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match form.state() {
        SearchState::Idle => None,
        SearchState::Searching => Some("Searching...".to_string()),
        SearchState::Found(message) => Some(render_message_card(message, tz)),
        SearchState::NotFound => Some(render_not_found()),
        SearchState::Failed(err) => Some(render_error_panel(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use uuid::Uuid;

    fn sample() -> Message {
        Message {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            message: "Hello world\nSecond line".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 15, 4, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_timestamp() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 5, 15, 4, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "January 5, 2025 at 03:04 PM");

        let morning = Utc.with_ymd_and_hms(2024, 11, 21, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&morning), "November 21, 2024 at 09:30 AM");
    }

    #[test]
    fn test_message_card() {
        let card = render_message_card(&sample(), &Utc);
        assert_eq!(
            card,
            "┌ Ada  ·  January 5, 2025 at 03:04 PM\n│ Hello world\n│ Second line\n└"
        );
    }

    #[test]
    fn test_message_card_uses_timezone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let card = render_message_card(&sample(), &tz);
        assert!(card.contains("January 5, 2025 at 05:04 PM"));
    }

    #[test]
    fn test_notification() {
        let notification = Notification {
            title: "Search Error".to_string(),
            description: "Request failed".to_string(),
            variant: Variant::Destructive,
        };
        assert_eq!(render_notification(&notification), "✗ Search Error: Request failed");
    }

    #[test]
    fn test_search_result_states() {
        let mut form = SearchForm::new();
        assert!(render_search_result(&form, &Utc).is_none());

        form.set_term("Grace");
        form.begin();
        assert_eq!(render_search_result(&form, &Utc).as_deref(), Some("Searching..."));

        form.resolve(Ok(crate::models::SearchResponse::from(None)));
        assert!(render_search_result(&form, &Utc)
            .unwrap()
            .starts_with("Person not found"));
    }
}
