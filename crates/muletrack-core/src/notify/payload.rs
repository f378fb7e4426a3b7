//! Payload rendering for emitted notifications
//!
//! Two wire shapes share one JSON envelope: a human-readable chat message
//! for Discord-style webhook destinations, and a structured object for
//! everything else (the backend API).

use serde::Serialize;

use crate::error::Result;
use crate::models::Notification;

/// Content type of every rendered payload
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// URL substring selecting the chat-webhook payload shape
const DISCORD_WEBHOOK_MARKER: &str = "discord.com/api/webhooks";

// Chat-webhook payload
#[derive(Debug, Serialize)]
struct WebhookPayload {
    content: String,
}

// Structured payload for the backend
#[derive(Debug, Serialize)]
struct BalancePayload<'a> {
    rsn: &'a str,
    #[serde(rename = "totalCoins")]
    total_coins: u64,
    timestamp: String,
}

/// Render a notification into the JSON body for the given destination
///
/// A destination containing `discord.com/api/webhooks` gets the templated
/// chat message; every other URL gets the structured shape. Pure with
/// respect to the inputs; serialization of these shapes cannot fail in
/// practice.
pub fn render(endpoint_url: &str, notification: &Notification) -> Result<String> {
    let timestamp = notification.timestamp.to_rfc3339();

    let body = if endpoint_url.contains(DISCORD_WEBHOOK_MARKER) {
        let content = format!(
            "**Mule Balance Update**\n`{}` now has **{}** gp (inv + bank)\n`{}`",
            notification.identity,
            thousands(notification.total_coins),
            timestamp
        );
        serde_json::to_string(&WebhookPayload { content })?
    } else {
        serde_json::to_string(&BalancePayload {
            rsn: &notification.identity,
            total_coins: notification.total_coins,
            timestamp,
        })?
    };

    Ok(body)
}

/// Thousands-separated decimal rendering, e.g. 2500000 -> "2,500,000"
fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn notification(total_coins: u64) -> Notification {
        Notification {
            identity: "Mule1".to_string(),
            total_coins,
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(2_500_000), "2,500,000");
        assert_eq!(thousands(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn discord_url_selects_the_webhook_shape() {
        let body = render(
            "https://discord.com/api/webhooks/1234/token",
            &notification(2_500_000),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        let content = value["content"].as_str().unwrap();

        assert!(content.contains("`Mule1`"));
        assert!(content.contains("**2,500,000** gp"));
        assert!(content.contains("2025-06-01T12:00:00+00:00"));
        assert!(value.get("rsn").is_none());
    }

    #[test]
    fn other_urls_get_the_structured_shape() {
        let body = render("https://api.example.com/balance", &notification(42)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["rsn"], "Mule1");
        assert_eq!(value["totalCoins"], 42);
        assert_eq!(value["timestamp"], "2025-06-01T12:00:00+00:00");
    }

    #[test]
    fn large_totals_survive_the_round_trip_exactly() {
        let total = u64::MAX;
        let body = render("https://api.example.com/balance", &notification(total)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(value["totalCoins"].as_u64(), Some(total));
    }
}
