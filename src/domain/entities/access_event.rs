//! Access event entity recorded on every successful redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single visit to a short URL.
///
/// Events reference their link by the short URL string, not by ownership.
/// They are append-only: never modified, only appended or removed in bulk
/// together with their link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEvent {
    pub short_url: String,
    pub ip: String,
    pub opened_date: DateTime<Utc>,
}

impl AccessEvent {
    /// Creates a new AccessEvent instance.
    pub fn new(short_url: String, ip: String, opened_date: DateTime<Utc>) -> Self {
        Self {
            short_url,
            ip,
            opened_date,
        }
    }
}

/// Input data for appending an access event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessEvent {
    pub short_url: String,
    pub ip: String,
    pub opened_date: DateTime<Utc>,
}

impl From<NewAccessEvent> for AccessEvent {
    fn from(ev: NewAccessEvent) -> Self {
        AccessEvent::new(ev.short_url, ev.ip, ev.opened_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_event_from_new() {
        let now = Utc::now();
        let event: AccessEvent = NewAccessEvent {
            short_url: "http://localhost:5000/abc".to_string(),
            ip: "10.0.0.1".to_string(),
            opened_date: now,
        }
        .into();

        assert_eq!(event.short_url, "http://localhost:5000/abc");
        assert_eq!(event.ip, "10.0.0.1");
        assert_eq!(event.opened_date, now);
    }

    #[test]
    fn test_access_event_json_shape() {
        let event = AccessEvent::new(
            "http://localhost:5000/abc".to_string(),
            "::1".to_string(),
            Utc::now(),
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["shortUrl"], "http://localhost:5000/abc");
        assert_eq!(json["ip"], "::1");
        assert!(json["openedDate"].is_string());
    }
}
