//! API request types for event operations.
//!
//! Shared between the server and the CLI client for type-safe API calls.
//! Pure data, no I/O.

use chrono::{NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::serde::{deserialize_optional_date, deserialize_optional_string};

use super::types::{Category, Event, RecurrencePattern};

/// End date applied when a recurring submission omits one.
const DEFAULT_RECURRENCE_UNTIL: (i32, u32, u32) = (2026, 12, 31);

/// Payload for submitting a new event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitEventRequest {
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub venue_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub organizer_name: Option<String>,
    /// Required for one-off events, ignored for recurring ones.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_days: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub recurrence_until: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub contact_whatsapp: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub contact_instagram: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub contact_link: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl SubmitEventRequest {
    /// Converts a validated submission into an unapproved event.
    pub fn into_event(self) -> Event {
        let mut event = if self.is_recurring {
            let (y, m, d) = DEFAULT_RECURRENCE_UNTIL;
            let until = self
                .recurrence_until
                .unwrap_or_else(|| NaiveDate::from_ymd_opt(y, m, d).expect("valid default date"));
            Event::recurring(
                self.title,
                self.category,
                RecurrencePattern::new(self.recurrence_days, until),
                self.start_time,
            )
        } else {
            // validate_submission guarantees the date is present.
            let date = self.date.expect("one-off submission carries a date");
            Event::one_off(self.title, self.category, date, self.start_time)
        };

        event.description = self.description;
        event.venue_name = self.venue_name;
        event.organizer_name = self.organizer_name;
        event.end_time = self.end_time;
        event.contact_whatsapp = self.contact_whatsapp;
        event.contact_instagram = self.contact_instagram;
        event.contact_link = self.contact_link;
        event.images = self.images;
        event
    }
}

/// Partial update applied by an admin to a moderated event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_link: Option<String>,
}

impl UpdateEventRequest {
    /// Applies the present fields to an event, stamping `updated_at`.
    pub fn apply_to(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = Some(description);
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(venue_name) = self.venue_name {
            event.venue_name = Some(venue_name);
        }
        if let Some(organizer_name) = self.organizer_name {
            event.organizer_name = Some(organizer_name);
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = Some(end_time);
        }
        if let Some(is_featured) = self.is_featured {
            event.is_featured = is_featured;
        }
        if let Some(contact_whatsapp) = self.contact_whatsapp {
            event.contact_whatsapp = Some(contact_whatsapp);
        }
        if let Some(contact_instagram) = self.contact_instagram {
            event.contact_instagram = Some(contact_instagram);
        }
        if let Some(contact_link) = self.contact_link {
            event.contact_link = Some(contact_link);
        }
        event.updated_at = Some(Utc::now());
    }
}

/// Payload for subscribing to the weekly digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::Category;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_submit_request_minimal_json() {
        let json = r#"{
            "title": "Morning Yoga",
            "category": "yoga",
            "venue_name": "Casa Om",
            "organizer_name": "Luz",
            "date": "2025-06-02",
            "start_time": "07:00:00"
        }"#;
        let req: SubmitEventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.title, "Morning Yoga");
        assert_eq!(req.category, Category::Yoga);
        assert!(!req.is_recurring);
        assert!(req.recurrence_days.is_empty());
        assert!(req.images.is_empty());
    }

    #[test]
    fn test_submit_request_empty_strings_become_none() {
        let json = r#"{
            "title": "Concert",
            "category": "music",
            "venue_name": "El Faro",
            "organizer_name": "Sol",
            "date": "2025-06-02",
            "start_time": "20:00:00",
            "description": "",
            "contact_whatsapp": "   "
        }"#;
        let req: SubmitEventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.description, None);
        assert_eq!(req.contact_whatsapp, None);
    }

    #[test]
    fn test_into_event_one_off() {
        let json = r#"{
            "title": "Concert",
            "category": "music",
            "venue_name": "El Faro",
            "organizer_name": "Sol",
            "date": "2025-06-02",
            "start_time": "20:00:00",
            "end_time": "22:00:00"
        }"#;
        let req: SubmitEventRequest = serde_json::from_str(json).unwrap();
        let event = req.into_event();

        assert_eq!(event.date, Some(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()));
        assert_eq!(event.end_time, Some(time(22, 0)));
        assert_eq!(event.venue_name, Some("El Faro".to_string()));
        assert!(!event.is_recurring());
        assert!(!event.is_approved);
    }

    #[test]
    fn test_into_event_recurring_defaults_until() {
        let json = r#"{
            "title": "Morning Yoga",
            "category": "yoga",
            "venue_name": "Casa Om",
            "organizer_name": "Luz",
            "start_time": "07:00:00",
            "is_recurring": true,
            "recurrence_days": ["mon", "wed"]
        }"#;
        let req: SubmitEventRequest = serde_json::from_str(json).unwrap();
        let event = req.into_event();

        let pattern = event.recurrence.as_ref().unwrap();
        assert_eq!(pattern.days, vec!["mon".to_string(), "wed".to_string()]);
        assert_eq!(pattern.until, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        assert_eq!(event.date, None);
    }

    #[test]
    fn test_update_request_applies_partial_fields() {
        let mut event = Event::one_off(
            "Concert",
            Category::Music,
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            time(20, 0),
        );
        assert!(event.updated_at.is_none());

        let update = UpdateEventRequest {
            title: Some("Sunset Concert".to_string()),
            is_featured: Some(true),
            ..Default::default()
        };
        update.apply_to(&mut event);

        assert_eq!(event.title, "Sunset Concert");
        assert!(event.is_featured);
        assert_eq!(event.category, Category::Music);
        assert!(event.updated_at.is_some());
    }
}
