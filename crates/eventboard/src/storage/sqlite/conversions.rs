//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use uuid::Uuid;

use eventboard_core::events::{
    Category, Event, EventInstance, Occurrence, RecurrencePattern, Subscriber,
};
use eventboard_core::storage::RepositoryError;

fn conversion_error(err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

pub fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(conversion_error)
}

pub fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(conversion_error)
}

pub fn parse_time(s: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S").map_err(conversion_error)
}

pub fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(conversion_error)
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Serializes a recurrence pattern to its JSON column value.
pub fn pattern_to_json(pattern: &RecurrencePattern) -> Result<String, RepositoryError> {
    serde_json::to_string(pattern).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn json_to_pattern(json: &str) -> rusqlite::Result<RecurrencePattern> {
    serde_json::from_str(json).map_err(conversion_error)
}

/// Serializes the image URL list to its JSON column value.
pub fn images_to_json(images: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(images).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn json_to_images(json: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(json).map_err(conversion_error)
}

/// Convert a SQLite row to an Event.
///
/// Expected columns: id, title, slug, description, category, venue_name,
/// organizer_name, date, start_time, end_time, recurrence, is_featured,
/// is_approved, contact_whatsapp, contact_instagram, contact_link, images,
/// created_at, updated_at
pub fn row_to_event(row: &Row) -> rusqlite::Result<Event> {
    let id: String = row.get(0)?;
    let title: String = row.get(1)?;
    let slug: String = row.get(2)?;
    let description: Option<String> = row.get(3)?;
    let category: String = row.get(4)?;
    let venue_name: Option<String> = row.get(5)?;
    let organizer_name: Option<String> = row.get(6)?;
    let date: Option<String> = row.get(7)?;
    let start_time: String = row.get(8)?;
    let end_time: Option<String> = row.get(9)?;
    let recurrence: Option<String> = row.get(10)?;
    let is_featured: bool = row.get(11)?;
    let is_approved: bool = row.get(12)?;
    let contact_whatsapp: Option<String> = row.get(13)?;
    let contact_instagram: Option<String> = row.get(14)?;
    let contact_link: Option<String> = row.get(15)?;
    let images: String = row.get(16)?;
    let created_at: String = row.get(17)?;
    let updated_at: Option<String> = row.get(18)?;

    Ok(Event {
        id: parse_uuid(&id)?,
        title,
        slug,
        description,
        category: Category::parse(&category),
        venue_name,
        organizer_name,
        date: date.as_deref().map(parse_date).transpose()?,
        start_time: parse_time(&start_time)?,
        end_time: end_time.as_deref().map(parse_time).transpose()?,
        recurrence: recurrence.as_deref().map(json_to_pattern).transpose()?,
        is_featured,
        is_approved,
        contact_whatsapp,
        contact_instagram,
        contact_link,
        images: json_to_images(&images)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: updated_at.as_deref().map(parse_datetime).transpose()?,
    })
}

/// Convert a SQLite row to an Occurrence.
///
/// Expected columns: id, event_id, date, start_time, end_time, is_cancelled
pub fn row_to_occurrence(row: &Row) -> rusqlite::Result<Occurrence> {
    let id: String = row.get(0)?;
    let event_id: String = row.get(1)?;
    let date: String = row.get(2)?;
    let start_time: String = row.get(3)?;
    let end_time: Option<String> = row.get(4)?;
    let is_cancelled: bool = row.get(5)?;

    Ok(Occurrence {
        id: parse_uuid(&id)?,
        event_id: parse_uuid(&event_id)?,
        date: parse_date(&date)?,
        start_time: parse_time(&start_time)?,
        end_time: end_time.as_deref().map(parse_time).transpose()?,
        is_cancelled,
    })
}

/// Convert a joined occurrence/event row to an EventInstance.
///
/// Expected columns: o.id, e.id, e.title, e.slug, e.description, e.category,
/// e.venue_name, e.organizer_name, o.date, o.start_time, o.end_time,
/// e.is_featured, e.contact_whatsapp, e.contact_instagram, e.contact_link,
/// e.images
pub fn row_to_instance(row: &Row) -> rusqlite::Result<EventInstance> {
    let id: String = row.get(0)?;
    let event_id: String = row.get(1)?;
    let title: String = row.get(2)?;
    let slug: String = row.get(3)?;
    let description: Option<String> = row.get(4)?;
    let category: String = row.get(5)?;
    let venue_name: Option<String> = row.get(6)?;
    let organizer_name: Option<String> = row.get(7)?;
    let date: String = row.get(8)?;
    let start_time: String = row.get(9)?;
    let end_time: Option<String> = row.get(10)?;
    let is_featured: bool = row.get(11)?;
    let contact_whatsapp: Option<String> = row.get(12)?;
    let contact_instagram: Option<String> = row.get(13)?;
    let contact_link: Option<String> = row.get(14)?;
    let images: String = row.get(15)?;

    Ok(EventInstance {
        id: parse_uuid(&id)?,
        event_id: parse_uuid(&event_id)?,
        title,
        slug,
        description,
        category: Category::parse(&category),
        venue_name,
        organizer_name,
        date: parse_date(&date)?,
        start_time: parse_time(&start_time)?,
        end_time: end_time.as_deref().map(parse_time).transpose()?,
        is_featured,
        contact_whatsapp,
        contact_instagram,
        contact_link,
        images: json_to_images(&images)?,
    })
}

/// Convert a SQLite row to a Subscriber.
///
/// Expected columns: id, email, created_at
pub fn row_to_subscriber(row: &Row) -> rusqlite::Result<Subscriber> {
    let id: String = row.get(0)?;
    let email: String = row.get(1)?;
    let created_at: String = row.get(2)?;

    Ok(Subscriber {
        id: parse_uuid(&id)?,
        email,
        created_at: parse_datetime(&created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_and_time_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 23).unwrap();
        assert_eq!(parse_date(&format_date(&date)).unwrap(), date);

        let time = NaiveTime::from_hms_opt(7, 30, 0).unwrap();
        assert_eq!(parse_time(&format_time(&time)).unwrap(), time);
    }

    #[test]
    fn test_datetime_round_trip() {
        let dt = Utc::now();
        let parsed = parse_datetime(&format_datetime(&dt)).unwrap();
        assert_eq!(parsed.timestamp(), dt.timestamp());
    }

    #[test]
    fn test_parse_errors_are_conversion_failures() {
        assert!(parse_uuid("not-a-uuid").is_err());
        assert!(parse_date("2025-13-01").is_err());
        assert!(parse_time("25:00:00").is_err());
    }

    #[test]
    fn test_pattern_json_round_trip() {
        let pattern = RecurrencePattern::new(
            vec!["mon".to_string(), "wed".to_string()],
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        );
        let json = pattern_to_json(&pattern).unwrap();
        assert_eq!(json_to_pattern(&json).unwrap(), pattern);
    }

    #[test]
    fn test_images_json_round_trip() {
        let images = vec!["https://example.com/a.jpg".to_string()];
        let json = images_to_json(&images).unwrap();
        assert_eq!(json_to_images(&json).unwrap(), images);
        assert_eq!(json_to_images("[]").unwrap(), Vec::<String>::new());
    }
}
