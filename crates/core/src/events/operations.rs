use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use super::error::SubmitError;
use super::requests::SubmitEventRequest;
use super::types::Event;

/// Turns arbitrary text into a URL-safe slug.
///
/// Lowercases, collapses runs of non-alphanumeric characters to a single
/// dash, and trims leading/trailing dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_dash = true;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Builds an event slug: slugified title plus a short ID suffix for uniqueness.
pub fn make_slug(title: &str, id: Uuid) -> String {
    let base = slugify(title);
    let suffix = &id.simple().to_string()[..6];
    if base.is_empty() {
        suffix.to_string()
    } else {
        format!("{base}-{suffix}")
    }
}

/// Validates a submission against the listing rules.
///
/// `today` is the current date in the site's timezone; one-off events may
/// not be scheduled before it.
pub fn validate_submission(req: &SubmitEventRequest, today: NaiveDate) -> Result<(), SubmitError> {
    let title = req.title.trim();
    if title.len() < 2 {
        return Err(SubmitError::TitleTooShort);
    }
    if title.len() > 200 {
        return Err(SubmitError::TitleTooLong);
    }
    if req.venue_name.as_deref().map(str::trim).unwrap_or("").is_empty() {
        return Err(SubmitError::MissingVenue);
    }
    if req
        .organizer_name
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .is_empty()
    {
        return Err(SubmitError::MissingOrganizer);
    }

    if req.is_recurring {
        if req.recurrence_days.is_empty() {
            return Err(SubmitError::NoRecurrenceDays);
        }
    } else {
        match req.date {
            None => return Err(SubmitError::MissingDate),
            Some(date) if date < today => return Err(SubmitError::DateInPast),
            Some(_) => {}
        }
    }

    if let Some(end) = req.end_time {
        if end <= req.start_time {
            return Err(SubmitError::InvalidTimeRange);
        }
    }

    if let Some(link) = &req.contact_link {
        if !link.starts_with("http://") && !link.starts_with("https://") {
            return Err(SubmitError::InvalidContactLink(link.clone()));
        }
    }

    Ok(())
}

/// Returns true if an occurrence with these times is in progress at `now`.
///
/// A missing end time is treated as running through the end of the day.
pub fn is_happening_at(start_time: NaiveTime, end_time: Option<NaiveTime>, now: NaiveTime) -> bool {
    let end = end_time.unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"));
    start_time <= now && now <= end
}

/// Case-insensitive substring match over the searchable event fields
/// (title, description, venue, organizer).
pub fn matches_search(event: &Event, query: &str) -> bool {
    let needle = query.to_lowercase();
    let mut haystacks = vec![event.title.as_str()];
    haystacks.extend(event.description.as_deref());
    haystacks.extend(event.venue_name.as_deref());
    haystacks.extend(event.organizer_name.as_deref());
    haystacks
        .iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

/// Formats a date for digest headings, e.g. "Sunday, Feb 23".
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

/// Formats a time of day in 12-hour notation, e.g. "7:00 AM".
pub fn format_time_12h(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Formats a start/end pair as a display range, e.g. "7:00 AM - 8:00 AM".
pub fn time_range_label(start_time: NaiveTime, end_time: Option<NaiveTime>) -> String {
    match end_time {
        Some(end) => format!("{} - {}", format_time_12h(start_time), format_time_12h(end)),
        None => format_time_12h(start_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn valid_request() -> SubmitEventRequest {
        SubmitEventRequest {
            title: "Morning Yoga".to_string(),
            description: None,
            category: Category::Yoga,
            venue_name: Some("Casa Om".to_string()),
            organizer_name: Some("Luz".to_string()),
            date: Some(date(2025, 6, 2)),
            start_time: time(7, 0),
            end_time: Some(time(8, 30)),
            is_recurring: false,
            recurrence_days: Vec::new(),
            recurrence_until: None,
            contact_whatsapp: None,
            contact_instagram: None,
            contact_link: None,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Morning Yoga"), "morning-yoga");
        assert_eq!(slugify("  Full Moon -- Ceremony! "), "full-moon-ceremony");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_make_slug_appends_id_suffix() {
        let id = Uuid::parse_str("a1b2c3d4-0000-0000-0000-000000000000").unwrap();
        assert_eq!(make_slug("Morning Yoga", id), "morning-yoga-a1b2c3");
        assert_eq!(make_slug("???", id), "a1b2c3");
    }

    #[test]
    fn test_validate_submission_accepts_valid() {
        assert!(validate_submission(&valid_request(), date(2025, 6, 1)).is_ok());
    }

    #[test]
    fn test_validate_submission_title_bounds() {
        let mut req = valid_request();
        req.title = "x".to_string();
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::TitleTooShort)
        );

        req.title = "x".repeat(201);
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::TitleTooLong)
        );
    }

    #[test]
    fn test_validate_submission_requires_venue_and_organizer() {
        let mut req = valid_request();
        req.venue_name = Some("   ".to_string());
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::MissingVenue)
        );

        let mut req = valid_request();
        req.organizer_name = None;
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::MissingOrganizer)
        );
    }

    #[test]
    fn test_validate_submission_one_off_date_rules() {
        let mut req = valid_request();
        req.date = None;
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::MissingDate)
        );

        let mut req = valid_request();
        req.date = Some(date(2025, 5, 31));
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::DateInPast)
        );

        // Same-day submissions are allowed.
        let mut req = valid_request();
        req.date = Some(date(2025, 6, 1));
        assert!(validate_submission(&req, date(2025, 6, 1)).is_ok());
    }

    #[test]
    fn test_validate_submission_recurring_needs_days() {
        let mut req = valid_request();
        req.is_recurring = true;
        req.date = None;
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::NoRecurrenceDays)
        );

        req.recurrence_days = vec!["mon".to_string()];
        assert!(validate_submission(&req, date(2025, 6, 1)).is_ok());
    }

    #[test]
    fn test_validate_submission_time_range() {
        let mut req = valid_request();
        req.end_time = Some(time(6, 0));
        assert_eq!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::InvalidTimeRange)
        );
    }

    #[test]
    fn test_validate_submission_contact_link() {
        let mut req = valid_request();
        req.contact_link = Some("ftp://example.com".to_string());
        assert!(matches!(
            validate_submission(&req, date(2025, 6, 1)),
            Err(SubmitError::InvalidContactLink(_))
        ));

        req.contact_link = Some("https://example.com/tickets".to_string());
        assert!(validate_submission(&req, date(2025, 6, 1)).is_ok());
    }

    #[test]
    fn test_is_happening_at() {
        assert!(is_happening_at(time(7, 0), Some(time(9, 0)), time(8, 0)));
        assert!(is_happening_at(time(7, 0), Some(time(9, 0)), time(7, 0)));
        assert!(is_happening_at(time(7, 0), Some(time(9, 0)), time(9, 0)));
        assert!(!is_happening_at(time(7, 0), Some(time(9, 0)), time(9, 1)));
        // Open-ended occurrences run through the end of the day.
        assert!(is_happening_at(time(20, 0), None, time(23, 30)));
        assert!(!is_happening_at(time(20, 0), None, time(19, 59)));
    }

    #[test]
    fn test_matches_search() {
        let event = Event::one_off("Full Moon Ceremony", Category::Ceremony, date(2025, 3, 14), time(20, 0))
            .with_venue("Punta Cometa")
            .with_organizer("Sol Collective");

        assert!(matches_search(&event, "moon"));
        assert!(matches_search(&event, "COMETA"));
        assert!(matches_search(&event, "sol"));
        assert!(!matches_search(&event, "yoga"));
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(format_date_label(date(2025, 2, 23)), "Sunday, Feb 23");
        assert_eq!(format_time_12h(time(7, 0)), "7:00 AM");
        assert_eq!(format_time_12h(time(14, 30)), "2:30 PM");
        assert_eq!(format_time_12h(time(0, 15)), "12:15 AM");
        assert_eq!(
            time_range_label(time(7, 0), Some(time(8, 0))),
            "7:00 AM - 8:00 AM"
        );
        assert_eq!(time_range_label(time(7, 0), None), "7:00 AM");
    }
}
