use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operations::make_slug;
use super::recurrence::parse_weekday_tag;

/// Listing category for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Yoga,
    Music,
    Ceremony,
    Food,
    Wellness,
    Community,
    Market,
    #[default]
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 8] = [
        Category::Yoga,
        Category::Music,
        Category::Ceremony,
        Category::Food,
        Category::Wellness,
        Category::Community,
        Category::Market,
        Category::Other,
    ];

    /// The lowercase slug used in storage and the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Yoga => "yoga",
            Category::Music => "music",
            Category::Ceremony => "ceremony",
            Category::Food => "food",
            Category::Wellness => "wellness",
            Category::Community => "community",
            Category::Market => "market",
            Category::Other => "other",
        }
    }

    /// Parses a category slug, falling back to `Other` for unknown values.
    pub fn parse(slug: &str) -> Self {
        match slug.trim().to_ascii_lowercase().as_str() {
            "yoga" => Category::Yoga,
            "music" => Category::Music,
            "ceremony" => Category::Ceremony,
            "food" => Category::Food,
            "wellness" => Category::Wellness,
            "community" => Category::Community,
            "market" => Category::Market,
            _ => Category::Other,
        }
    }

    /// Human-readable label for digests and pretty output.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Yoga => "Yoga",
            Category::Music => "Music",
            Category::Ceremony => "Ceremony",
            Category::Food => "Food",
            Category::Wellness => "Wellness",
            Category::Community => "Community",
            Category::Market => "Market",
            Category::Other => "Other",
        }
    }

    /// Emoji shown next to the category in the digest email.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Yoga => "\u{1F9D8}",
            Category::Music => "\u{1F3B5}",
            Category::Ceremony => "\u{1F52E}",
            Category::Food => "\u{1F37D}\u{FE0F}",
            Category::Wellness => "\u{1F486}",
            Category::Community => "\u{1F33F}",
            Category::Market => "\u{1F6CD}\u{FE0F}",
            Category::Other => "\u{2726}",
        }
    }
}

/// A weekly repetition rule: weekday tags plus an inclusive end date.
///
/// Tags use the three-letter vocabulary (`sun` through `sat`),
/// case-insensitive. Unrecognized tags are tolerated here and simply never
/// match during expansion; submission validation rejects patterns with no
/// recognized day up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePattern {
    pub days: Vec<String>,
    pub until: NaiveDate,
}

impl RecurrencePattern {
    /// Creates a pattern from weekday tags and an inclusive end date.
    pub fn new(days: Vec<String>, until: NaiveDate) -> Self {
        Self { days, until }
    }

    /// The set of weekdays the pattern matches, dropping unrecognized tags.
    pub fn target_weekdays(&self) -> HashSet<Weekday> {
        self.days
            .iter()
            .filter_map(|tag| parse_weekday_tag(tag))
            .collect()
    }
}

/// A community event as submitted and moderated.
///
/// One-off events carry a `date`; recurring events carry a `recurrence`
/// pattern instead. Either way the dated rows the listings are built from
/// are [`Occurrence`] records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Category,
    pub venue_name: Option<String>,
    pub organizer_name: Option<String>,
    /// Date of a one-off event. `None` for recurring events.
    pub date: Option<NaiveDate>,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub recurrence: Option<RecurrencePattern>,
    pub is_featured: bool,
    pub is_approved: bool,
    pub contact_whatsapp: Option<String>,
    pub contact_instagram: Option<String>,
    pub contact_link: Option<String>,
    /// Image URLs uploaded alongside the submission.
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    fn base(title: String, category: Category, start_time: NaiveTime) -> Self {
        let id = Uuid::new_v4();
        let slug = make_slug(&title, id);
        Self {
            id,
            title,
            slug,
            description: None,
            category,
            venue_name: None,
            organizer_name: None,
            date: None,
            start_time,
            end_time: None,
            recurrence: None,
            is_featured: false,
            is_approved: false,
            contact_whatsapp: None,
            contact_instagram: None,
            contact_link: None,
            images: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Creates a one-off event on a single date.
    pub fn one_off(
        title: impl Into<String>,
        category: Category,
        date: NaiveDate,
        start_time: NaiveTime,
    ) -> Self {
        let mut event = Self::base(title.into(), category, start_time);
        event.date = Some(date);
        event
    }

    /// Creates a recurring event from a weekly pattern.
    pub fn recurring(
        title: impl Into<String>,
        category: Category,
        pattern: RecurrencePattern,
        start_time: NaiveTime,
    ) -> Self {
        let mut event = Self::base(title.into(), category, start_time);
        event.recurrence = Some(pattern);
        event
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the venue name.
    pub fn with_venue(mut self, venue_name: impl Into<String>) -> Self {
        self.venue_name = Some(venue_name.into());
        self
    }

    /// Sets the organizer name.
    pub fn with_organizer(mut self, organizer_name: impl Into<String>) -> Self {
        self.organizer_name = Some(organizer_name.into());
        self
    }

    /// Sets the end time.
    pub fn with_end_time(mut self, end_time: NaiveTime) -> Self {
        self.end_time = Some(end_time);
        self
    }

    /// Sets a specific ID, recomputing the slug to match (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self.slug = make_slug(&self.title, id);
        self
    }

    /// Returns true if this event repeats weekly.
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }
}

/// One concrete, dated instance of an event.
///
/// Occurrences are generated in bulk when a recurring event is approved and
/// are never rewritten by the expander afterwards; cancellation is a
/// separate moderation action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: Uuid,
    pub event_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub is_cancelled: bool,
}

impl Occurrence {
    /// Creates a new occurrence, not cancelled.
    pub fn new(
        event_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: Option<NaiveTime>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            date,
            start_time,
            end_time,
            is_cancelled: false,
        }
    }

    /// Sets a specific ID (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A flattened occurrence-with-event projection used by the listing queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventInstance {
    /// The occurrence ID.
    pub id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Category,
    pub venue_name: Option<String>,
    pub organizer_name: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: Option<NaiveTime>,
    pub is_featured: bool,
    pub contact_whatsapp: Option<String>,
    pub contact_instagram: Option<String>,
    pub contact_link: Option<String>,
    pub images: Vec<String>,
}

impl EventInstance {
    /// Joins an occurrence with its owning event.
    pub fn from_parts(occurrence: &Occurrence, event: &Event) -> Self {
        Self {
            id: occurrence.id,
            event_id: event.id,
            title: event.title.clone(),
            slug: event.slug.clone(),
            description: event.description.clone(),
            category: event.category,
            venue_name: event.venue_name.clone(),
            organizer_name: event.organizer_name.clone(),
            date: occurrence.date,
            start_time: occurrence.start_time,
            end_time: occurrence.end_time,
            is_featured: event.is_featured,
            contact_whatsapp: event.contact_whatsapp.clone(),
            contact_instagram: event.contact_instagram.clone(),
            contact_link: event.contact_link.clone(),
            images: event.images.clone(),
        }
    }
}

/// A digest subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Subscriber {
    /// Creates a subscriber, normalizing the email to lowercase.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into().trim().to_lowercase(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.as_str()), category);
        }
        assert_eq!(Category::parse("YOGA"), Category::Yoga);
        assert_eq!(Category::parse("unknown"), Category::Other);
    }

    #[test]
    fn test_category_serde_uses_lowercase() {
        let json = serde_json::to_string(&Category::Ceremony).unwrap();
        assert_eq!(json, "\"ceremony\"");
        let parsed: Category = serde_json::from_str("\"market\"").unwrap();
        assert_eq!(parsed, Category::Market);
    }

    #[test]
    fn test_pattern_target_weekdays_ignores_unknown_tags() {
        let pattern = RecurrencePattern::new(
            vec!["mon".into(), "WED".into(), "someday".into()],
            date(2025, 12, 31),
        );
        let targets = pattern.target_weekdays();
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&Weekday::Mon));
        assert!(targets.contains(&Weekday::Wed));
    }

    #[test]
    fn test_event_builder_one_off() {
        let event = Event::one_off("Beach Cleanup", Category::Community, date(2025, 3, 1), time(9, 0))
            .with_venue("Playa Principal")
            .with_organizer("Ana")
            .with_end_time(time(11, 0));

        assert_eq!(event.date, Some(date(2025, 3, 1)));
        assert!(!event.is_recurring());
        assert!(!event.is_approved);
        assert!(!event.is_featured);
        assert_eq!(event.venue_name, Some("Playa Principal".to_string()));
        assert_eq!(event.end_time, Some(time(11, 0)));
        assert!(event.slug.starts_with("beach-cleanup-"));
    }

    #[test]
    fn test_event_builder_recurring() {
        let pattern = RecurrencePattern::new(vec!["tue".into()], date(2025, 6, 30));
        let event = Event::recurring("Morning Yoga", Category::Yoga, pattern, time(7, 0));

        assert!(event.is_recurring());
        assert_eq!(event.date, None);
    }

    #[test]
    fn test_occurrence_defaults_to_not_cancelled() {
        let occurrence = Occurrence::new(Uuid::new_v4(), date(2025, 1, 1), time(7, 0), None);
        assert!(!occurrence.is_cancelled);
    }

    #[test]
    fn test_instance_from_parts() {
        let event = Event::one_off("Concert", Category::Music, date(2025, 5, 5), time(20, 0))
            .with_venue("El Faro");
        let occurrence = Occurrence::new(event.id, date(2025, 5, 5), time(20, 0), None);
        let instance = EventInstance::from_parts(&occurrence, &event);

        assert_eq!(instance.id, occurrence.id);
        assert_eq!(instance.event_id, event.id);
        assert_eq!(instance.title, "Concert");
        assert_eq!(instance.venue_name, Some("El Faro".to_string()));
        assert_eq!(instance.date, date(2025, 5, 5));
    }

    #[test]
    fn test_subscriber_normalizes_email() {
        let subscriber = Subscriber::new("  Ana@Example.COM ");
        assert_eq!(subscriber.email, "ana@example.com");
    }
}
