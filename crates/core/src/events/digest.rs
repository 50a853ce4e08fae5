//! Weekly digest composition.
//!
//! Pure grouping and formatting of upcoming event instances into the shape
//! the digest email template renders. Sending is the server's concern.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::operations::{format_date_label, time_range_label};
use super::types::EventInstance;

/// One event line within a digest day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestItem {
    pub title: String,
    pub slug: String,
    /// Display time, e.g. "7:00 AM - 8:00 AM".
    pub time_label: String,
    pub venue_name: Option<String>,
    pub emoji: String,
}

/// A dated section of the digest, with its display heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestDay {
    pub date: NaiveDate,
    /// Heading label, e.g. "Sunday, Feb 23".
    pub label: String,
    pub items: Vec<DigestItem>,
}

/// Groups instances by date into ordered digest days.
///
/// Instances arrive ordered by (date, start time) from the listing query;
/// grouping preserves that order within each day.
pub fn build_digest_days(instances: &[EventInstance]) -> Vec<DigestDay> {
    let mut by_date: BTreeMap<NaiveDate, Vec<DigestItem>> = BTreeMap::new();
    for instance in instances {
        by_date
            .entry(instance.date)
            .or_default()
            .push(DigestItem {
                title: instance.title.clone(),
                slug: instance.slug.clone(),
                time_label: time_range_label(instance.start_time, instance.end_time),
                venue_name: instance.venue_name.clone(),
                emoji: instance.category.emoji().to_string(),
            });
    }

    by_date
        .into_iter()
        .map(|(date, items)| DigestDay {
            date,
            label: format_date_label(date),
            items,
        })
        .collect()
}

/// Subject line for a digest covering `count` events.
pub fn digest_subject(count: usize) -> String {
    format!("This week: {count} events")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{Category, Event, Occurrence};
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn instance(title: &str, category: Category, day: NaiveDate, start: NaiveTime) -> EventInstance {
        let event = Event::one_off(title, category, day, start).with_venue("Casa Om");
        let occurrence = Occurrence::new(event.id, day, start, None);
        EventInstance::from_parts(&occurrence, &event)
    }

    #[test]
    fn test_build_digest_days_groups_and_orders() {
        let instances = vec![
            instance("Yoga", Category::Yoga, date(2025, 2, 24), time(7, 0)),
            instance("Concert", Category::Music, date(2025, 2, 23), time(20, 0)),
            instance("Dinner", Category::Food, date(2025, 2, 24), time(19, 0)),
        ];

        let days = build_digest_days(&instances);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].date, date(2025, 2, 23));
        assert_eq!(days[0].label, "Sunday, Feb 23");
        assert_eq!(days[0].items.len(), 1);
        assert_eq!(days[0].items[0].title, "Concert");
        assert_eq!(days[0].items[0].time_label, "8:00 PM");

        assert_eq!(days[1].date, date(2025, 2, 24));
        let titles: Vec<&str> = days[1].items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Yoga", "Dinner"]);
    }

    #[test]
    fn test_build_digest_days_empty() {
        assert!(build_digest_days(&[]).is_empty());
    }

    #[test]
    fn test_digest_subject() {
        assert_eq!(digest_subject(8), "This week: 8 events");
    }
}
