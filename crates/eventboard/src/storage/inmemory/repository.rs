//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use eventboard_core::events::{matches_search, Event, EventInstance, Occurrence, Subscriber};
use eventboard_core::storage::{
    DateRange, EventRepository, OccurrenceRepository, RepositoryError, Result,
    SubscriberRepository,
};

/// In-memory storage backend for testing and development.
///
/// Uses HashMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
    occurrences: Arc<RwLock<HashMap<Uuid, Occurrence>>>,
    subscribers: Arc<RwLock<HashMap<Uuid, Subscriber>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the listing projection for occurrences passing `keep`.
    async fn collect_instances<F>(&self, keep: F) -> Vec<EventInstance>
    where
        F: Fn(&Occurrence, &Event) -> bool,
    {
        let occurrences = self.occurrences.read().await;
        let events = self.events.read().await;

        let mut instances: Vec<EventInstance> = occurrences
            .values()
            .filter(|o| !o.is_cancelled)
            .filter_map(|o| {
                events
                    .get(&o.event_id)
                    .filter(|e| e.is_approved && keep(o, e))
                    .map(|e| EventInstance::from_parts(o, e))
            })
            .collect();

        instances.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        instances
    }
}

#[async_trait]
impl EventRepository for InMemoryRepository {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    async fn get_event_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.values().find(|e| e.slug == slug).cloned())
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.write().await;
        if events.contains_key(&event.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Event",
                id: event.id.to_string(),
            });
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        let mut events = self.events.write().await;
        if !events.contains_key(&event.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Event",
                id: event.id.to_string(),
            });
        }
        events.insert(event.id, event.clone());
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let mut events = self.events.write().await;
        if events.remove(&id).is_none() {
            return Err(RepositoryError::NotFound {
                entity_type: "Event",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<Event>> {
        let events = self.events.read().await;
        let mut pending: Vec<Event> = events
            .values()
            .filter(|e| !e.is_approved)
            .cloned()
            .collect();
        pending.sort_by_key(|e| e.created_at);
        Ok(pending)
    }

    async fn count_events(&self) -> Result<u64> {
        let events = self.events.read().await;
        Ok(events.len() as u64)
    }
}

#[async_trait]
impl OccurrenceRepository for InMemoryRepository {
    async fn get_occurrence(&self, id: Uuid) -> Result<Option<Occurrence>> {
        let occurrences = self.occurrences.read().await;
        Ok(occurrences.get(&id).cloned())
    }

    async fn create_occurrence(&self, occurrence: &Occurrence) -> Result<()> {
        let mut occurrences = self.occurrences.write().await;
        if occurrences.contains_key(&occurrence.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Occurrence",
                id: occurrence.id.to_string(),
            });
        }
        occurrences.insert(occurrence.id, occurrence.clone());
        Ok(())
    }

    async fn create_occurrences(&self, batch: &[Occurrence]) -> Result<()> {
        let mut occurrences = self.occurrences.write().await;
        for occurrence in batch {
            if occurrences.contains_key(&occurrence.id) {
                return Err(RepositoryError::AlreadyExists {
                    entity_type: "Occurrence",
                    id: occurrence.id.to_string(),
                });
            }
        }
        for occurrence in batch {
            occurrences.insert(occurrence.id, occurrence.clone());
        }
        Ok(())
    }

    async fn update_occurrence(&self, occurrence: &Occurrence) -> Result<()> {
        let mut occurrences = self.occurrences.write().await;
        if !occurrences.contains_key(&occurrence.id) {
            return Err(RepositoryError::NotFound {
                entity_type: "Occurrence",
                id: occurrence.id.to_string(),
            });
        }
        occurrences.insert(occurrence.id, occurrence.clone());
        Ok(())
    }

    async fn delete_occurrences_for_event(&self, event_id: Uuid) -> Result<()> {
        let mut occurrences = self.occurrences.write().await;
        occurrences.retain(|_, o| o.event_id != event_id);
        Ok(())
    }

    async fn upcoming_for_event(
        &self,
        event_id: Uuid,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Occurrence>> {
        let occurrences = self.occurrences.read().await;
        let mut upcoming: Vec<Occurrence> = occurrences
            .values()
            .filter(|o| o.event_id == event_id && !o.is_cancelled && o.date >= from)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| (a.date, a.start_time).cmp(&(b.date, b.start_time)));
        upcoming.truncate(limit);
        Ok(upcoming)
    }

    async fn instances_in_range(&self, range: DateRange) -> Result<Vec<EventInstance>> {
        Ok(self
            .collect_instances(|o, _| range.contains(o.date))
            .await)
    }

    async fn search_instances(
        &self,
        query: &str,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<EventInstance>> {
        let mut instances = self
            .collect_instances(|o, e| o.date >= from && matches_search(e, query))
            .await;
        instances.truncate(limit);
        Ok(instances)
    }
}

#[async_trait]
impl SubscriberRepository for InMemoryRepository {
    async fn create_subscriber(&self, subscriber: &Subscriber) -> Result<()> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.values().any(|s| s.email == subscriber.email) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Subscriber",
                id: subscriber.email.clone(),
            });
        }
        subscribers.insert(subscriber.id, subscriber.clone());
        Ok(())
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
        let subscribers = self.subscribers.read().await;
        let mut all: Vec<Subscriber> = subscribers.values().cloned().collect();
        all.sort_by_key(|s| s.created_at);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use eventboard_core::events::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn approved_event(title: &str, day: NaiveDate, start: NaiveTime) -> Event {
        let mut event = Event::one_off(title, Category::Community, day, start);
        event.is_approved = true;
        event
    }

    #[tokio::test]
    async fn test_instances_only_include_approved_and_active() {
        let repo = InMemoryRepository::new();
        let day = date(2025, 3, 1);

        let approved = approved_event("Approved", day, time(9, 0));
        let pending = Event::one_off("Pending", Category::Community, day, time(10, 0));
        repo.create_event(&approved).await.unwrap();
        repo.create_event(&pending).await.unwrap();

        let active = Occurrence::new(approved.id, day, time(9, 0), None);
        let mut cancelled = Occurrence::new(approved.id, day, time(12, 0), None);
        cancelled.is_cancelled = true;
        let unapproved = Occurrence::new(pending.id, day, time(10, 0), None);
        repo.create_occurrences(&[active.clone(), cancelled, unapproved])
            .await
            .unwrap();

        let instances = repo
            .instances_in_range(DateRange::single_day(day))
            .await
            .unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].id, active.id);
    }

    #[tokio::test]
    async fn test_instances_ordered_by_date_then_time() {
        let repo = InMemoryRepository::new();
        let event = approved_event("Yoga", date(2025, 3, 1), time(7, 0));
        repo.create_event(&event).await.unwrap();

        repo.create_occurrences(&[
            Occurrence::new(event.id, date(2025, 3, 2), time(7, 0), None),
            Occurrence::new(event.id, date(2025, 3, 1), time(18, 0), None),
            Occurrence::new(event.id, date(2025, 3, 1), time(7, 0), None),
        ])
        .await
        .unwrap();

        let instances = repo
            .instances_in_range(DateRange::new(date(2025, 3, 1), date(2025, 3, 2)).unwrap())
            .await
            .unwrap();
        let keys: Vec<(NaiveDate, NaiveTime)> =
            instances.iter().map(|i| (i.date, i.start_time)).collect();
        assert_eq!(
            keys,
            vec![
                (date(2025, 3, 1), time(7, 0)),
                (date(2025, 3, 1), time(18, 0)),
                (date(2025, 3, 2), time(7, 0)),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_matches_venue_and_respects_from() {
        let repo = InMemoryRepository::new();
        let event = approved_event("Yoga", date(2025, 3, 1), time(7, 0))
            .with_venue("Casa Om");
        repo.create_event(&event).await.unwrap();
        repo.create_occurrences(&[
            Occurrence::new(event.id, date(2025, 2, 1), time(7, 0), None),
            Occurrence::new(event.id, date(2025, 3, 1), time(7, 0), None),
        ])
        .await
        .unwrap();

        let hits = repo
            .search_instances("casa", date(2025, 2, 15), 20)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, date(2025, 3, 1));
    }

    #[tokio::test]
    async fn test_duplicate_subscriber_is_rejected() {
        let repo = InMemoryRepository::new();
        repo.create_subscriber(&Subscriber::new("ana@example.com"))
            .await
            .unwrap();

        let result = repo
            .create_subscriber(&Subscriber::new("Ana@example.com"))
            .await;
        assert!(matches!(
            result,
            Err(RepositoryError::AlreadyExists { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_occurrences_for_event() {
        let repo = InMemoryRepository::new();
        let event = approved_event("Yoga", date(2025, 3, 1), time(7, 0));
        let other = approved_event("Dinner", date(2025, 3, 1), time(19, 0));
        repo.create_event(&event).await.unwrap();
        repo.create_event(&other).await.unwrap();
        repo.create_occurrences(&[
            Occurrence::new(event.id, date(2025, 3, 1), time(7, 0), None),
            Occurrence::new(other.id, date(2025, 3, 1), time(19, 0), None),
        ])
        .await
        .unwrap();

        repo.delete_occurrences_for_event(event.id).await.unwrap();

        let remaining = repo
            .instances_in_range(DateRange::single_day(date(2025, 3, 1)))
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].event_id, other.id);
    }
}
