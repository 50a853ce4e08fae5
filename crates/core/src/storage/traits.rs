use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::events::{Event, EventInstance, Occurrence, Subscriber};

use super::{DateRange, Result};

/// Repository for event operations.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Gets an event by its ID.
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>>;

    /// Gets an event by its public slug.
    async fn get_event_by_slug(&self, slug: &str) -> Result<Option<Event>>;

    /// Creates a new event.
    async fn create_event(&self, event: &Event) -> Result<()>;

    /// Updates an existing event.
    async fn update_event(&self, event: &Event) -> Result<()>;

    /// Deletes an event by its ID.
    async fn delete_event(&self, id: Uuid) -> Result<()>;

    /// Lists unapproved events, oldest submission first.
    async fn list_pending(&self) -> Result<Vec<Event>>;

    /// Counts all stored events (used by the health check).
    async fn count_events(&self) -> Result<u64>;
}

/// Repository for occurrence operations.
#[async_trait]
pub trait OccurrenceRepository: Send + Sync {
    /// Gets an occurrence by its ID.
    async fn get_occurrence(&self, id: Uuid) -> Result<Option<Occurrence>>;

    /// Creates a single occurrence.
    async fn create_occurrence(&self, occurrence: &Occurrence) -> Result<()>;

    /// Bulk-inserts the occurrences produced by recurrence expansion.
    async fn create_occurrences(&self, occurrences: &[Occurrence]) -> Result<()>;

    /// Updates an existing occurrence (cancellation).
    async fn update_occurrence(&self, occurrence: &Occurrence) -> Result<()>;

    /// Deletes all occurrences belonging to an event.
    async fn delete_occurrences_for_event(&self, event_id: Uuid) -> Result<()>;

    /// Upcoming non-cancelled occurrences of one event, ascending, capped.
    async fn upcoming_for_event(
        &self,
        event_id: Uuid,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Occurrence>>;

    /// Listing projection: approved events, non-cancelled occurrences within
    /// the range, ordered by (date, start time).
    async fn instances_in_range(&self, range: DateRange) -> Result<Vec<EventInstance>>;

    /// Searches upcoming instances by title/description/venue/organizer.
    async fn search_instances(
        &self,
        query: &str,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<EventInstance>>;
}

/// Repository for digest subscriber operations.
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Stores a new subscriber.
    async fn create_subscriber(&self, subscriber: &Subscriber) -> Result<()>;

    /// Lists all subscribers.
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>>;
}
