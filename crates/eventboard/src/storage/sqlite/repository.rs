//! SQLite repository implementation.
//!
//! Implements the repository traits from `eventboard_core::storage` using
//! SQLite via `tokio-rusqlite`.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use eventboard_core::events::{Event, EventInstance, Occurrence, Subscriber};
use eventboard_core::storage::{
    DateRange, EventRepository, OccurrenceRepository, RepositoryError, Result,
    SubscriberRepository,
};

use super::conversions::{
    format_date, format_datetime, format_time, images_to_json, pattern_to_json, row_to_event,
    row_to_instance, row_to_occurrence, row_to_subscriber,
};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Flattened column values for an event row, computed outside the
/// connection closure so serialization errors surface before any I/O.
struct EventRow {
    id: String,
    title: String,
    slug: String,
    description: Option<String>,
    category: String,
    venue_name: Option<String>,
    organizer_name: Option<String>,
    date: Option<String>,
    start_time: String,
    end_time: Option<String>,
    recurrence: Option<String>,
    is_featured: bool,
    is_approved: bool,
    contact_whatsapp: Option<String>,
    contact_instagram: Option<String>,
    contact_link: Option<String>,
    images: String,
    created_at: String,
    updated_at: Option<String>,
}

impl EventRow {
    fn from_event(event: &Event) -> Result<Self> {
        Ok(Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            slug: event.slug.clone(),
            description: event.description.clone(),
            category: event.category.as_str().to_string(),
            venue_name: event.venue_name.clone(),
            organizer_name: event.organizer_name.clone(),
            date: event.date.as_ref().map(format_date),
            start_time: format_time(&event.start_time),
            end_time: event.end_time.as_ref().map(format_time),
            recurrence: event
                .recurrence
                .as_ref()
                .map(pattern_to_json)
                .transpose()?,
            is_featured: event.is_featured,
            is_approved: event.is_approved,
            contact_whatsapp: event.contact_whatsapp.clone(),
            contact_instagram: event.contact_instagram.clone(),
            contact_link: event.contact_link.clone(),
            images: images_to_json(&event.images)?,
            created_at: format_datetime(&event.created_at),
            updated_at: event.updated_at.as_ref().map(format_datetime),
        })
    }
}

/// Flattened column values for an occurrence row.
struct OccurrenceRow {
    id: String,
    event_id: String,
    date: String,
    start_time: String,
    end_time: Option<String>,
    is_cancelled: bool,
}

impl OccurrenceRow {
    fn from_occurrence(occurrence: &Occurrence) -> Self {
        Self {
            id: occurrence.id.to_string(),
            event_id: occurrence.event_id.to_string(),
            date: format_date(&occurrence.date),
            start_time: format_time(&occurrence.start_time),
            end_time: occurrence.end_time.as_ref().map(format_time),
            is_cancelled: occurrence.is_cancelled,
        }
    }
}

/// SQLite-based repository implementation.
///
/// Provides async access to SQLite storage for all entity types.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// EventRepository implementation
// ============================================================================

#[async_trait]
impl EventRepository for SqliteRepository {
    async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&schema::select_event_by_id())
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_event) {
                    Ok(event) => Ok(Some(event)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", id.to_string()))
    }

    async fn get_event_by_slug(&self, slug: &str) -> Result<Option<Event>> {
        let slug = slug.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&schema::select_event_by_slug())
                    .map_err(wrap_err)?;
                match stmt.query_row([&slug], row_to_event) {
                    Ok(event) => Ok(Some(event)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event"))
    }

    async fn create_event(&self, event: &Event) -> Result<()> {
        let row = EventRow::from_event(event)?;
        let id = event.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_EVENT,
                    rusqlite::params![
                        row.id,
                        row.title,
                        row.slug,
                        row.description,
                        row.category,
                        row.venue_name,
                        row.organizer_name,
                        row.date,
                        row.start_time,
                        row.end_time,
                        row.recurrence,
                        row.is_featured,
                        row.is_approved,
                        row.contact_whatsapp,
                        row.contact_instagram,
                        row.contact_link,
                        row.images,
                        row.created_at,
                        row.updated_at,
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", id))
    }

    async fn update_event(&self, event: &Event) -> Result<()> {
        let row = EventRow::from_event(event)?;
        let id = event.id.to_string();

        let updated = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::UPDATE_EVENT,
                    rusqlite::params![
                        row.id,
                        row.title,
                        row.slug,
                        row.description,
                        row.category,
                        row.venue_name,
                        row.organizer_name,
                        row.date,
                        row.start_time,
                        row.end_time,
                        row.recurrence,
                        row.is_featured,
                        row.is_approved,
                        row.contact_whatsapp,
                        row.contact_instagram,
                        row.contact_link,
                        row.images,
                        row.updated_at,
                    ],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", id.clone()))?;

        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Event",
                id,
            });
        }
        Ok(())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        let deleted = self
            .conn
            .call(move |conn| {
                conn.execute(schema::DELETE_EVENT, [&id_str]).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Event", id.to_string()))?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Event",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<Event>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(&schema::select_pending_events())
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_event).map_err(wrap_err)?;

                let mut events = Vec::new();
                for row_result in rows {
                    events.push(row_result.map_err(wrap_err)?);
                }
                Ok(events)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Event"))
    }

    async fn count_events(&self) -> Result<u64> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::COUNT_EVENTS, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)
            })
            .await
            .map(|count| count as u64)
            .map_err(|e| map_tokio_rusqlite_error(e, "Event"))
    }
}

// ============================================================================
// OccurrenceRepository implementation
// ============================================================================

#[async_trait]
impl OccurrenceRepository for SqliteRepository {
    async fn get_occurrence(&self, id: Uuid) -> Result<Option<Occurrence>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_OCCURRENCE_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_occurrence) {
                    Ok(occurrence) => Ok(Some(occurrence)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Occurrence", id.to_string()))
    }

    async fn create_occurrence(&self, occurrence: &Occurrence) -> Result<()> {
        let row = OccurrenceRow::from_occurrence(occurrence);
        let id = occurrence.id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_OCCURRENCE,
                    rusqlite::params![
                        row.id,
                        row.event_id,
                        row.date,
                        row.start_time,
                        row.end_time,
                        row.is_cancelled,
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Occurrence", id))
    }

    async fn create_occurrences(&self, occurrences: &[Occurrence]) -> Result<()> {
        if occurrences.is_empty() {
            return Ok(());
        }
        let rows: Vec<OccurrenceRow> = occurrences
            .iter()
            .map(OccurrenceRow::from_occurrence)
            .collect();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                {
                    let mut stmt = tx.prepare(schema::INSERT_OCCURRENCE).map_err(wrap_err)?;
                    for row in &rows {
                        stmt.execute(rusqlite::params![
                            row.id,
                            row.event_id,
                            row.date,
                            row.start_time,
                            row.end_time,
                            row.is_cancelled,
                        ])
                        .map_err(wrap_err)?;
                    }
                }
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Occurrence"))
    }

    async fn update_occurrence(&self, occurrence: &Occurrence) -> Result<()> {
        let row = OccurrenceRow::from_occurrence(occurrence);
        let id = occurrence.id.to_string();

        let updated = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::UPDATE_OCCURRENCE,
                    rusqlite::params![
                        row.id,
                        row.date,
                        row.start_time,
                        row.end_time,
                        row.is_cancelled,
                    ],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Occurrence", id.clone()))?;

        if updated == 0 {
            return Err(RepositoryError::NotFound {
                entity_type: "Occurrence",
                id,
            });
        }
        Ok(())
    }

    async fn delete_occurrences_for_event(&self, event_id: Uuid) -> Result<()> {
        let event_id_str = event_id.to_string();

        self.conn
            .call(move |conn| {
                conn.execute(schema::DELETE_OCCURRENCES_FOR_EVENT, [&event_id_str])
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Occurrence"))
    }

    async fn upcoming_for_event(
        &self,
        event_id: Uuid,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Occurrence>> {
        let event_id_str = event_id.to_string();
        let from_str = format_date(&from);
        let limit = limit as i64;

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_UPCOMING_FOR_EVENT)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(
                        rusqlite::params![event_id_str, from_str, limit],
                        row_to_occurrence,
                    )
                    .map_err(wrap_err)?;

                let mut occurrences = Vec::new();
                for row_result in rows {
                    occurrences.push(row_result.map_err(wrap_err)?);
                }
                Ok(occurrences)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Occurrence"))
    }

    async fn instances_in_range(&self, range: DateRange) -> Result<Vec<EventInstance>> {
        let start_str = format_date(&range.start);
        let end_str = format_date(&range.end);

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&schema::select_instances_in_range())
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map([&start_str, &end_str], row_to_instance)
                    .map_err(wrap_err)?;

                let mut instances = Vec::new();
                for row_result in rows {
                    instances.push(row_result.map_err(wrap_err)?);
                }
                Ok(instances)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Occurrence"))
    }

    async fn search_instances(
        &self,
        query: &str,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<EventInstance>> {
        let from_str = format_date(&from);
        let like_pattern = format!("%{}%", query.to_lowercase());
        let limit = limit as i64;

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(&schema::search_instances())
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(
                        rusqlite::params![from_str, like_pattern, limit],
                        row_to_instance,
                    )
                    .map_err(wrap_err)?;

                let mut instances = Vec::new();
                for row_result in rows {
                    instances.push(row_result.map_err(wrap_err)?);
                }
                Ok(instances)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Occurrence"))
    }
}

// ============================================================================
// SubscriberRepository implementation
// ============================================================================

#[async_trait]
impl SubscriberRepository for SqliteRepository {
    async fn create_subscriber(&self, subscriber: &Subscriber) -> Result<()> {
        let id = subscriber.id.to_string();
        let email = subscriber.email.clone();
        let email_for_err = subscriber.email.clone();
        let created_at = format_datetime(&subscriber.created_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_SUBSCRIBER,
                    rusqlite::params![id, email, created_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Subscriber", email_for_err))
    }

    async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_SUBSCRIBERS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_subscriber).map_err(wrap_err)?;

                let mut subscribers = Vec::new();
                for row_result in rows {
                    subscribers.push(row_result.map_err(wrap_err)?);
                }
                Ok(subscribers)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Subscriber"))
    }
}
