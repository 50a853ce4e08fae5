//! SQLite schema definitions and SQL query constants.
//!
//! All SQL statements used by the SQLite repository live here as constants,
//! pure data with no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Events table
CREATE TABLE IF NOT EXISTS events (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    description TEXT,
    category TEXT NOT NULL,
    venue_name TEXT,
    organizer_name TEXT,
    date TEXT,
    start_time TEXT NOT NULL,
    end_time TEXT,
    recurrence TEXT,
    is_featured INTEGER NOT NULL DEFAULT 0,
    is_approved INTEGER NOT NULL DEFAULT 0,
    contact_whatsapp TEXT,
    contact_instagram TEXT,
    contact_link TEXT,
    images TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT
);

-- Occurrences table
CREATE TABLE IF NOT EXISTS occurrences (
    id TEXT PRIMARY KEY,
    event_id TEXT NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT,
    is_cancelled INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
);

-- Subscribers table
CREATE TABLE IF NOT EXISTS subscribers (
    id TEXT PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_events_is_approved ON events(is_approved);
CREATE INDEX IF NOT EXISTS idx_occurrences_event_id ON occurrences(event_id);
CREATE INDEX IF NOT EXISTS idx_occurrences_date_cancelled ON occurrences(date, is_cancelled);
"#;

/// Columns selected for full event rows, in `row_to_event` order.
const EVENT_COLUMNS: &str = "id, title, slug, description, category, venue_name, organizer_name, date, start_time, end_time, recurrence, is_featured, is_approved, contact_whatsapp, contact_instagram, contact_link, images, created_at, updated_at";

// Event queries
pub const INSERT_EVENT: &str = r#"
INSERT INTO events (id, title, slug, description, category, venue_name, organizer_name, date, start_time, end_time, recurrence, is_featured, is_approved, contact_whatsapp, contact_instagram, contact_link, images, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
"#;

pub fn select_event_by_id() -> String {
    format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1")
}

pub fn select_event_by_slug() -> String {
    format!("SELECT {EVENT_COLUMNS} FROM events WHERE slug = ?1")
}

pub fn select_pending_events() -> String {
    format!("SELECT {EVENT_COLUMNS} FROM events WHERE is_approved = 0 ORDER BY created_at ASC")
}

pub const UPDATE_EVENT: &str = r#"
UPDATE events
SET title = ?2, slug = ?3, description = ?4, category = ?5, venue_name = ?6, organizer_name = ?7, date = ?8, start_time = ?9, end_time = ?10, recurrence = ?11, is_featured = ?12, is_approved = ?13, contact_whatsapp = ?14, contact_instagram = ?15, contact_link = ?16, images = ?17, updated_at = ?18
WHERE id = ?1
"#;

pub const DELETE_EVENT: &str = r#"
DELETE FROM events
WHERE id = ?1
"#;

pub const COUNT_EVENTS: &str = r#"
SELECT COUNT(*) FROM events
"#;

// Occurrence queries
pub const INSERT_OCCURRENCE: &str = r#"
INSERT INTO occurrences (id, event_id, date, start_time, end_time, is_cancelled)
VALUES (?1, ?2, ?3, ?4, ?5, ?6)
"#;

pub const SELECT_OCCURRENCE_BY_ID: &str = r#"
SELECT id, event_id, date, start_time, end_time, is_cancelled
FROM occurrences
WHERE id = ?1
"#;

pub const UPDATE_OCCURRENCE: &str = r#"
UPDATE occurrences
SET date = ?2, start_time = ?3, end_time = ?4, is_cancelled = ?5
WHERE id = ?1
"#;

pub const DELETE_OCCURRENCES_FOR_EVENT: &str = r#"
DELETE FROM occurrences
WHERE event_id = ?1
"#;

pub const SELECT_UPCOMING_FOR_EVENT: &str = r#"
SELECT id, event_id, date, start_time, end_time, is_cancelled
FROM occurrences
WHERE event_id = ?1 AND is_cancelled = 0 AND date >= ?2
ORDER BY date ASC, start_time ASC
LIMIT ?3
"#;

/// Columns selected for instance projections, in `row_to_instance` order.
const INSTANCE_COLUMNS: &str = "o.id, e.id, e.title, e.slug, e.description, e.category, e.venue_name, e.organizer_name, o.date, o.start_time, o.end_time, e.is_featured, e.contact_whatsapp, e.contact_instagram, e.contact_link, e.images";

pub fn select_instances_in_range() -> String {
    format!(
        r#"
SELECT {INSTANCE_COLUMNS}
FROM occurrences o
INNER JOIN events e ON o.event_id = e.id
WHERE e.is_approved = 1 AND o.is_cancelled = 0 AND o.date >= ?1 AND o.date <= ?2
ORDER BY o.date ASC, o.start_time ASC
"#
    )
}

pub fn search_instances() -> String {
    format!(
        r#"
SELECT {INSTANCE_COLUMNS}
FROM occurrences o
INNER JOIN events e ON o.event_id = e.id
WHERE e.is_approved = 1 AND o.is_cancelled = 0 AND o.date >= ?1
  AND (LOWER(e.title) LIKE ?2
       OR LOWER(COALESCE(e.description, '')) LIKE ?2
       OR LOWER(COALESCE(e.venue_name, '')) LIKE ?2
       OR LOWER(COALESCE(e.organizer_name, '')) LIKE ?2)
ORDER BY o.date ASC, o.start_time ASC
LIMIT ?3
"#
    )
}

// Subscriber queries
pub const INSERT_SUBSCRIBER: &str = r#"
INSERT INTO subscribers (id, email, created_at)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_SUBSCRIBERS: &str = r#"
SELECT id, email, created_at
FROM subscribers
ORDER BY created_at ASC
"#;
