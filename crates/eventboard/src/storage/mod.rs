//! Storage backends.
//!
//! Exactly one backend is compiled in, selected by cargo feature:
//! `inmemory` (default, used by tests and dev) or `sqlite`.

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;
