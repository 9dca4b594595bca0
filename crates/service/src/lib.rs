//! Service layer for the student directory.
//! - `students` holds the record types, the `StudentStore` trait and the in-memory directory.
//! - `errors` carries the conditions handlers translate into HTTP responses.
//! - `metrics` registers the Prometheus families the directory updates.

pub mod errors;
pub mod metrics;
pub mod students;
