//! Student records and the directory that holds them.

pub mod domain;
pub mod memory;
pub mod store;

pub use domain::{
    ensure_positive_id, seed_students, CreateOutcome, Patch, StudentId, StudentListing,
    StudentRecord, StudentUpdate,
};
pub use memory::InMemoryStudentStore;
pub use store::StudentStore;
