use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::students::domain::{CreateOutcome, StudentId, StudentListing, StudentRecord, StudentUpdate};

/// Trait abstraction over the student directory.
///
/// `get`, `update` and `delete` signal a missing id as `ServiceError::NotFound`;
/// `find_by_name` and `create` report misses and conflicts in their return value.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list(&self) -> StudentListing;
    async fn get(&self, id: StudentId) -> Result<StudentRecord, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Option<StudentRecord>;
    async fn create(&self, id: StudentId, record: StudentRecord) -> CreateOutcome;
    async fn update(&self, id: StudentId, update: StudentUpdate) -> Result<StudentRecord, ServiceError>;
    async fn delete(&self, id: StudentId) -> Result<(), ServiceError>;
    async fn len(&self) -> usize;
}
