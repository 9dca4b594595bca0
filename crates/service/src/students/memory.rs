use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::metrics;
use crate::students::domain::{
    ensure_positive_id, seed_students, CreateOutcome, StudentId, StudentListing, StudentRecord,
    StudentUpdate,
};
use crate::students::store::StudentStore;

/// Id → record map that remembers insertion order for listing and name scans.
#[derive(Debug, Default)]
struct Directory {
    records: HashMap<StudentId, StudentRecord>,
    order: Vec<StudentId>,
}

impl Directory {
    fn contains(&self, id: StudentId) -> bool {
        self.records.contains_key(&id)
    }

    /// Insert only if the id is free; returns whether the record was stored.
    fn insert_new(&mut self, id: StudentId, record: StudentRecord) -> bool {
        if self.contains(id) {
            return false;
        }
        self.records.insert(id, record);
        self.order.push(id);
        true
    }

    fn remove(&mut self, id: StudentId) -> Option<StudentRecord> {
        let removed = self.records.remove(&id)?;
        self.order.retain(|k| *k != id);
        Some(removed)
    }

    fn iter(&self) -> impl Iterator<Item = (StudentId, &StudentRecord)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|rec| (*id, rec)))
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

/// Process-local student directory guarded by a single read/write lock.
///
/// Every mutation checks presence and writes under one write guard, so concurrent
/// create/update/delete calls cannot interleave between the check and the write.
pub struct InMemoryStudentStore {
    inner: RwLock<Directory>,
}

impl InMemoryStudentStore {
    /// Empty directory.
    pub fn new() -> Arc<Self> {
        Self::with_records(Vec::new())
    }

    /// Directory holding the two demo students.
    pub fn seeded() -> Arc<Self> {
        Self::with_records(seed_students())
    }

    /// Directory preloaded with `records`; later duplicates of an id are ignored.
    pub fn with_records<I>(records: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (StudentId, StudentRecord)>,
    {
        let mut dir = Directory::default();
        for (id, rec) in records {
            dir.insert_new(id, rec);
        }
        metrics::set_records(dir.len());
        Arc::new(Self { inner: RwLock::new(dir) })
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn list(&self) -> StudentListing {
        metrics::record_op("list");
        let dir = self.inner.read().await;
        StudentListing(dir.iter().map(|(id, rec)| (id, rec.clone())).collect())
    }

    async fn get(&self, id: StudentId) -> Result<StudentRecord, ServiceError> {
        metrics::record_op("get");
        let id = ensure_positive_id(id)?;
        let dir = self.inner.read().await;
        match dir.records.get(&id) {
            Some(rec) => Ok(rec.clone()),
            None => {
                metrics::record_not_found("get");
                Err(ServiceError::not_found("Student"))
            }
        }
    }

    async fn find_by_name(&self, name: &str) -> Option<StudentRecord> {
        metrics::record_op("find_by_name");
        if name.is_empty() {
            metrics::record_not_found("find_by_name");
            return None;
        }
        let dir = self.inner.read().await;
        let found = dir.iter().find(|(_, rec)| rec.name == name).map(|(_, rec)| rec.clone());
        if found.is_none() {
            metrics::record_not_found("find_by_name");
        }
        found
    }

    async fn create(&self, id: StudentId, record: StudentRecord) -> CreateOutcome {
        metrics::record_op("create");
        let mut dir = self.inner.write().await;
        if !dir.insert_new(id, record.clone()) {
            debug!(student_id = id, "create rejected, id already present");
            return CreateOutcome::AlreadyExists;
        }
        metrics::set_records(dir.len());
        drop(dir);
        info!(student_id = id, name = %record.name, "student created");
        CreateOutcome::Created(record)
    }

    async fn update(&self, id: StudentId, update: StudentUpdate) -> Result<StudentRecord, ServiceError> {
        metrics::record_op("update");
        let mut dir = self.inner.write().await;
        let Some(existing) = dir.records.get_mut(&id) else {
            metrics::record_not_found("update");
            return Err(ServiceError::not_found("Student"));
        };
        update.apply_to(existing);
        let updated = existing.clone();
        drop(dir);
        info!(student_id = id, "student updated");
        Ok(updated)
    }

    async fn delete(&self, id: StudentId) -> Result<(), ServiceError> {
        metrics::record_op("delete");
        let mut dir = self.inner.write().await;
        if dir.remove(id).is_none() {
            metrics::record_not_found("delete");
            return Err(ServiceError::not_found("Student"));
        }
        metrics::set_records(dir.len());
        drop(dir);
        info!(student_id = id, "student deleted");
        Ok(())
    }

    async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
