use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ServiceError;

/// External key of a student; records carry no identity of their own.
pub type StudentId = i64;

/// A complete student record. Every entry in the directory is fully populated.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub age: i64,
    pub course: String,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>, age: i64, course: impl Into<String>) -> Self {
        Self { name: name.into(), age, course: course.into() }
    }
}

/// A field of a partial update: either left out of the request or sent with a value.
///
/// A key missing from the JSON body deserializes to `Unset` (via `#[serde(default)]`).
/// An explicit `null` is rejected, since storing it would leave a partial record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Patch<T> {
    Unset,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self { Patch::Unset }
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool { matches!(self, Patch::Unset) }

    /// Overwrite `target` only when a value was sent.
    pub fn apply(self, target: &mut T) {
        if let Patch::Set(v) = self {
            *target = v;
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Unset => serializer.serialize_none(),
            Patch::Set(v) => v.serialize(serializer),
        }
    }
}

/// Partial update payload for `PUT /students/{id}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentUpdate {
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub age: Patch<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub course: Patch<String>,
}

impl StudentUpdate {
    /// Merge the fields that were sent into `record`; the rest are kept.
    pub fn apply_to(self, record: &mut StudentRecord) {
        self.name.apply(&mut record.name);
        self.age.apply(&mut record.age);
        self.course.apply(&mut record.course);
    }
}

/// Result of a create call. A duplicate id is an ordinary outcome, not an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(StudentRecord),
    AlreadyExists,
}

/// Snapshot of the directory in insertion order.
///
/// Serializes as a JSON object keyed by id; integer keys become strings on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentListing(pub Vec<(StudentId, StudentRecord)>);

impl Serialize for StudentListing {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, record) in &self.0 {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}

/// Ids used for lookups must be positive; there is no upper bound.
pub fn ensure_positive_id(id: StudentId) -> Result<StudentId, ServiceError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ServiceError::Validation(format!(
            "student_id must be greater than 0, got {id}"
        )))
    }
}

/// The two demo students the directory starts with.
pub fn seed_students() -> Vec<(StudentId, StudentRecord)> {
    vec![
        (1, StudentRecord::new("john", 17, "advance")),
        (2, StudentRecord::new("carl", 16, "basic")),
    ]
}
