use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use service::students::{CreateOutcome, StudentListing, StudentRecord, StudentUpdate};
use tracing::info;

use crate::errors::ApiError;
use crate::extract::{JsonBody, QueryParams, StudentIdPath};
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Exact name to look for
    pub name: Option<String>,
}

/// Body of a name lookup that matched nothing.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DataNotFound {
    #[serde(rename = "Data")]
    pub data: &'static str,
}

impl Default for DataNotFound {
    fn default() -> Self { Self { data: "Not found" } }
}

/// Body of a create call on an id that is already taken.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StudentExists {
    #[serde(rename = "Error")]
    pub error: &'static str,
}

impl Default for StudentExists {
    fn default() -> Self { Self { error: "Student exists" } }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StudentDeleted {
    #[serde(rename = "Message")]
    pub message: &'static str,
}

impl Default for StudentDeleted {
    fn default() -> Self { Self { message: "Student deleted successfully" } }
}

/// Name lookups answer 200 either way; the body tells found from missing.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NameLookup {
    Found(StudentRecord),
    Missing(DataNotFound),
}

/// Creates answer 200 either way; a taken id is reported in the body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreateResponse {
    Created(StudentRecord),
    Exists(StudentExists),
}

impl From<CreateOutcome> for CreateResponse {
    fn from(outcome: CreateOutcome) -> Self {
        match outcome {
            CreateOutcome::Created(rec) => Self::Created(rec),
            CreateOutcome::AlreadyExists => Self::Exists(StudentExists::default()),
        }
    }
}

#[utoipa::path(
    get, path = "/students/", tag = "students",
    responses((status = 200, description = "Every student keyed by id", body = crate::openapi::StudentListingDoc))
)]
pub async fn list_students(State(state): State<ServerState>) -> Json<StudentListing> {
    Json(state.students.list().await)
}

#[utoipa::path(
    get, path = "/students/{student_id}", tag = "students",
    params(("student_id" = i64, Path, description = "The ID of the student you want to view")),
    responses(
        (status = 200, description = "Student found", body = crate::openapi::StudentRecordDoc),
        (status = 404, description = "No student with this id", body = crate::openapi::ErrorDetailDoc),
        (status = 422, description = "Id is not a positive integer", body = crate::openapi::ErrorDetailDoc)
    )
)]
pub async fn get_student(
    State(state): State<ServerState>,
    StudentIdPath(student_id): StudentIdPath,
) -> Result<Json<StudentRecord>, ApiError> {
    let rec = state.students.get(student_id).await?;
    Ok(Json(rec))
}

#[utoipa::path(
    get, path = "/get_by_name", tag = "students",
    params(NameQuery),
    responses(
        (status = 200, description = "First student with that name, or {\"Data\": \"Not found\"}", body = crate::openapi::NameLookupDoc),
        (status = 422, description = "Query string cannot be read, e.g. a repeated name", body = crate::openapi::ErrorDetailDoc)
    )
)]
pub async fn get_by_name(
    State(state): State<ServerState>,
    QueryParams(q): QueryParams<NameQuery>,
) -> Json<NameLookup> {
    let name = q.name.unwrap_or_default();
    match state.students.find_by_name(&name).await {
        Some(rec) => Json(NameLookup::Found(rec)),
        None => Json(NameLookup::Missing(DataNotFound::default())),
    }
}

#[utoipa::path(
    post, path = "/students/{student_id}", tag = "students",
    params(("student_id" = i64, Path, description = "Id to store the new student under")),
    request_body = crate::openapi::StudentRecordDoc,
    responses(
        (status = 200, description = "Created student, or {\"Error\": \"Student exists\"}", body = crate::openapi::CreateResponseDoc),
        (status = 422, description = "Body is missing a field or has a wrong type", body = crate::openapi::ErrorDetailDoc)
    )
)]
pub async fn create_student(
    State(state): State<ServerState>,
    StudentIdPath(student_id): StudentIdPath,
    JsonBody(record): JsonBody<StudentRecord>,
) -> Json<CreateResponse> {
    let outcome = state.students.create(student_id, record).await;
    if outcome == CreateOutcome::AlreadyExists {
        info!(student_id, "create on existing id");
    }
    Json(outcome.into())
}

#[utoipa::path(
    put, path = "/students/{student_id}", tag = "students",
    params(("student_id" = i64, Path, description = "Id of the student to update")),
    request_body = crate::openapi::StudentUpdateDoc,
    responses(
        (status = 200, description = "Merged student", body = crate::openapi::StudentRecordDoc),
        (status = 404, description = "No student with this id", body = crate::openapi::ErrorDetailDoc),
        (status = 422, description = "A field has a wrong type or is null", body = crate::openapi::ErrorDetailDoc)
    )
)]
pub async fn update_student(
    State(state): State<ServerState>,
    StudentIdPath(student_id): StudentIdPath,
    JsonBody(update): JsonBody<StudentUpdate>,
) -> Result<Json<StudentRecord>, ApiError> {
    let rec = state.students.update(student_id, update).await?;
    Ok(Json(rec))
}

#[utoipa::path(
    delete, path = "/delete_student/{student_id}", tag = "students",
    params(("student_id" = i64, Path, description = "Id of the student to delete")),
    responses(
        (status = 200, description = "Student removed", body = crate::openapi::StudentDeletedDoc),
        (status = 404, description = "No student with this id", body = crate::openapi::ErrorDetailDoc)
    )
)]
pub async fn delete_student(
    State(state): State<ServerState>,
    StudentIdPath(student_id): StudentIdPath,
) -> Result<Json<StudentDeleted>, ApiError> {
    state.students.delete(student_id).await?;
    Ok(Json(StudentDeleted::default()))
}
