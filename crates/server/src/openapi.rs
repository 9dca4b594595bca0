use std::collections::HashMap;

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct GreetingDoc { pub message: String }

#[derive(Serialize, ToSchema)]
pub struct StudentRecordDoc { pub name: String, pub age: i64, pub course: String }

/// Every field is optional; fields left out keep their stored value. `null` is rejected.
#[derive(ToSchema)]
pub struct StudentUpdateDoc {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub course: Option<String>,
}

/// Students keyed by their id rendered as a string.
#[derive(ToSchema)]
pub struct StudentListingDoc(pub HashMap<String, StudentRecordDoc>);

#[derive(Serialize, ToSchema)]
pub struct DataNotFoundDoc {
    #[serde(rename = "Data")]
    #[schema(example = "Not found")]
    pub data: String,
}

#[derive(Serialize, ToSchema)]
pub struct StudentExistsDoc {
    #[serde(rename = "Error")]
    #[schema(example = "Student exists")]
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct StudentDeletedDoc {
    #[serde(rename = "Message")]
    #[schema(example = "Student deleted successfully")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum NameLookupDoc {
    Found(StudentRecordDoc),
    Missing(DataNotFoundDoc),
}

#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreateResponseDoc {
    Created(StudentRecordDoc),
    Exists(StudentExistsDoc),
}

#[derive(ToSchema)]
pub struct ErrorDetailDoc { pub detail: String }

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Directory", description = "CRUD over an in-memory student directory"),
    paths(
        crate::routes::health,
        crate::routes::root,
        crate::routes::students::list_students,
        crate::routes::students::get_student,
        crate::routes::students::get_by_name,
        crate::routes::students::create_student,
        crate::routes::students::update_student,
        crate::routes::students::delete_student,
    ),
    components(
        schemas(
            HealthResponse,
            GreetingDoc,
            StudentRecordDoc,
            StudentUpdateDoc,
            StudentListingDoc,
            DataNotFoundDoc,
            StudentExistsDoc,
            StudentDeletedDoc,
            NameLookupDoc,
            CreateResponseDoc,
            ErrorDetailDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_student_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).expect("serialize openapi");
        let paths = doc["paths"].as_object().expect("paths object");
        for p in [
            "/",
            "/health",
            "/students/",
            "/students/{student_id}",
            "/get_by_name",
            "/delete_student/{student_id}",
        ] {
            assert!(paths.contains_key(p), "missing path {p}");
        }
        let item = &paths["/students/{student_id}"];
        assert!(item.get("get").is_some());
        assert!(item.get("post").is_some());
        assert!(item.get("put").is_some());
    }
}
