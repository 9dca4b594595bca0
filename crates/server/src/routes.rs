pub mod students;

use axum::{
    routing::{delete, get},
    Json, Router,
};
use common::types::{Greeting, Health};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[utoipa::path(get, path = "/", tag = "students", responses((status = 200, description = "Greeting", body = crate::openapi::GreetingDoc)))]
pub async fn root() -> Json<Greeting> {
    Json(Greeting::default())
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router over the given state.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json));

    let student_routes = Router::new()
        .route("/students", get(students::list_students))
        .route("/students/", get(students::list_students))
        .route(
            "/students/:student_id",
            get(students::get_student)
                .post(students::create_student)
                .put(students::update_student),
        )
        .route("/get_by_name", get(students::get_by_name))
        .route("/delete_student/:student_id", delete(students::delete_student));

    public
        .merge(student_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
