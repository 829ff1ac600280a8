//! API route definitions

use axum::{extract::DefaultBodyLimit, routing::{any, get}, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use super::handlers::{self, ErrorResponse, HealthResponse};
use crate::types::{RequestPayload, ResponsePayload};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "sortd API",
        version = "0.1.0",
        description = "Batch integer-sequence sorting, sequential or concurrent"
    ),
    tags(
        (name = "sort", description = "Sort operations"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::process_single,
        handlers::process_concurrent,
    ),
    components(schemas(
        RequestPayload,
        ResponsePayload,
        HealthResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the API router
pub fn create_router() -> Router {
    Router::new()
        // Sorting, any method that carries a body
        .route("/process-single", any(handlers::process_single))
        .route("/process-concurrent", any(handlers::process_concurrent))

        // Health
        .route("/health", get(handlers::health))

        // OpenAPI document
        .route("/api/openapi.json", get(openapi_json))

        // Batches of any size are accepted
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
}

/// Create the API router with a permissive CORS layer
pub fn create_router_with_cors() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router().layer(cors)
}
