//! API request handlers

use axum::{
    body::Bytes,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::codec;
use crate::error::Error;
use crate::sort::{self, Strategy};
use crate::types::{RequestPayload, ResponsePayload};

/// Plain-text body returned for any undecodable request
pub const INVALID_PAYLOAD: &str = "Invalid JSON payload";

// Response types

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Handler error mapped onto an HTTP response
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::Decode(reason) => {
                tracing::warn!(error = %reason, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    INVALID_PAYLOAD,
                )
                    .into_response()
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: other.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

async fn process(strategy: Strategy, body: Bytes) -> Result<Json<ResponsePayload>, ApiError> {
    let payload = codec::decode(&body)?;
    let response = sort::timed(strategy, &payload.to_sort).await?;

    tracing::debug!(
        %strategy,
        sequences = payload.to_sort.len(),
        elements = payload.element_count(),
        time_ns = response.time_ns,
        "Sorted batch"
    );

    Ok(Json(response))
}

// Handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// Sort every sequence one after another
#[utoipa::path(
    post,
    path = "/process-single",
    request_body = RequestPayload,
    responses(
        (status = 200, description = "Sorted sequences", body = ResponsePayload),
        (status = 400, description = "Invalid JSON payload", body = String, content_type = "text/plain")
    ),
    tag = "sort"
)]
pub async fn process_single(body: Bytes) -> Result<Json<ResponsePayload>, ApiError> {
    process(Strategy::Sequential, body).await
}

/// Sort every sequence on its own concurrent task
#[utoipa::path(
    post,
    path = "/process-concurrent",
    request_body = RequestPayload,
    responses(
        (status = 200, description = "Sorted sequences", body = ResponsePayload),
        (status = 400, description = "Invalid JSON payload", body = String, content_type = "text/plain")
    ),
    tag = "sort"
)]
pub async fn process_concurrent(body: Bytes) -> Result<Json<ResponsePayload>, ApiError> {
    process(Strategy::Concurrent, body).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decode_error_is_bad_request() {
        let response = ApiError::from(Error::Decode("eof".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_task_error_is_internal() {
        let response = ApiError::from(Error::Task("panicked".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_process_single_sorts() {
        let body = Bytes::from_static(br#"{"to_sort": [[3,1,2],[],[5]]}"#);
        let Json(response) = process_single(body).await.unwrap();
        assert_eq!(response.sorted_arrays, vec![vec![1, 2, 3], vec![], vec![5]]);
    }
}
