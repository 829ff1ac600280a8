//! HTTP API layer

pub mod codec;
mod routes;
mod handlers;

pub use handlers::{ApiError, INVALID_PAYLOAD};
pub use routes::{create_router, create_router_with_cors, ApiDoc};
