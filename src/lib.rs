//! sortd - Batch integer-sequence sorting over HTTP, sequential or concurrent

pub mod config;
pub mod error;
pub mod types;

pub mod sort;
pub mod api;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
pub use server::{Server, ServerHandle};
pub use types::*;
