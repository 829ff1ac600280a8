//! Sort engine

mod engine;

pub use engine::{sort_concurrent, sort_sequential, timed, Strategy};
