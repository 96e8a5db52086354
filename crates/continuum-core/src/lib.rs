//! Core types and pure logic for the Continuum habit tracker.
//!
//! The streak engine (`schedule` + `streak`) is synchronous and free of I/O.
//! Everything else in the workspace depends on this crate; it has no HTTP or
//! database dependencies of its own.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod clock;
pub mod day;
pub mod error;
pub mod habit;
pub mod heatmap;
pub mod schedule;
pub mod store;
pub mod streak;
pub mod summary;

pub use error::{Error, Result};
