//! Core types and errors for the gridline layout engine.
//!
//! This crate provides the foundational types used across the other gridline crates:
//! - `Interval`, the half-open cell range that doubles as a constraint edge
//! - Size and measurement request types shared with the host
//! - Error types

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::*;
