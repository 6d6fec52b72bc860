//! disnet-common: Shared error types used across all disnet crates.

pub mod error;

pub use error::{ApiError, NetworkError, Result};
