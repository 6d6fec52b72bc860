//! HTTP handlers for all API routes.

pub mod network;
pub mod search;
pub mod stats;
pub mod system;
