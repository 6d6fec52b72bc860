//! disnet-web: HTTP API over the disease network.
//! Provides:
//!   - Filtered network listing for visualisation clients
//!   - Per-disease and per-edge detail lookups
//!   - Keyword search and network statistics
//!   - Health/readiness and snapshot reload

pub mod router;
pub mod handlers;
pub mod state;
pub mod telemetry;
