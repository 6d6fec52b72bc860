//! disnet-graph: Disease network construction and querying.
//!
//! Raw CSV rows are normalised into nodes/edges, assembled into an immutable
//! [`GraphSnapshot`], and served read-only through the [`QueryEngine`].

pub mod model;
pub mod normalise;
pub mod stats;
pub mod builder;
pub mod query;
pub mod store;
pub mod loader;

pub use model::{Edge, Element, GraphSnapshot, Node, INTERPRETABLE_NO, INTERPRETABLE_YES};
pub use normalise::{create_edge_id, extract_disease_name, parse_list_field, RawRecord};
pub use stats::{percentile, NetworkStatistics};
pub use builder::GraphBuilder;
pub use query::{EdgeFilter, QueryEngine};
pub use store::{LoadedGraph, SnapshotStore};
