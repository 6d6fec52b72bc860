//! Holder for the currently served snapshot.
//!
//! Readers clone an `Arc` under a short read lock and query without holding
//! it. A reload builds the replacement completely, then swaps the `Arc`, so a
//! query sees either the old graph or the new one in full.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use disnet_common::{NetworkError, Result};
use serde::Serialize;
use tracing::info;

use crate::model::GraphSnapshot;
use crate::query::QueryEngine;
use crate::stats::NetworkStatistics;

/// A snapshot together with its statistics and load time.
#[derive(Debug)]
pub struct LoadedGraph {
    pub snapshot: GraphSnapshot,
    pub stats: NetworkStatistics,
    pub loaded_at: DateTime<Utc>,
}

impl LoadedGraph {
    pub fn new(snapshot: GraphSnapshot) -> Self {
        let stats = NetworkStatistics::compute(&snapshot);
        Self::with_stats(snapshot, stats)
    }

    pub fn with_stats(snapshot: GraphSnapshot, stats: NetworkStatistics) -> Self {
        Self { snapshot, stats, loaded_at: Utc::now() }
    }
}

/// Readiness report derived from whether a snapshot is held.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub nodes_count: usize,
    pub edges_count: usize,
    pub loaded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<LoadedGraph>>>,
}

impl SnapshotStore {
    /// An empty store; queries fail with `NotReady` until the first load.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph(graph: LoadedGraph) -> Self {
        Self { current: RwLock::new(Some(Arc::new(graph))) }
    }

    /// The graph currently served, if any.
    pub fn current(&self) -> Option<Arc<LoadedGraph>> {
        // The guarded value is a single Option<Arc>, never left half-written,
        // so a poisoned lock still holds a consistent value.
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    /// Query engine over the current graph.
    pub fn engine(&self) -> Result<QueryEngine> {
        self.current().map(QueryEngine::new).ok_or(NetworkError::NotReady)
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    /// Atomically replace the served graph, returning the previous one.
    pub fn replace(&self, graph: LoadedGraph) -> Option<Arc<LoadedGraph>> {
        let graph = Arc::new(graph);
        info!(
            "Serving snapshot: {} nodes, {} edges",
            graph.snapshot.node_count(),
            graph.snapshot.edge_count()
        );
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        guard.replace(graph)
    }

    pub fn health(&self) -> Health {
        match self.current() {
            Some(graph) => Health {
                status: "healthy",
                nodes_count: graph.snapshot.node_count(),
                edges_count: graph.snapshot.edge_count(),
                loaded_at: Some(graph.loaded_at),
            },
            None => Health {
                status: "no_data",
                nodes_count: 0,
                edges_count: 0,
                loaded_at: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_is_not_ready() {
        let store = SnapshotStore::new();
        assert!(matches!(store.engine(), Err(NetworkError::NotReady)));
        let health = store.health();
        assert_eq!(health.status, "no_data");
        assert_eq!(health.edges_count, 0);
        assert!(health.loaded_at.is_none());
    }

    #[test]
    fn test_replace_returns_previous() {
        let store = SnapshotStore::new();
        assert!(store.replace(LoadedGraph::new(GraphSnapshot::default())).is_none());
        assert!(store.is_loaded());
        assert!(store.replace(LoadedGraph::new(GraphSnapshot::default())).is_some());
        assert_eq!(store.health().status, "healthy");
    }

    #[test]
    fn test_engine_keeps_old_graph_after_swap() {
        let store = SnapshotStore::with_graph(LoadedGraph::new(GraphSnapshot::default()));
        let before = store.engine().unwrap();
        let first = store.current().unwrap();

        store.replace(LoadedGraph::new(GraphSnapshot::default()));

        let second = store.current().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        // in-flight engine still reads the graph it was created with
        assert_eq!(before.snapshot().edge_count(), 0);
        assert_eq!(Arc::strong_count(&first), 2);
    }
}
