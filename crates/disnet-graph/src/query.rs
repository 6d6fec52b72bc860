//! Read-only query operations over a loaded snapshot.
//!
//! Every operation builds its own result from the shared, immutable
//! [`GraphSnapshot`]; nothing here takes a lock or mutates state.

use std::collections::HashSet;
use std::sync::Arc;

use disnet_common::{NetworkError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{Edge, Element, GraphSnapshot, Node};
use crate::stats::{mean, NetworkStatistics};
use crate::store::LoadedGraph;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Optional predicates for [`QueryEngine::filter_edges`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeFilter {
    /// Keep edges with `weight >= min_weight`.
    pub min_weight: Option<f64>,
    /// Exact (case-insensitive on input) interpretability flag.
    pub interpretability: Option<String>,
    /// When positive: sort by weight descending and keep this many.
    pub limit: Option<i64>,
}

impl EdgeFilter {
    /// Reject non-finite thresholds and limits above `max_limit`.
    pub fn validate(&self, max_limit: usize) -> Result<()> {
        if let Some(w) = self.min_weight {
            if !w.is_finite() {
                return Err(NetworkError::Validation(format!("min_weight must be a finite number, got {w}")));
            }
        }
        if let Some(limit) = self.limit {
            if limit > 0 && limit as u64 > max_limit as u64 {
                return Err(NetworkError::Validation(format!(
                    "limit {limit} exceeds the maximum of {max_limit}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkMetadata {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub filters_applied: EdgeFilter,
}

/// Filtered subgraph: surviving edges plus the nodes they reference.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkView {
    pub nodes: Vec<Element<Node>>,
    pub edges: Vec<Element<Edge>>,
    pub metadata: NetworkMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeEdgesMetadata {
    pub total_edges: usize,
    pub avg_weight: f64,
}

/// One node with all incident edges.
#[derive(Debug, Clone, Serialize)]
pub struct NodeEdges {
    pub disease: Element<Node>,
    pub edges: Vec<Element<Edge>>,
    /// Distinct neighbour ids; parallel edges count once.
    pub connected_diseases_count: usize,
    pub metadata: NodeEdgesMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeMetrics {
    pub num_shared_genes: usize,
    pub num_pathways: usize,
    pub weight_log10: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EdgeDetail {
    pub edge: Element<Edge>,
    pub source_disease: Element<Node>,
    pub target_disease: Element<Node>,
    pub metadata: EdgeMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub label: String,
    /// Incident edges, parallel edges counted individually.
    pub edge_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub results: Vec<SearchHit>,
    pub count: usize,
    pub query: String,
}

/// `log10(weight + 1)` for positive weights, otherwise 0.
pub fn weight_log10(weight: f64) -> f64 {
    if weight > 0.0 {
        (weight + 1.0).log10()
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Query façade over one loaded snapshot. Cheap to clone.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    graph: Arc<LoadedGraph>,
}

impl QueryEngine {
    pub fn new(graph: Arc<LoadedGraph>) -> Self {
        Self { graph }
    }

    /// Wrap a freshly built snapshot, computing its statistics.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        Self::new(Arc::new(LoadedGraph::new(snapshot)))
    }

    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.graph.snapshot
    }

    pub fn statistics(&self) -> &NetworkStatistics {
        &self.graph.stats
    }

    /// Filter edges by weight threshold and interpretability, optionally
    /// keeping only the `limit` heaviest.
    pub fn filter_edges(&self, filter: &EdgeFilter) -> Result<NetworkView> {
        filter.validate(usize::MAX)?;
        let snapshot = self.snapshot();

        let wanted_flag = filter.interpretability.as_ref().map(|s| s.to_uppercase());
        let mut edges: Vec<&Edge> = snapshot
            .edges()
            .iter()
            .filter(|e| filter.min_weight.map_or(true, |min| e.weight >= min))
            .filter(|e| wanted_flag.as_ref().map_or(true, |flag| &e.interpretable == flag))
            .collect();

        if let Some(limit) = filter.limit.filter(|&l| l > 0) {
            // stable: equal weights keep their relative order
            edges.sort_by(|a, b| b.weight.total_cmp(&a.weight));
            edges.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }

        let nodes: Vec<Element<Node>> = snapshot
            .nodes_for_edges(edges.iter().copied())
            .into_iter()
            .cloned()
            .map(Element::new)
            .collect();
        let edges: Vec<Element<Edge>> = edges.into_iter().cloned().map(Element::new).collect();

        debug!(
            "filter_edges {:?} -> {} nodes, {} edges",
            filter,
            nodes.len(),
            edges.len()
        );

        Ok(NetworkView {
            metadata: NetworkMetadata {
                total_nodes: nodes.len(),
                total_edges: edges.len(),
                filters_applied: filter.clone(),
            },
            nodes,
            edges,
        })
    }

    /// All edges incident to `node_id`.
    ///
    /// A node with no edges cannot exist in a snapshot, so "unknown id" and
    /// "no edges" are the same `NotFound`.
    pub fn get_node_edges(&self, node_id: &str) -> Result<NodeEdges> {
        let snapshot = self.snapshot();
        let edges: Vec<&Edge> = snapshot.incident_edges(node_id).collect();
        if edges.is_empty() {
            return Err(NetworkError::NotFound(format!("Disease '{node_id}' not found")));
        }
        let node = snapshot
            .node(node_id)
            .ok_or_else(|| NetworkError::NotFound(format!("Disease '{node_id}' not found")))?;

        let neighbours: HashSet<&str> = edges.iter().filter_map(|e| e.neighbour_of(node_id)).collect();
        let weights: Vec<f64> = edges.iter().map(|e| e.weight).collect();

        debug!("get_node_edges {} -> {} edges", node_id, edges.len());

        Ok(NodeEdges {
            disease: Element::new(node.clone()),
            connected_diseases_count: neighbours.len(),
            metadata: NodeEdgesMetadata {
                total_edges: edges.len(),
                avg_weight: mean(&weights),
            },
            edges: edges.into_iter().cloned().map(Element::new).collect(),
        })
    }

    /// Edge by id with its endpoint nodes and derived metrics.
    pub fn get_edge(&self, edge_id: &str) -> Result<EdgeDetail> {
        let snapshot = self.snapshot();
        let edge = snapshot
            .edge(edge_id)
            .ok_or_else(|| NetworkError::NotFound(format!("Edge '{edge_id}' not found")))?;

        let endpoint = |id: &str| {
            snapshot
                .node(id)
                .cloned()
                .map(Element::new)
                .ok_or_else(|| NetworkError::NotFound(format!("Disease '{id}' not found")))
        };

        Ok(EdgeDetail {
            source_disease: endpoint(&edge.source)?,
            target_disease: endpoint(&edge.target)?,
            metadata: EdgeMetrics {
                num_shared_genes: edge.shared_genes.len(),
                num_pathways: edge.filtered_pathways.len(),
                weight_log10: weight_log10(edge.weight),
            },
            edge: Element::new(edge.clone()),
        })
    }

    /// Case-insensitive substring search over node labels and ids.
    pub fn search(&self, keyword: &str) -> Result<SearchResults> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Err(NetworkError::Validation("keyword must not be empty".to_string()));
        }

        let snapshot = self.snapshot();
        let results: Vec<SearchHit> = snapshot
            .nodes()
            .iter()
            .filter(|n| n.label.to_lowercase().contains(&needle) || n.id.to_lowercase().contains(&needle))
            .map(|n| SearchHit {
                id: n.id.clone(),
                label: n.label.clone(),
                edge_count: snapshot.degree(&n.id),
            })
            .collect();

        debug!("search '{}' -> {} hits", keyword, results.len());

        Ok(SearchResults {
            count: results.len(),
            results,
            query: keyword.to_string(),
        })
    }
}
