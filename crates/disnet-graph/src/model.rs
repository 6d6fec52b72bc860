//! Core graph types: disease-pair nodes, weighted edges, and the immutable
//! snapshot that holds them.
//!
//! Serialized form wraps every node and edge under a `data` key
//! (`{"data": {...}}`), the element layout network visualisation clients
//! consume directly.

use std::collections::{HashMap, HashSet};

use disnet_common::{NetworkError, Result};
use serde::{Deserialize, Serialize};

use crate::normalise::create_edge_id;

pub const INTERPRETABLE_YES: &str = "YES";
pub const INTERPRETABLE_NO: &str = "NO";

// ---------------------------------------------------------------------------
// Node / Edge
// ---------------------------------------------------------------------------

/// A disease-pair key (e.g. `Anxiety_disorder--None`) with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
}

/// A weighted relationship between two disease pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub weight: f64,
    #[serde(default)]
    pub shared_genes: Vec<String>,
    #[serde(default)]
    pub filtered_pathways: Vec<String>,
    /// `YES` / `NO` as judged by the external evaluation; other raw values
    /// are kept verbatim.
    #[serde(default = "default_interpretable")]
    pub interpretable: String,
    #[serde(default, alias = "reason")]
    pub reason_gpt4o: String,
}

fn default_interpretable() -> String {
    INTERPRETABLE_NO.to_string()
}

impl Edge {
    /// True if `node_id` is either endpoint.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// The endpoint opposite `node_id`, if the edge touches it.
    pub fn neighbour_of(&self, node_id: &str) -> Option<&str> {
        if self.source == node_id {
            Some(&self.target)
        } else if self.target == node_id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// `{"data": ...}` wrapper used in persisted snapshots and API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element<T> {
    pub data: T,
}

impl<T> Element<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// On-disk document layout of a [`GraphSnapshot`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub nodes: Vec<Element<Node>>,
    #[serde(default)]
    pub edges: Vec<Element<Edge>>,
}

/// Immutable node/edge collection served by the query engine.
///
/// Nodes are sorted by id; edges keep input order. Lookup indexes are built
/// once in [`GraphSnapshot::from_parts`] and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(into = "SnapshotDocument", try_from = "SnapshotDocument")]
pub struct GraphSnapshot {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_index: HashMap<String, usize>,
    /// Edge id → position of the last edge carrying that id.
    edge_index: HashMap<String, usize>,
    /// Node id → positions of incident edges, in edge order.
    incidence: HashMap<String, Vec<usize>>,
}

impl GraphSnapshot {
    /// Assemble a snapshot, validating that:
    /// - node ids are unique,
    /// - every weight is finite and non-negative,
    /// - every edge id matches `create_edge_id(source, target)`,
    /// - every edge endpoint is a node and every node is an endpoint.
    pub fn from_parts(mut nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let mut node_index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node_index.insert(node.id.clone(), i).is_some() {
                return Err(NetworkError::malformed(
                    None,
                    format!("duplicate node id '{}'", node.id),
                ));
            }
        }

        let mut edge_index = HashMap::with_capacity(edges.len());
        let mut incidence: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(NetworkError::malformed(
                    None,
                    format!("edge '{}' has invalid weight {}", edge.id, edge.weight),
                ));
            }
            let expected = create_edge_id(&edge.source, &edge.target);
            if edge.id != expected {
                return Err(NetworkError::malformed(
                    None,
                    format!("edge id '{}' does not match endpoints (expected '{}')", edge.id, expected),
                ));
            }
            for endpoint in [&edge.source, &edge.target] {
                if !node_index.contains_key(endpoint) {
                    return Err(NetworkError::malformed(
                        None,
                        format!("edge '{}' references unknown node '{}'", edge.id, endpoint),
                    ));
                }
            }

            edge_index.insert(edge.id.clone(), i);
            incidence.entry(edge.source.clone()).or_default().push(i);
            if edge.target != edge.source {
                incidence.entry(edge.target.clone()).or_default().push(i);
            }
        }

        if let Some(orphan) = nodes.iter().find(|n| !incidence.contains_key(&n.id)) {
            return Err(NetworkError::malformed(
                None,
                format!("node '{}' has no edges", orphan.id),
            ));
        }

        Ok(Self { nodes, edges, node_index, edge_index, incidence })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.node_index.get(id).map(|&i| &self.nodes[i])
    }

    /// Lookup by edge id. When several rows share an id the last one wins.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edge_index.get(id).map(|&i| &self.edges[i])
    }

    /// Edges with `node_id` as source or target, in edge order.
    pub fn incident_edges<'a>(&'a self, node_id: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.incidence
            .get(node_id)
            .map(|v| v.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.edges[i])
    }

    /// Number of incident edges, parallel edges included.
    pub fn degree(&self, node_id: &str) -> usize {
        self.incidence.get(node_id).map_or(0, Vec::len)
    }

    /// Number of edges whose id was already taken by an earlier row.
    pub fn duplicate_edge_ids(&self) -> usize {
        self.edges.len() - self.edge_index.len()
    }

    /// Nodes referenced by `edges`, in snapshot (sorted) order.
    pub fn nodes_for_edges<'a, I>(&self, edges: I) -> Vec<&Node>
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let referenced: HashSet<&str> = edges
            .into_iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        self.nodes
            .iter()
            .filter(|n| referenced.contains(n.id.as_str()))
            .collect()
    }
}

impl From<GraphSnapshot> for SnapshotDocument {
    fn from(snapshot: GraphSnapshot) -> Self {
        Self {
            nodes: snapshot.nodes.into_iter().map(Element::new).collect(),
            edges: snapshot.edges.into_iter().map(Element::new).collect(),
        }
    }
}

impl TryFrom<SnapshotDocument> for GraphSnapshot {
    type Error = NetworkError;

    fn try_from(doc: SnapshotDocument) -> Result<Self> {
        GraphSnapshot::from_parts(
            doc.nodes.into_iter().map(|e| e.data).collect(),
            doc.edges.into_iter().map(|e| e.data).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Node {
        Node { id: id.to_string(), label: id.split("--").next().unwrap().replace('_', " ") }
    }

    fn edge(source: &str, target: &str, weight: f64) -> Edge {
        Edge {
            id: create_edge_id(source, target),
            source: source.to_string(),
            target: target.to_string(),
            weight,
            shared_genes: vec![],
            filtered_pathways: vec![],
            interpretable: INTERPRETABLE_NO.to_string(),
            reason_gpt4o: String::new(),
        }
    }

    #[test]
    fn test_from_parts_sorts_nodes_and_indexes() {
        let snapshot = GraphSnapshot::from_parts(
            vec![node("B--None"), node("A--None"), node("C--None")],
            vec![edge("B--None", "A--None", 2.0), edge("C--None", "A--None", 1.0)],
        )
        .unwrap();

        let ids: Vec<&str> = snapshot.nodes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A--None", "B--None", "C--None"]);
        assert_eq!(snapshot.degree("A--None"), 2);
        assert_eq!(snapshot.degree("B--None"), 1);
        assert_eq!(snapshot.edge("A--None__B--None").unwrap().weight, 2.0);
        assert!(snapshot.node("Z--None").is_none());
    }

    #[test]
    fn test_dangling_endpoint_rejected() {
        let err = GraphSnapshot::from_parts(
            vec![node("A--None")],
            vec![edge("A--None", "B--None", 1.0)],
        )
        .unwrap_err();
        assert!(matches!(err, NetworkError::MalformedInput { .. }));
    }

    #[test]
    fn test_negative_or_nan_weight_rejected() {
        for weight in [-500.0, f64::NAN, f64::INFINITY] {
            let err = GraphSnapshot::from_parts(
                vec![node("A--None"), node("B--None")],
                vec![edge("A--None", "B--None", weight)],
            )
            .unwrap_err();
            assert!(err.to_string().contains("invalid weight"), "{weight}: {err}");
        }
    }

    #[test]
    fn test_orphan_node_rejected() {
        let err = GraphSnapshot::from_parts(
            vec![node("A--None"), node("B--None"), node("C--None")],
            vec![edge("A--None", "B--None", 1.0)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("C--None"));
    }

    #[test]
    fn test_mismatched_edge_id_rejected() {
        let mut bad = edge("A--None", "B--None", 1.0);
        bad.id = "B--None__A--None".to_string();
        assert!(GraphSnapshot::from_parts(vec![node("A--None"), node("B--None")], vec![bad]).is_err());
    }

    #[test]
    fn test_duplicate_edge_id_last_wins() {
        let snapshot = GraphSnapshot::from_parts(
            vec![node("A--None"), node("B--None")],
            vec![edge("A--None", "B--None", 1.0), edge("B--None", "A--None", 5.0)],
        )
        .unwrap();

        assert_eq!(snapshot.edge_count(), 2);
        assert_eq!(snapshot.duplicate_edge_ids(), 1);
        let found = snapshot.edge("A--None__B--None").unwrap();
        assert_eq!(found.weight, 5.0);
        assert_eq!(found.source, "B--None");
    }

    #[test]
    fn test_self_loop_counted_once() {
        let snapshot = GraphSnapshot::from_parts(
            vec![node("A--None")],
            vec![edge("A--None", "A--None", 3.0)],
        )
        .unwrap();
        assert_eq!(snapshot.degree("A--None"), 1);
    }

    #[test]
    fn test_document_wraps_under_data() {
        let snapshot = GraphSnapshot::from_parts(
            vec![node("A--None"), node("B--None")],
            vec![edge("A--None", "B--None", 1.5)],
        )
        .unwrap();

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["nodes"][0]["data"]["id"], "A--None");
        assert_eq!(value["nodes"][0]["data"]["label"], "A");
        assert_eq!(value["edges"][0]["data"]["id"], "A--None__B--None");
        assert_eq!(value["edges"][0]["data"]["interpretable"], "NO");

        let back: GraphSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back.nodes(), snapshot.nodes());
        assert_eq!(back.edges(), snapshot.edges());
    }

    #[test]
    fn test_document_missing_optional_fields() {
        let json = r#"{
            "nodes": [{"data": {"id": "A--None", "label": "A"}}, {"data": {"id": "B--x", "label": "B"}}],
            "edges": [{"data": {"id": "A--None__B--x", "source": "A--None", "target": "B--x", "weight": 3}}]
        }"#;
        let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();
        let e = &snapshot.edges()[0];
        assert!(e.shared_genes.is_empty());
        assert_eq!(e.interpretable, INTERPRETABLE_NO);
        assert_eq!(e.reason_gpt4o, "");
    }
}
