//! Graph assembly from normalised rows.
//!
//! Build policy: the first malformed row aborts the whole build with its row
//! number. Rows sharing an unordered endpoint pair are all kept as edges; the
//! collision is logged and id lookups resolve to the last such row.

use std::collections::{BTreeSet, HashSet};

use disnet_common::Result;
use tracing::{error, info, warn};

use crate::model::{Edge, GraphSnapshot, Node};
use crate::normalise::{extract_disease_name, normalize, RawRecord};
use crate::stats::NetworkStatistics;

#[derive(Debug, Default)]
pub struct GraphBuilder {
    node_ids: BTreeSet<String>,
    edges: Vec<Edge>,
    seen_edge_ids: HashSet<String>,
    rows: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot and its statistics from a full row stream.
    pub fn build<I>(rows: I) -> Result<(GraphSnapshot, NetworkStatistics)>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut builder = Self::new();
        for record in rows {
            builder.push(&record)?;
        }
        builder.finish()
    }

    /// Normalise and append one row. Rows are numbered from 1 in push order.
    pub fn push(&mut self, record: &RawRecord) -> Result<()> {
        self.rows += 1;
        let row = self.rows;

        let edge = normalize(record, Some(row)).map_err(|e| {
            error!("Rejecting row {}: {}", row, e);
            e
        })?;

        if !self.seen_edge_ids.insert(edge.id.clone()) {
            warn!("Row {} repeats edge id '{}'; later row wins id lookups", row, edge.id);
        }

        self.node_ids.insert(edge.source.clone());
        self.node_ids.insert(edge.target.clone());
        self.edges.push(edge);
        Ok(())
    }

    /// Number of rows accepted so far.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn finish(self) -> Result<(GraphSnapshot, NetworkStatistics)> {
        let nodes = self
            .node_ids
            .into_iter()
            .map(|id| {
                let label = extract_disease_name(&id)?;
                Ok(Node { id, label })
            })
            .collect::<Result<Vec<_>>>()?;

        let snapshot = GraphSnapshot::from_parts(nodes, self.edges)?;
        let stats = NetworkStatistics::compute(&snapshot);

        info!(
            "Built network: {} nodes, {} edges ({} duplicate edge ids)",
            stats.total_nodes, stats.total_edges, stats.duplicate_edge_ids
        );
        Ok((snapshot, stats))
    }
}
