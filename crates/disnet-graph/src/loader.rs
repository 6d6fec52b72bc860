//! File I/O around the builder: CSV ingestion and JSON snapshot persistence.

use std::io::Read;
use std::path::{Path, PathBuf};

use disnet_common::{NetworkError, Result};
use tracing::{debug, info};

use crate::builder::GraphBuilder;
use crate::model::GraphSnapshot;
use crate::normalise::RawRecord;
use crate::stats::NetworkStatistics;
use crate::store::LoadedGraph;

/// Build a graph from CSV text with a header row naming the columns
/// `pair1`, `pair2`, `weight`, `shared_genes`, `filtered_pathways`,
/// `interpretability_gpt4o`, `reason_gpt4o`. Extra columns are ignored.
pub fn build_from_csv_reader<R: Read>(reader: R) -> Result<(GraphSnapshot, NetworkStatistics)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut builder = GraphBuilder::new();
    for result in csv_reader.deserialize::<RawRecord>() {
        let record = result.map_err(|e| {
            NetworkError::malformed(Some(builder.row_count() + 1), format!("unreadable CSV record: {e}"))
        })?;
        builder.push(&record)?;
    }
    debug!("Read {} CSV rows", builder.row_count());
    builder.finish()
}

/// Read and build from a CSV file.
pub async fn build_from_csv_path(path: &Path) -> Result<(GraphSnapshot, NetworkStatistics)> {
    info!("Loading data from {:?}", path);
    let content = tokio::fs::read(path).await?;
    build_from_csv_reader(content.as_slice())
}

/// Parse a persisted snapshot document. Invariants are re-checked.
pub fn snapshot_from_json(bytes: &[u8]) -> Result<GraphSnapshot> {
    serde_json::from_slice(bytes)
        .map_err(|e| NetworkError::malformed(None, format!("invalid snapshot document: {e}")))
}

pub async fn load_snapshot(path: &Path) -> Result<GraphSnapshot> {
    info!("Loading snapshot from {:?}", path);
    let bytes = tokio::fs::read(path).await?;
    let snapshot = snapshot_from_json(&bytes)?;
    info!(
        "Loaded {} nodes and {} edges",
        snapshot.node_count(),
        snapshot.edge_count()
    );
    Ok(snapshot)
}

/// Write the snapshot document, creating parent directories as needed.
pub async fn save_snapshot(path: &Path, snapshot: &GraphSnapshot, pretty: bool) -> Result<()> {
    info!("Saving network data to {:?}", path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = if pretty {
        serde_json::to_vec_pretty(snapshot)?
    } else {
        serde_json::to_vec(snapshot)?
    };
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Where a served graph comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    Csv(PathBuf),
    Json(PathBuf),
}

impl SnapshotSource {
    pub fn path(&self) -> &Path {
        match self {
            SnapshotSource::Csv(p) | SnapshotSource::Json(p) => p,
        }
    }

    /// Build or load the graph in full. Nothing is published here; the caller
    /// swaps the result into a [`crate::SnapshotStore`].
    pub async fn load(&self) -> Result<LoadedGraph> {
        match self {
            SnapshotSource::Csv(path) => {
                let (snapshot, stats) = build_from_csv_path(path).await?;
                Ok(LoadedGraph::with_stats(snapshot, stats))
            }
            SnapshotSource::Json(path) => Ok(LoadedGraph::new(load_snapshot(path).await?)),
        }
    }
}
