//! Shared application state for the web server.

use std::sync::Arc;

use disnet_common::Result;
use disnet_config::{Config, DataConfig, DataSource};
use disnet_graph::loader::SnapshotSource;
use disnet_graph::store::Health;
use disnet_graph::SnapshotStore;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub source: SnapshotSource,
    pub config: Arc<Config>,
    /// Serialises reloads; queries never touch it.
    reload_lock: Mutex<()>,
}

impl AppState {
    /// State with an empty store; call [`AppState::reload`] to load data.
    pub fn new(config: Config) -> Self {
        Self::with_store(config, SnapshotStore::new())
    }

    pub fn with_store(config: Config, store: SnapshotStore) -> Self {
        Self {
            store: Arc::new(store),
            source: source_for(&config.data),
            config: Arc::new(config),
            reload_lock: Mutex::new(()),
        }
    }

    /// Rebuild from the configured source and swap the result in.
    /// On failure the current snapshot stays in service.
    pub async fn reload(&self) -> Result<Health> {
        let _guard = self.reload_lock.lock().await;
        info!("Reloading network from {:?}", self.source);

        match self.source.load().await {
            Ok(graph) => {
                self.store.replace(graph);
                Ok(self.store.health())
            }
            Err(e) => {
                warn!("Reload from {:?} failed, keeping current snapshot: {}", self.source.path(), e);
                Err(e)
            }
        }
    }
}

pub fn source_for(data: &DataConfig) -> SnapshotSource {
    match data.source {
        DataSource::Csv => SnapshotSource::Csv(data.csv_path.clone()),
        DataSource::Snapshot => SnapshotSource::Json(data.snapshot_path.clone()),
    }
}

pub type SharedState = Arc<AppState>;
