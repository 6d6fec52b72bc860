//! Readers racing a reload only ever see one complete snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use disnet_graph::loader::build_from_csv_reader;
use disnet_graph::query::EdgeFilter;
use disnet_graph::{LoadedGraph, SnapshotStore};

const FIXTURE: &str = include_str!("fixtures/disease_pairs.csv");
const SMALL: &str = "pair1,pair2,weight\nGout--None,Psoriasis--None,7\n";

fn graph(csv: &str) -> LoadedGraph {
    let (snapshot, stats) = build_from_csv_reader(csv.as_bytes()).unwrap();
    LoadedGraph::with_stats(snapshot, stats)
}

#[test]
fn test_concurrent_queries_during_reload() {
    let store = Arc::new(SnapshotStore::with_graph(graph(FIXTURE)));
    let done = AtomicBool::new(false);

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let mut observed = 0usize;
                while !done.load(Ordering::Relaxed) || observed == 0 {
                    let engine = store.engine().unwrap();
                    let view = engine.filter_edges(&EdgeFilter::default()).unwrap();
                    let shape = (view.metadata.total_nodes, view.metadata.total_edges);

                    assert!(shape == (12, 10) || shape == (2, 1), "mixed snapshot: {shape:?}");
                    assert_eq!(engine.statistics().total_edges, view.metadata.total_edges);
                    assert_eq!(engine.statistics().total_nodes, view.metadata.total_nodes);

                    let small = shape == (2, 1);
                    assert_eq!(engine.search("gout").unwrap().count, usize::from(small));
                    observed += 1;
                }
            });
        }

        for i in 0..200 {
            let next = if i % 2 == 0 { graph(SMALL) } else { graph(FIXTURE) };
            store.replace(next);
        }
        done.store(true, Ordering::Relaxed);
    });

    assert!(store.is_loaded());
}

#[test]
fn test_failed_reload_keeps_previous_snapshot() {
    let store = SnapshotStore::with_graph(graph(FIXTURE));

    let result = build_from_csv_reader("pair1,pair2,weight\nA--None,B--None,oops\n".as_bytes());
    assert!(result.is_err());

    // nothing was swapped in
    assert_eq!(store.health().edges_count, 10);
}
