//! Convert the disease-pair CSV into a persisted network snapshot.
//!
//! Run with: cargo run -p disnet-web --bin build-snapshot -- --csv pairs.csv

use std::path::PathBuf;

use clap::Parser;
use disnet_graph::loader::{build_from_csv_path, save_snapshot};

#[derive(Debug, Parser)]
#[command(name = "build-snapshot", about = "Build the disease network snapshot from CSV")]
struct Args {
    /// Input CSV with pair1, pair2, weight, ... columns
    #[arg(long, default_value = "data/pathway_network_result_with_gpt4o_evaluation.csv")]
    csv: PathBuf,

    /// Output snapshot document
    #[arg(long, short, default_value = "data/processed_network.json")]
    output: PathBuf,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    disnet_web::telemetry::init("disnet=info,info");
    let args = Args::parse();

    let (snapshot, stats) = build_from_csv_path(&args.csv).await?;
    save_snapshot(&args.output, &snapshot, !args.compact).await?;

    println!("\n=== Network Statistics ===");
    let stats_json = serde_json::to_value(&stats)?;
    if let Some(fields) = stats_json.as_object() {
        for (key, value) in fields {
            println!("{key}: {value}");
        }
    }

    println!("\n=== Sample Output ===");
    println!("Total nodes: {}", snapshot.node_count());
    println!("Total edges: {}", snapshot.edge_count());

    if let (Some(node), Some(edge)) = (snapshot.nodes().first(), snapshot.edges().first()) {
        println!("\nFirst node example:");
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "data": node }))?);
        println!("\nFirst edge example:");
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "data": edge }))?);
    }

    Ok(())
}
