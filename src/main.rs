use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use lane_ingest::aggregate::{IngestionRun, ingest_dir};
use lane_ingest::export::{export_json, export_json_to_path};
use lane_ingest::ingestion::{IngestionOptions, TracingObserver};
use lane_ingest::store::SnapshotStore;
use lane_ingest::types::MarkerSet;
use lane_ingest::{logging, service};

/// Locate lane headers in CSV/spreadsheet exports and publish classified lane status.
#[derive(Debug, Parser)]
#[command(name = "lane-ingest", version, about)]
struct Cli {
    /// Directory scanned (non-recursively) for .xlsx/.xls/.ods/.csv files.
    #[arg(long, env = "LANE_INGEST_DIR", default_value = ".", global = true)]
    dir: PathBuf,

    /// The three comma separated header labels to locate.
    #[arg(long, env = "LANE_INGEST_MARKERS", default_value = "UL1,UL2,UL3", global = true)]
    markers: MarkerSet,

    /// Log filter (overridden by RUST_LOG).
    #[arg(long, env = "LANE_INGEST_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ingest once and write the collection as a JSON array.
    Export {
        /// Output path, or `-` for stdout.
        #[arg(short, long, default_value = "output.json")]
        output: PathBuf,

        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
    /// Ingest once at startup and serve the collection over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, env = "LANE_INGEST_BIND", default_value = "0.0.0.0:8000")]
        bind: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let options = IngestionOptions {
        markers: cli.markers.clone(),
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    tracing::info!(dir = %cli.dir.display(), markers = %options.markers, "starting ingestion");
    let run = ingest_dir(&cli.dir, &options)
        .with_context(|| format!("could not compute records from '{}'", cli.dir.display()))?;
    log_run(&run);

    match cli.command {
        Command::Export { output, pretty } => {
            if output.as_os_str() == "-" {
                let stdout = std::io::stdout();
                export_json(&run.collection, stdout.lock(), pretty)?;
                println!();
            } else {
                export_json_to_path(&run.collection, &output, pretty)?;
            }
        }
        Command::Serve { bind } => {
            let store = Arc::new(SnapshotStore::new());
            store.replace(run.collection);
            service::serve(store, bind, async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "failed to listen for ctrl-c; serving until killed");
                    std::future::pending::<()>().await;
                }
            })
            .await;
        }
    }

    Ok(())
}

fn log_run(run: &IngestionRun) {
    if run.collection.is_empty() {
        tracing::warn!(
            files = run.files.len(),
            "no file contributed records; the collection is empty"
        );
    } else {
        tracing::info!(
            records = run.collection.len(),
            files = run.loaded_files(),
            "records ready"
        );
    }
}
