use anyhow::Context;
use clap::Parser;
use generator::demo::{build_demo_rows, DemoConfig};
use gui_bridge::bridge::GuiBridge;
use gui_bridge::model::ChartPayload;
use session::config::SessionConfig;
use session::runner::Runner;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;

mod generator;
mod gui_bridge;
mod session;

#[derive(Parser)]
#[command(author, version, about = "Variable-star photometry workbench driver")]
struct Args {
    /// Run a single offline session and emit a chart summary
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Load a session config from YAML
    #[arg(long)]
    session: Option<PathBuf>,
    /// Seed the table from a photometry CSV instead of demo data
    #[arg(long)]
    upload: Option<PathBuf>,
    /// Demo table size when no upload is given
    #[arg(long, default_value_t = 14)]
    rows: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Keep the GUI bridge alive for incoming edits
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let session_config = if let Some(path) = args.session {
        SessionConfig::load(path)?
    } else {
        SessionConfig::default()
    };

    let runner = Arc::new(Mutex::new(Runner::new(session_config)));
    let gui_bridge = GuiBridge::new(runner.clone());

    {
        let mut guard = runner.lock().unwrap();
        if let Some(path) = &args.upload {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("reading photometry upload {}", path.display()))?;
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("upload.csv");
            let kept = guard
                .ingest_upload(file_name, &contents)
                .with_context(|| format!("ingesting photometry upload {}", path.display()))?;
            log::info!("loaded {} rows from {}", kept, path.display());
        } else {
            guard.load_rows(build_demo_rows(&DemoConfig {
                rows: args.rows,
                seed: args.seed,
                ..Default::default()
            }));
        }
        guard.apply_session();
    }

    if args.offline {
        let guard = runner.lock().unwrap();
        let summary = guard.summary();
        let payload = ChartPayload::from(guard.controller().chart());
        drop(guard);

        println!(
            "Offline session -> '{}' ({:?}), visible {:?}, {} points",
            summary.title, summary.state, summary.visible_labels, summary.visible_points
        );

        gui_bridge.publish(&payload)?;
        gui_bridge.publish_status("Offline session results ready.");

        let report = format!(
            "title={} state={:?} points={} recomputes={} rejected={}\n",
            summary.title,
            summary.state,
            summary.visible_points,
            summary.recomputes,
            summary.rejected
        );
        let report_path = PathBuf::from("tools/data/offline_session.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        file.write_all(report.as_bytes())?;
    }
    if args.serve {
        gui_bridge.publish_status("HTTP bridge running (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
