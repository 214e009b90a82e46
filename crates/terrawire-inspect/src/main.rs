//! terrawire-inspect
//!
//! Usage: `terrawire-inspect [--config terrawire.yaml] <capture>...`
//!
//! - Capture files are decoded in parallel, one blocking task per file
//! - Per-frame lines go to stdout in file order, counters at the end
//! - Log level via `RUST_LOG`

use std::process::ExitCode;
use std::sync::Arc;

use bytes::Bytes;
use tracing_subscriber::{fmt, EnvFilter};

use terrawire_inspect::config::{self, InspectConfig};
use terrawire_inspect::inspect::{FileReport, Inspector};
use terrawire_inspect::stats::DecodeStats;

struct Args {
    config: Option<String>,
    files: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        files: Vec::new(),
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                args.config = Some(it.next().ok_or("--config needs a path")?);
            }
            _ => args.files.push(arg),
        }
    }
    if args.files.is_empty() {
        return Err("usage: terrawire-inspect [--config <file>] <capture>...".into());
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::from(2);
        }
    };

    let cfg = match &args.config {
        Some(path) => match config::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!(code = e.code().as_str(), error = %e, "config load failed");
                return ExitCode::from(2);
            }
        },
        None => InspectConfig::default(),
    };

    tracing::info!(
        context = ?cfg.inspect.context,
        format = ?cfg.inspect.format,
        files = args.files.len(),
        "terrawire-inspect starting"
    );

    let stats = Arc::new(DecodeStats::default());
    let inspector = Inspector::new(cfg.inspect, stats.clone());

    let mut tasks = Vec::with_capacity(args.files.len());
    for path in args.files {
        let inspector = inspector.clone();
        tasks.push(tokio::spawn(async move {
            let data = match tokio::fs::read(&path).await {
                Ok(d) => Bytes::from(d),
                Err(e) => {
                    tracing::error!(%path, error = %e, "read capture failed");
                    return None;
                }
            };
            tokio::task::spawn_blocking(move || inspector.inspect_capture(&path, data))
                .await
                .ok()
        }));
    }

    let mut failed = false;
    for task in tasks {
        match task.await {
            Ok(Some(report)) => {
                failed |= report.failed > 0;
                print_report(&report);
            }
            _ => failed = true,
        }
    }

    print!("{}", stats.render());
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_report(report: &FileReport) {
    println!("== {} ({} decoded, {} failed)", report.source, report.decoded, report.failed);
    for line in &report.lines {
        println!("{line}");
    }
}
