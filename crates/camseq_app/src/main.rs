// SPDX-License-Identifier: MIT OR Apache-2.0
//! `camseq` - merge per-frame cameras into one animated camera.
//!
//! Runs a RON job file against a saved scene: detects the camera sequence,
//! merges it, optionally binds a background plate, writes the scene back and
//! prints a JSON report on stdout.
//!
//! Log output goes to stderr and follows `RUST_LOG`.

mod error;
mod job;

use error::AppError;
use job::Job;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn run() -> error::Result<()> {
    let path = std::env::args().nth(1).map(PathBuf::from).ok_or(AppError::Usage)?;

    let job = Job::load(&path)?;
    tracing::info!("Running job {}", path.display());

    let report = job.run()?;
    tracing::info!("Wrote {}", job.output_path().display());

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    let mut env_filter = EnvFilter::from_default_env();
    for directive in ["camseq_app=info", "camseq_merge=info"] {
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting camseq v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        tracing::error!("Job failed: {e}");
        std::process::exit(1);
    }
}
