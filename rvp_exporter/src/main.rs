// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Result};
use clap::Parser;
use log::{debug, info};
use rvp_core::assembler::{AssemblerConfig, DEFAULT_CAPACITY_BYTES, DEFAULT_IMAGE_SIZE};
use rvp_exporter::{
    export::{export_payments, read_payments, ExportOptions},
    metrics,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of payment records.
    #[arg(long, env = "RVP_INPUT")]
    input: PathBuf,

    /// Identifier of the issuing organization (e.g. its RUC).
    #[arg(long, env = "RVP_ORG_ID")]
    org_id: String,

    /// Directory that receives one PNG per receipt and the manifest.
    #[arg(long, env = "RVP_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Largest serialized payload, in bytes, that still embeds the compact document.
    /// Defaults to 2000.
    #[arg(long, default_value_t = DEFAULT_CAPACITY_BYTES, env = "RVP_CAPACITY_BYTES")]
    capacity_bytes: usize,

    /// Minimum width of the rendered code, in pixels.
    /// Defaults to 200.
    #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE, env = "RVP_IMAGE_SIZE")]
    image_size: u32,

    /// Pause between two consecutive receipts, in milliseconds.
    /// Defaults to 200.
    #[arg(long, default_value_t = 200, env = "RVP_BATCH_PAUSE_MS")]
    batch_pause_ms: u64,

    /// Where to write the export counters in Prometheus text format.
    #[arg(long, env = "RVP_METRICS_PATH")]
    metrics_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger.
    // Set the log level by setting the RUST_LOG environment variable.
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    debug!("Settings: {:?}", args);

    let batch = read_payments(&args.input)?;
    info!(
        "Loaded {} payments from {} ({} rejected)",
        batch.len(),
        args.input.display(),
        batch.rejected.len()
    );

    let options = ExportOptions {
        org_id: args.org_id,
        output_dir: args.output_dir,
        assembler: AssemblerConfig {
            capacity_bytes: args.capacity_bytes,
            image_size: args.image_size,
            ..AssemblerConfig::default()
        },
        batch_pause: Duration::from_millis(args.batch_pause_ms),
    };
    let manifest = export_payments(&batch, &options).await?;

    if let Some(path) = &args.metrics_path {
        metrics::write_to(path).await?;
        info!("Metrics written to {}", path.display());
    }

    if !manifest.is_complete() {
        bail!(
            "{} of {} receipts could not be exported, see {}",
            manifest.failures.len(),
            batch.len(),
            options.output_dir.display()
        );
    }
    info!("Done.");
    Ok(())
}
