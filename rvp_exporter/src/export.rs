// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Batch export of payment receipts to PNG verification codes plus a JSON
//! manifest describing what was written.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rvp_core::{
    assembler::{Assembler, AssemblerConfig, VerificationCode},
    encoder::QrCodeEncoder,
    hash::{SystemClock, VerificationHash},
    manager::{context::channel::ChannelNotifier, ExportManager, FailedExport, Notification},
    receipt::{PayloadVariant, PaymentRecord, VerificationPayload},
};
use serde::{Deserialize, Serialize};

use crate::metrics;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub org_id: String,
    pub output_dir: PathBuf,
    pub assembler: AssemblerConfig,
    pub batch_pause: Duration,
}

impl ExportOptions {
    pub fn new(org_id: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            org_id: org_id.into(),
            output_dir: output_dir.into(),
            assembler: AssemblerConfig::default(),
            batch_pause: DEFAULT_BATCH_PAUSE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub code: String,
    pub hash: VerificationHash,
    pub hash_prefix: String,
    pub variant: PayloadVariant,
    pub payload: VerificationPayload,
    /// Image file name, relative to the manifest
    pub file: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFailure {
    pub code: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub org_id: String,
    pub exported: Vec<ManifestEntry>,
    pub failures: Vec<ManifestFailure>,
}

impl Manifest {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Payment records read from an input file, plus the elements that could not
/// be read as payment records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentBatch {
    pub payments: Vec<PaymentRecord>,
    pub rejected: Vec<ManifestFailure>,
}

impl PaymentBatch {
    /// Splits the elements of a JSON array into payment records and
    /// rejected elements. One malformed element never rejects the others.
    pub fn from_values(values: Vec<serde_json::Value>) -> Self {
        let mut batch = Self::default();
        for (index, value) in values.into_iter().enumerate() {
            let code = value
                .get("code")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            match serde_json::from_value::<PaymentRecord>(value) {
                Ok(payment) => batch.payments.push(payment),
                Err(err) => {
                    warn!("Payment record {index} ({code:?}) rejected: {err}");
                    batch.rejected.push(ManifestFailure {
                        code,
                        error: format!("record {index}: {err}"),
                    });
                }
            }
        }
        batch
    }

    /// Number of elements read, rejected ones included.
    pub fn len(&self) -> usize {
        self.payments.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<PaymentRecord>> for PaymentBatch {
    fn from(payments: Vec<PaymentRecord>) -> Self {
        Self {
            payments,
            rejected: Vec::new(),
        }
    }
}

/// Reads a JSON array of payment records.
///
/// Fails only when the file cannot be read or is not a JSON array. Elements
/// that are not valid payment records end up in [`PaymentBatch::rejected`].
pub fn read_payments(path: &Path) -> Result<PaymentBatch> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payments from {}", path.display()))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse payments in {}", path.display()))?;
    Ok(PaymentBatch::from_values(values))
}

/// Longest part of a receipt code kept in an image file name.
pub const MAX_FILE_STEM_CHARS: usize = 64;

/// Maps the `ordinal`-th exported receipt to a file name that is safe on every
/// platform and unique within one export.
pub fn image_file_name(ordinal: usize, code: &str) -> String {
    let stem: String = code
        .chars()
        .take(MAX_FILE_STEM_CHARS)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{ordinal:04}_{stem}.png")
}

/// Exports every payment in order, writes one PNG per exported receipt and
/// the manifest into `options.output_dir`, and returns the manifest.
///
/// Receipts that fail, whether rejected on input, during export or while
/// writing their image, are listed in the manifest instead of aborting the
/// run. Errors are returned only when the output directory or the manifest
/// itself cannot be written.
pub async fn export_payments(batch: &PaymentBatch, options: &ExportOptions) -> Result<Manifest> {
    tokio::fs::create_dir_all(&options.output_dir)
        .await
        .with_context(|| format!("Failed to create {}", options.output_dir.display()))?;

    let (notifier, mut notifications) = ChannelNotifier::new();
    let progress = tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            metrics::record(&notification);
            if let Notification::Failed { code, message } = &notification {
                warn!("Receipt {code:?} skipped: {message}");
            }
        }
    });

    let manager = ExportManager::new(
        notifier,
        Assembler::new(QrCodeEncoder, options.assembler),
        Arc::new(SystemClock),
        options.org_id.as_str(),
    )
    .with_batch_pause(options.batch_pause);
    let report = manager.export_batch(&batch.payments).await;
    // Closes the channel so the progress task can finish.
    drop(manager);
    progress.await?;

    let mut manifest = Manifest {
        org_id: options.org_id.clone(),
        ..Manifest::default()
    };
    for rejected in &batch.rejected {
        metrics::record_failure();
        manifest.failures.push(rejected.clone());
    }
    manifest
        .failures
        .extend(
            report
                .failed
                .iter()
                .map(|FailedExport { code, error }| ManifestFailure {
                    code: code.clone(),
                    error: error.to_string(),
                }),
        );
    for (index, code) in report.exported.iter().enumerate() {
        let file = image_file_name(index + 1, code.code());
        match write_code(&options.output_dir, file, code).await {
            Ok(entry) => manifest.exported.push(entry),
            Err(err) => {
                warn!("Receipt {:?} skipped: {err:#}", code.code());
                metrics::record_failure();
                manifest.failures.push(ManifestFailure {
                    code: code.code().to_string(),
                    error: format!("{err:#}"),
                });
            }
        }
    }

    let manifest_path = options.output_dir.join(MANIFEST_FILE_NAME);
    tokio::fs::write(&manifest_path, serde_json::to_vec_pretty(&manifest)?)
        .await
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
    info!(
        "Wrote {} codes and {} failures to {}",
        manifest.exported.len(),
        manifest.failures.len(),
        manifest_path.display()
    );
    Ok(manifest)
}

async fn write_code(
    output_dir: &Path,
    file: String,
    code: &VerificationCode,
) -> Result<ManifestEntry> {
    let path = output_dir.join(&file);
    tokio::fs::write(&path, &code.image.png)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    debug!("Wrote {}", path.display());

    Ok(ManifestEntry {
        code: code.code().to_string(),
        hash: code.verification_hash.clone(),
        hash_prefix: code.hash_prefix().to_string(),
        variant: code.variant(),
        payload: code.payload.clone(),
        file,
    })
}
