// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::Result;
use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};
use rvp_core::manager::Notification;

// Register the metrics into the global metrics registry.
lazy_static! {
    static ref CODES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "rvp_codes_total",
        "Number of verification codes exported, by payload variant.",
        &["variant"]
    )
    .unwrap();
    static ref EXPORT_FAILURES_TOTAL: IntCounter = register_int_counter!(
        "rvp_export_failures_total",
        "Number of receipts that could not be exported (for any reason)."
    )
    .unwrap();
}

/// Counts one export outcome.
pub fn record(notification: &Notification) {
    match notification {
        Notification::Exported { variant, .. } => {
            let label: &str = variant.as_ref();
            CODES_TOTAL.with_label_values(&[label]).inc()
        }
        Notification::Failed { .. } => record_failure(),
    }
}

/// Counts one receipt that did not end up as an image on disk.
pub fn record_failure() {
    EXPORT_FAILURES_TOTAL.inc()
}

/// Renders every registered metric in the Prometheus text exposition format.
pub fn gather_text() -> Result<String> {
    Ok(prometheus::TextEncoder::new().encode_to_string(&prometheus::gather())?)
}

pub async fn write_to(path: &Path) -> Result<()> {
    // Touch the counters so they appear even when nothing was recorded.
    lazy_static::initialize(&CODES_TOTAL);
    lazy_static::initialize(&EXPORT_FAILURES_TOTAL);
    tokio::fs::write(path, gather_text()?).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rvp_core::receipt::PayloadVariant;

    use super::*;

    #[test]
    fn outcomes_are_counted_by_variant() {
        let rich_before = CODES_TOTAL.with_label_values(&["rich"]).get();
        let minimal_before = CODES_TOTAL.with_label_values(&["minimal"]).get();
        let failures_before = EXPORT_FAILURES_TOTAL.get();

        for variant in [PayloadVariant::Rich, PayloadVariant::Minimal, PayloadVariant::Rich] {
            record(&Notification::Exported {
                code: "PAG0001".to_string(),
                variant,
                hash_prefix: "0123456789abcdef".to_string(),
            });
        }
        record(&Notification::Failed {
            code: "PAG0002".to_string(),
            message: "encoder exploded".to_string(),
        });
        record_failure();

        assert_eq!(CODES_TOTAL.with_label_values(&["rich"]).get(), rich_before + 2);
        assert_eq!(
            CODES_TOTAL.with_label_values(&["minimal"]).get(),
            minimal_before + 1
        );
        assert_eq!(EXPORT_FAILURES_TOTAL.get(), failures_before + 2);

        let text = gather_text().unwrap();
        assert!(text.contains("rvp_codes_total{variant=\"rich\"}"));
        assert!(text.contains("rvp_export_failures_total"));
    }
}
