// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

// Runs the exporter over a small billing file and scans every image it wrote.
use std::time::Duration;

use rvp_core::receipt::{PayloadVariant, PaymentRecord};
use rvp_exporter::export::{export_payments, ExportOptions, PaymentBatch};
use rvp_integration_tests::scan_receipt;
use serde_json::json;

#[tokio::test]
async fn exported_images_match_manifest() {
    let output = tempfile::tempdir().unwrap();
    let payments: Vec<PaymentRecord> = serde_json::from_value(json!([
        { "code": "PAG0101", "payerName": "Juana Pérez", "amount": 45.5, "status": "Pagado" },
        { "code": "PAG0102", "payerName": "B".repeat(4000), "amount": "3.20", "status": "Pagado" },
        { "code": "PAG0103", "payerName": "Rosa Mamani", "amount": "18.00",
          "lateFee": 2, "status": "Vencido" }
    ]))
    .unwrap();

    let mut options = ExportOptions::new("20445398455", output.path());
    options.batch_pause = Duration::from_millis(5);
    let manifest = export_payments(&PaymentBatch::from(payments), &options)
        .await
        .unwrap();
    assert!(manifest.is_complete());

    let variants: Vec<_> = manifest.exported.iter().map(|e| e.variant).collect();
    assert_eq!(
        variants,
        vec![PayloadVariant::Rich, PayloadVariant::Minimal, PayloadVariant::Rich]
    );

    for entry in &manifest.exported {
        let png = std::fs::read(output.path().join(&entry.file)).unwrap();
        let scanned = scan_receipt(&png).unwrap();
        assert_eq!(scanned.payload, entry.payload);
        assert_eq!(scanned.payload.hash_prefix, entry.hash_prefix);
        if let Some(document) = scanned.document {
            assert_eq!(document.code, entry.code);
        }
    }

    let late = &manifest.exported[2];
    assert_eq!(late.payload.amount.to_string(), "20.00");
    assert_eq!(late.code, "PAG0103");
}

#[tokio::test]
async fn codes_sharing_a_file_stem_keep_their_own_images() {
    let output = tempfile::tempdir().unwrap();
    let payments: Vec<PaymentRecord> = serde_json::from_value(json!([
        { "code": "PAG/1", "payerName": "Ana", "amount": "1.00", "status": "Pagado" },
        { "code": "PAG 1", "payerName": "Beto", "amount": "2.00", "status": "Pagado" },
        { "code": "PAG 1", "payerName": "Carla", "amount": "3.00", "status": "Pagado" }
    ]))
    .unwrap();

    let mut options = ExportOptions::new("20445398455", output.path());
    options.batch_pause = Duration::ZERO;
    let manifest = export_payments(&PaymentBatch::from(payments), &options)
        .await
        .unwrap();
    assert!(manifest.is_complete());
    assert_eq!(manifest.exported.len(), 3);

    let mut files: Vec<_> = manifest.exported.iter().map(|e| e.file.as_str()).collect();
    files.sort_unstable();
    files.dedup();
    assert_eq!(files.len(), 3);

    for entry in &manifest.exported {
        let png = std::fs::read(output.path().join(&entry.file)).unwrap();
        let scanned = scan_receipt(&png).unwrap();
        assert_eq!(scanned.payload, entry.payload);
    }
    let amounts: Vec<_> = manifest
        .exported
        .iter()
        .map(|e| e.payload.amount.to_string())
        .collect();
    assert_eq!(amounts, vec!["1.00", "2.00", "3.00"]);
}
