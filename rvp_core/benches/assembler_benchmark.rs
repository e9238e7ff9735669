// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Benchmarks for building and encoding verification payloads.
//!
//! The rich and minimal payload paths are measured separately, since the
//! minimal path first builds and rejects a rich payload.

use std::hint::black_box;

use chrono::{FixedOffset, TimeZone};
use criterion::{criterion_group, criterion_main, Criterion};
use rvp_core::{
    assembler::{Assembler, AssemblerConfig},
    encoder::QrCodeEncoder,
    hash::{generate_verification_hash, FixedClock},
    receipt::{Amount, PaymentRecord, ReceiptSummary},
};
use tokio::runtime::Runtime;

fn receipt(payer_name: &str) -> ReceiptSummary {
    let clock = FixedClock(
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 9, 5, 3)
            .unwrap(),
    );
    let payment = PaymentRecord {
        code: "PAG0007".to_string(),
        payer_name: payer_name.to_string(),
        amount: Amount::from_cents(4550),
        late_fee: Some(Amount::from_cents(250)),
        status: "Pagado".to_string(),
        paid_at: None,
    };
    ReceiptSummary::issue(&payment, "20445398455", &clock).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let org_id = "20445398455";
    let clock = FixedClock(
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .unwrap(),
    );
    let assembler = Assembler::new(QrCodeEncoder, AssemblerConfig::default());
    let rich = receipt("Juana Pérez");
    let minimal = receipt(&"x".repeat(5000));

    c.bench_function("Generate verification hash", |b| {
        b.iter(|| generate_verification_hash(black_box(&clock), black_box(org_id)))
    });

    c.bench_function("Build rich payload", |b| {
        b.iter(|| assembler.build_payload(black_box(&rich), black_box(org_id)))
    });

    c.bench_function("Build minimal payload", |b| {
        b.iter(|| assembler.build_payload(black_box(&minimal), black_box(org_id)))
    });

    let runtime = Runtime::new().unwrap();
    c.bench_function("Assemble rich verification code", |b| {
        b.to_async(&runtime).iter(|| {
            assembler.assemble_verification_code(black_box(&rich), black_box(org_id))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
