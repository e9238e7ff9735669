// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Receipt verification codes
//!
//! Every exported receipt gets a scannable code that proves it was issued by
//! the organization and lets a scanner preview its essentials offline.
//!
//! - [`assembler`] builds the verification payload, shrinking it when it
//!   would not fit, and encodes it.
//! - [`encoder`] is the seam to the scannable-code renderer.
//! - [`manager`] exports single receipts or whole batches and reports each
//!   outcome through a notification adapter.
//!
//! ## Getting started
//!
//! ```rust
//! # use std::sync::Arc;
//! use rvp_core::{
//!     assembler::{Assembler, AssemblerConfig},
//!     encoder::QrCodeEncoder,
//!     hash::SystemClock,
//!     manager::{context::memory::NotificationQueue, ExportManager},
//!     receipt::{Amount, PaymentRecord},
//! };
//!
//! # tokio_test_block_on(async {
//! let manager = ExportManager::new(
//!     NotificationQueue::default(),
//!     Assembler::new(QrCodeEncoder, AssemblerConfig::default()),
//!     Arc::new(SystemClock),
//!     "20445398455",
//! );
//! let payment = PaymentRecord {
//!     code: "PAG0007".into(),
//!     payer_name: "Juana Pérez".into(),
//!     amount: Amount::from_cents(4550),
//!     late_fee: None,
//!     status: "Pagado".into(),
//!     paid_at: None,
//! };
//! let code = manager.export_receipt(&payment).await.unwrap();
//! assert_eq!(code.hash_prefix().len(), 16);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod assembler;
pub mod encoder;
mod error;
pub mod manager;

pub use error::{Error, Result};
pub use rvp_hash as hash;
pub use rvp_receipt as receipt;
