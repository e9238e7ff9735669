// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Receipts and verification payloads
//!
//! A payment record from the billing subsystem is turned into a
//! [`ReceiptSummary`] at the moment it is exported. The summary is stamped
//! with the issue time and a verification hash, and from it two things are
//! derived:
//!
//! - a [compact document](compact), a tiny rendering of the receipt meant for
//!   offline preview, and
//! - a [`VerificationPayload`], the JSON encoded into the receipt's scannable
//!   code. A payload is rich (it embeds the compact document) or minimal (it
//!   carries a short notice instead).
//!
//! Nothing here is persisted. Summaries and payloads live for the duration of
//! a single export.

mod amount;
pub mod compact;
mod error;
pub mod payload;
mod summary;

pub use amount::Amount;
pub use compact::{build_compact_document, CompactDocument, CompactEncoder, DataUriCompactEncoder};
pub use error::ReceiptError;
pub use payload::{PayloadVariant, SerializedPayload, VerificationPayload, FALLBACK_NOTICE};
pub use summary::{PaymentRecord, ReceiptSummary};

/// Result type for receipt
pub type ReceiptResult<T> = Result<T, ReceiptError>;
