// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Compact documents
//!
//! A compact document is a drastically reduced rendering of a receipt, small
//! enough to ride inside a verification payload so a scanner can preview the
//! receipt offline. It keeps only the code, payer, amount, issue date, status
//! and hash prefix, as short-keyed JSON wrapped in a base64 data URI.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use crate::{Amount, ReceiptError, ReceiptResult, ReceiptSummary};

/// Prefix of every compact document data URI.
pub const COMPACT_DOCUMENT_URI_PREFIX: &str = "data:application/json;base64,";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactDocument {
    #[serde(rename = "c")]
    pub code: String,
    #[serde(rename = "n")]
    pub payer_name: String,
    #[serde(rename = "m")]
    pub amount: Amount,
    #[serde(rename = "f")]
    pub issued_at: String,
    #[serde(rename = "e")]
    pub status: String,
    #[serde(rename = "h")]
    pub hash_prefix: String,
}

impl CompactDocument {
    pub fn from_receipt(receipt: &ReceiptSummary) -> Self {
        Self {
            code: receipt.code.clone(),
            payer_name: receipt.payer_name.clone(),
            amount: receipt.amount,
            issued_at: receipt.issued_at.display(),
            status: receipt.status.clone(),
            hash_prefix: receipt.hash_prefix().to_string(),
        }
    }

    pub fn to_data_uri(&self) -> ReceiptResult<String> {
        let json =
            serde_json::to_vec(self).map_err(|e| ReceiptError::Serialization(e.to_string()))?;
        Ok(format!("{COMPACT_DOCUMENT_URI_PREFIX}{}", STANDARD.encode(json)))
    }

    /// Parses a data URI produced by [`CompactDocument::to_data_uri`].
    pub fn decode(uri: &str) -> ReceiptResult<Self> {
        let encoded = uri
            .strip_prefix(COMPACT_DOCUMENT_URI_PREFIX)
            .ok_or_else(|| ReceiptError::InvalidCompactDocument("unexpected media type".into()))?;
        let json = STANDARD
            .decode(encoded)
            .map_err(|e| ReceiptError::InvalidCompactDocument(e.to_string()))?;
        serde_json::from_slice(&json).map_err(|e| ReceiptError::InvalidCompactDocument(e.to_string()))
    }
}

/// Renders the compact document embedded in rich verification payloads.
pub trait CompactEncoder: Send + Sync {
    fn encode(&self, receipt: &ReceiptSummary) -> ReceiptResult<String>;
}

/// Default encoder producing [`CompactDocument`] data URIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataUriCompactEncoder;

impl CompactEncoder for DataUriCompactEncoder {
    fn encode(&self, receipt: &ReceiptSummary) -> ReceiptResult<String> {
        CompactDocument::from_receipt(receipt).to_data_uri()
    }
}

/// Builds the compact document for `receipt` with the default encoder.
pub fn build_compact_document(receipt: &ReceiptSummary) -> ReceiptResult<String> {
    DataUriCompactEncoder.encode(receipt)
}
