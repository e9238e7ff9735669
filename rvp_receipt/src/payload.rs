// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Verification payload
//!
//! The JSON document encoded into a receipt's scannable code. A payload is
//! either *rich*, carrying a compact document under `documento`, or
//! *minimal*, carrying a short notice under `nota` instead.

use serde::{Deserialize, Serialize};

use crate::{Amount, ReceiptError, ReceiptResult, ReceiptSummary};

/// Notice placed in minimal payloads.
pub const FALLBACK_NOTICE: &str = "Detalle completo disponible en el comprobante impreso";

/// Which of the two payload shapes was emitted.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PayloadVariant {
    Rich,
    Minimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationPayload {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "ruc")]
    pub org_id: String,
    /// Issue instant in epoch milliseconds
    pub timestamp: i64,
    #[serde(rename = "fecha")]
    pub issued_at_iso: String,
    #[serde(rename = "monto")]
    pub amount: Amount,
    /// First 16 hex characters of the verification hash
    #[serde(rename = "hash")]
    pub hash_prefix: String,
    #[serde(rename = "documento", default, skip_serializing_if = "Option::is_none")]
    pub compact_document: Option<String>,
    #[serde(rename = "nota", default, skip_serializing_if = "Option::is_none")]
    pub fallback_notice: Option<String>,
}

impl VerificationPayload {
    fn base(receipt: &ReceiptSummary, org_id: &str) -> Self {
        Self {
            code: receipt.code.clone(),
            org_id: org_id.to_string(),
            timestamp: receipt.issued_at.epoch_millis(),
            issued_at_iso: receipt.issued_at.iso_utc(),
            amount: receipt.amount,
            hash_prefix: receipt.hash_prefix().to_string(),
            compact_document: None,
            fallback_notice: None,
        }
    }

    /// Payload embedding `compact_document`.
    pub fn rich(receipt: &ReceiptSummary, org_id: &str, compact_document: String) -> Self {
        Self {
            compact_document: Some(compact_document),
            ..Self::base(receipt, org_id)
        }
    }

    /// Payload without a compact document, carrying [`FALLBACK_NOTICE`].
    pub fn minimal(receipt: &ReceiptSummary, org_id: &str) -> Self {
        Self {
            fallback_notice: Some(FALLBACK_NOTICE.to_string()),
            ..Self::base(receipt, org_id)
        }
    }

    pub fn variant(&self) -> PayloadVariant {
        if self.compact_document.is_some() {
            PayloadVariant::Rich
        } else {
            PayloadVariant::Minimal
        }
    }

    /// Canonical serialized form: compact JSON with fields in declaration order.
    pub fn to_json(&self) -> ReceiptResult<String> {
        serde_json::to_string(self).map_err(|e| ReceiptError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> ReceiptResult<Self> {
        serde_json::from_str(json).map_err(|e| ReceiptError::Serialization(e.to_string()))
    }
}

/// A payload together with its canonical JSON form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedPayload {
    pub payload: VerificationPayload,
    pub json: String,
}

impl SerializedPayload {
    pub fn new(payload: VerificationPayload) -> ReceiptResult<Self> {
        let json = payload.to_json()?;
        Ok(Self { payload, json })
    }

    /// UTF-8 byte length of the JSON, which is what QR capacity is measured in.
    pub fn byte_len(&self) -> usize {
        self.json.len()
    }

    pub fn fits(&self, capacity_bytes: usize) -> bool {
        self.byte_len() <= capacity_bytes
    }
}
