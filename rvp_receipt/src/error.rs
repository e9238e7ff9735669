// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use rvp_hash::HashError;

/// Error type for receipts
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiptError {
    #[error("required field `{field}` is missing or blank")]
    MissingField { field: String },
    #[error("invalid amount {value:?}: {reason}")]
    InvalidAmount { value: String, reason: String },
    #[error("amount overflow while adding the late-payment surcharge to {code}")]
    AmountOverflow { code: String },
    #[error("invalid compact document: {0}")]
    InvalidCompactDocument(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Hash(#[from] HashError),
}
