// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error type and Result typedef
//!

use rvp_receipt::ReceiptError;

/// Error type for receipt export
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The scannable-code encoder rejected the payload
    #[error("failed to encode verification code for receipt {code}: {source_error}")]
    EncodeFailure {
        code: String,
        #[source]
        source_error: anyhow::Error,
    },

    /// Receipt or payload could not be built
    #[error(transparent)]
    ReceiptError(#[from] ReceiptError),
}

pub type Result<T> = std::result::Result<T, Error>;
