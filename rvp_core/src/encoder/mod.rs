// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Scannable-code encoder adapter.
//!
//! The assembler does not draw codes itself. It hands the serialized payload
//! to a [`CodeEncoder`], which returns an image or fails. [`QrCodeEncoder`] is
//! the default implementation; tests and alternative renderers provide their
//! own.

mod qr;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

pub use qr::{QrCodeEncoder, QrEncodeError, QUIET_ZONE_MODULES};

/// Error-correction level of a QR code. Lower levels leave more room for data.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EcLevel {
    /// ~7% of codewords can be restored
    #[default]
    Low,
    /// ~15%
    Medium,
    /// ~25%
    Quartile,
    /// ~30%
    High,
}

/// A rendered scannable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeImage {
    /// PNG-encoded image
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CodeImage {
    /// The image as a `data:image/png;base64,` URI, ready to embed into a
    /// printable document.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Encodes text into a scannable image.
#[async_trait]
pub trait CodeEncoder {
    /// Defines the user-specified error type.
    ///
    /// This error type should implement the `Error` and `Debug` traits from the standard library.
    /// Errors of this type are returned to the user when an operation fails.
    type AdapterError: std::error::Error + std::fmt::Debug + Send + Sync + 'static;

    /// Encodes `data` into an image at least `size` pixels wide using
    /// `ec_level` error correction.
    async fn encode(
        &self,
        data: &str,
        size: u32,
        ec_level: EcLevel,
    ) -> Result<CodeImage, Self::AdapterError>;
}
