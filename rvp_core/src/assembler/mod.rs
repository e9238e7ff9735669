// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Verification code assembly
//!
//! The [`Assembler`] turns a [`ReceiptSummary`] into a scannable
//! [`VerificationCode`]. It first tries a *rich* payload, embedding the
//! receipt's compact document so a scanner can preview it offline. When the
//! serialized payload exceeds the configured capacity it falls back to a
//! *minimal* payload carrying only a notice, which always fits. Overflow is
//! never reported to the caller; the only failure left is the encoder itself
//! rejecting the data.
//!
//! Both attempts encode at the configured error-correction level, which
//! defaults to the lowest one to maximise capacity.

mod attempt;
pub mod state;

use log::{debug, warn};
use rvp_hash::{HashError, VerificationHash};
use rvp_receipt::{
    CompactEncoder, DataUriCompactEncoder, PayloadVariant, ReceiptError, ReceiptResult,
    ReceiptSummary, SerializedPayload, VerificationPayload,
};

pub use attempt::{PayloadAttempt, ResultAttempt};

use crate::{
    encoder::{CodeEncoder, CodeImage, EcLevel},
    Error,
};

/// Serialized payload size, in bytes, above which the compact document is dropped.
pub const DEFAULT_CAPACITY_BYTES: usize = 2000;

/// Default minimum width of the rendered code, in pixels.
pub const DEFAULT_IMAGE_SIZE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerConfig {
    pub capacity_bytes: usize,
    pub image_size: u32,
    pub ec_level: EcLevel,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            image_size: DEFAULT_IMAGE_SIZE,
            ec_level: EcLevel::Low,
        }
    }
}

/// A rendered verification code and everything the printed receipt needs to
/// show next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationCode {
    pub image: CodeImage,
    pub verification_hash: VerificationHash,
    pub payload: VerificationPayload,
    /// Exact text encoded into the image
    pub payload_json: String,
}

impl VerificationCode {
    pub fn code(&self) -> &str {
        &self.payload.code
    }

    pub fn hash_prefix(&self) -> &str {
        self.verification_hash.prefix()
    }

    pub fn variant(&self) -> PayloadVariant {
        self.payload.variant()
    }
}

pub struct Assembler<E, C = DataUriCompactEncoder> {
    encoder: E,
    compact_encoder: C,
    config: AssemblerConfig,
}

impl<E> Assembler<E> {
    pub fn new(encoder: E, config: AssemblerConfig) -> Self {
        Self::with_compact_encoder(encoder, DataUriCompactEncoder, config)
    }
}

impl<E, C> Assembler<E, C>
where
    C: CompactEncoder,
{
    pub fn with_compact_encoder(encoder: E, compact_encoder: C, config: AssemblerConfig) -> Self {
        Self {
            encoder,
            compact_encoder,
            config,
        }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Runs the rich → minimal attempts and returns the payload to encode.
    pub fn build_payload(
        &self,
        receipt: &ReceiptSummary,
        org_identifier: &str,
    ) -> ReceiptResult<SerializedPayload> {
        if org_identifier.trim().is_empty() {
            return Err(ReceiptError::Hash(HashError::MissingOrgIdentifier));
        }
        let capacity = self.config.capacity_bytes;
        let done = match PayloadAttempt::new(receipt, org_identifier)
            .try_rich(&self.compact_encoder, capacity)?
        {
            Ok(done) => done,
            Err(minimal) => {
                warn!(
                    "Verification payload for {} is {} bytes, over the {} byte capacity; \
                     dropping the compact document",
                    receipt.code,
                    minimal.rejected_len(),
                    capacity
                );
                minimal.minimal()?
            }
        };

        let serialized = done.into_serialized();
        if !serialized.fits(capacity) {
            warn!(
                "Minimal verification payload for {} is still {} bytes",
                receipt.code,
                serialized.byte_len()
            );
        }
        Ok(serialized)
    }

    /// Builds the payload for `receipt` and encodes it into a scannable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReceiptError`] if `org_identifier` is blank and
    /// [`Error::EncodeFailure`] if the encoder rejects the payload.
    pub async fn assemble_verification_code(
        &self,
        receipt: &ReceiptSummary,
        org_identifier: &str,
    ) -> Result<VerificationCode, Error>
    where
        E: CodeEncoder + Sync,
    {
        let SerializedPayload { payload, json } = self.build_payload(receipt, org_identifier)?;
        debug!(
            "Encoding {} payload for {} ({} bytes)",
            payload.variant(),
            receipt.code,
            json.len()
        );

        let image = self
            .encoder
            .encode(&json, self.config.image_size, self.config.ec_level)
            .await
            .map_err(|err| Error::EncodeFailure {
                code: receipt.code.clone(),
                source_error: anyhow::Error::new(err),
            })?;

        Ok(VerificationCode {
            image,
            verification_hash: receipt.verification_hash.clone(),
            payload,
            payload_json: json,
        })
    }
}
