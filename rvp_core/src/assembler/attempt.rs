// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Payload attempts driven through the rich → minimal fallback.

use rvp_receipt::{
    CompactEncoder, ReceiptResult, ReceiptSummary, SerializedPayload, VerificationPayload,
};

use super::state::{AssemblyState, AttemptMinimal, AttemptRich, Done};

pub type ResultAttempt<'r> =
    std::result::Result<PayloadAttempt<'r, Done>, PayloadAttempt<'r, AttemptMinimal>>;

/// Typestate wrapper around the receipt a payload is being built for.
///
/// - [`AttemptRich`]: nothing built yet.
/// - [`AttemptMinimal`]: the rich payload overflowed the capacity.
/// - [`Done`]: a serialized payload is available.
#[derive(Debug, Clone)]
pub struct PayloadAttempt<'r, S>
where
    S: AssemblyState,
{
    receipt: &'r ReceiptSummary,
    org_id: &'r str,
    state: S,
}

impl<'r> PayloadAttempt<'r, AttemptRich> {
    pub fn new(receipt: &'r ReceiptSummary, org_id: &'r str) -> Self {
        Self {
            receipt,
            org_id,
            state: AttemptRich,
        }
    }

    /// Builds the payload with the compact document embedded.
    ///
    /// Returns `Ok(Ok(_))` in [`Done`] when it fits within `capacity_bytes`,
    /// `Ok(Err(_))` in [`AttemptMinimal`] when it does not.
    pub fn try_rich<C>(
        self,
        compact: &C,
        capacity_bytes: usize,
    ) -> ReceiptResult<ResultAttempt<'r>>
    where
        C: CompactEncoder + ?Sized,
    {
        let compact_document = compact.encode(self.receipt)?;
        let payload = VerificationPayload::rich(self.receipt, self.org_id, compact_document);
        let serialized = SerializedPayload::new(payload)?;
        if serialized.fits(capacity_bytes) {
            Ok(Ok(self.transition(Done { serialized })))
        } else {
            let rejected_len = serialized.byte_len();
            Ok(Err(self.transition(AttemptMinimal { rejected_len })))
        }
    }
}

impl<'r> PayloadAttempt<'r, AttemptMinimal> {
    /// Serialized size of the rich payload that did not fit.
    pub fn rejected_len(&self) -> usize {
        self.state.rejected_len
    }

    /// Builds the payload without a compact document.
    pub fn minimal(self) -> ReceiptResult<PayloadAttempt<'r, Done>> {
        let payload = VerificationPayload::minimal(self.receipt, self.org_id);
        let serialized = SerializedPayload::new(payload)?;
        Ok(self.transition(Done { serialized }))
    }
}

impl<'r> PayloadAttempt<'r, Done> {
    pub fn serialized(&self) -> &SerializedPayload {
        &self.state.serialized
    }

    pub fn into_serialized(self) -> SerializedPayload {
        self.state.serialized
    }
}

impl<'r, S> PayloadAttempt<'r, S>
where
    S: AssemblyState,
{
    fn transition<T>(self, state: T) -> PayloadAttempt<'r, T>
    where
        T: AssemblyState,
    {
        PayloadAttempt {
            receipt: self.receipt,
            org_id: self.org_id,
            state,
        }
    }

    pub fn receipt(&self) -> &ReceiptSummary {
        self.receipt
    }
}
