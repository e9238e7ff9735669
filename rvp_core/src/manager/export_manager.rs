// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use log::{error, info, warn};
use rvp_hash::Clock;
use rvp_receipt::{CompactEncoder, DataUriCompactEncoder, PaymentRecord, ReceiptSummary};

use super::{adapters::Notifier, Notification};
use crate::{
    assembler::{Assembler, VerificationCode},
    encoder::CodeEncoder,
    Error,
};

/// A receipt that could not be exported.
#[derive(Debug)]
pub struct FailedExport {
    pub code: String,
    pub error: Error,
}

/// Result of exporting a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub exported: Vec<VerificationCode>,
    pub failed: Vec<FailedExport>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct ExportManager<N, E, C = DataUriCompactEncoder> {
    /// Context that implements adapters
    context: N,

    assembler: Assembler<E, C>,

    /// Every export reads the time once, at the start of the export
    clock: Arc<dyn Clock>,

    /// Issuing organization, e.g. a tax registration number
    org_identifier: String,

    /// Pause between two consecutive items of a batch
    batch_pause: Duration,
}

impl<N, E, C> ExportManager<N, E, C>
where
    N: Notifier + Sync,
    E: CodeEncoder + Sync,
    C: CompactEncoder,
{
    /// Creates a new manager. Every receipt exported by it is issued on
    /// behalf of `org_identifier`.
    pub fn new(
        context: N,
        assembler: Assembler<E, C>,
        clock: Arc<dyn Clock>,
        org_identifier: impl Into<String>,
    ) -> Self {
        Self {
            context,
            assembler,
            clock,
            org_identifier: org_identifier.into(),
            batch_pause: Duration::ZERO,
        }
    }

    pub fn with_batch_pause(mut self, batch_pause: Duration) -> Self {
        self.batch_pause = batch_pause;
        self
    }

    pub fn context(&self) -> &N {
        &self.context
    }

    /// Stamps `payment`, assembles its verification code and publishes the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReceiptError`] if the payment or organization
    /// identifier is malformed, and [`Error::EncodeFailure`] if the code
    /// cannot be rendered. A [`Notification::Failed`] is published in both
    /// cases.
    pub async fn export_receipt(&self, payment: &PaymentRecord) -> Result<VerificationCode, Error> {
        match self.try_export(payment).await {
            Ok(code) => {
                info!(
                    "Exported receipt {} ({} payload, hash {})",
                    code.code(),
                    code.variant(),
                    code.hash_prefix()
                );
                self.publish(Notification::Exported {
                    code: code.code().to_string(),
                    variant: code.variant(),
                    hash_prefix: code.hash_prefix().to_string(),
                })
                .await;
                Ok(code)
            }
            Err(err) => {
                error!("Failed to export receipt {:?}: {}", payment.code, err);
                self.publish(Notification::Failed {
                    code: payment.code.clone(),
                    message: err.to_string(),
                })
                .await;
                Err(err)
            }
        }
    }

    async fn try_export(&self, payment: &PaymentRecord) -> Result<VerificationCode, Error> {
        let receipt = ReceiptSummary::issue(payment, &self.org_identifier, self.clock.as_ref())?;
        self.assembler
            .assemble_verification_code(&receipt, &self.org_identifier)
            .await
    }

    /// Exports `payments` strictly one after the other, pausing between
    /// items. Failed items are collected in the report; they never abort the
    /// batch.
    pub async fn export_batch(&self, payments: &[PaymentRecord]) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, payment) in payments.iter().enumerate() {
            match self.export_receipt(payment).await {
                Ok(code) => report.exported.push(code),
                Err(error) => report.failed.push(FailedExport {
                    code: payment.code.clone(),
                    error,
                }),
            }
            if index + 1 < payments.len() && !self.batch_pause.is_zero() {
                tokio::time::sleep(self.batch_pause).await;
            }
        }
        info!(
            "Batch finished: {} exported, {} failed",
            report.exported.len(),
            report.failed.len()
        );
        report
    }

    async fn publish(&self, notification: Notification) {
        if let Err(err) = self.context.notify(notification).await {
            warn!("Failed to publish export notification: {err}");
        }
    }
}
