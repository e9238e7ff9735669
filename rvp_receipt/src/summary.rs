// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Payment records and the receipt summaries derived from them at export time.

use rvp_hash::{generate_verification_hash, Clock, IssueStamp, StampedHash, VerificationHash};
use serde::{Deserialize, Serialize};

use crate::{Amount, ReceiptError, ReceiptResult};

/// A payment as delivered by the billing subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Human-readable payment code, e.g. `PAG0007`
    pub code: String,
    pub payer_name: String,
    /// Billed amount, excluding the late-payment surcharge
    pub amount: Amount,
    /// Late-payment surcharge, if the payment was overdue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_fee: Option<Amount>,
    pub status: String,
    /// Payment date as recorded by billing; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>,
}

impl PaymentRecord {
    /// Amount plus the late-payment surcharge.
    pub fn total(&self) -> ReceiptResult<Amount> {
        match self.late_fee {
            None => Ok(self.amount),
            Some(fee) => self
                .amount
                .checked_add(fee)
                .ok_or_else(|| ReceiptError::AmountOverflow {
                    code: self.code.clone(),
                }),
        }
    }
}

/// Read-only view of a payment, built fresh for a single export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptSummary {
    pub code: String,
    /// When the receipt was generated, not when it was paid
    pub issued_at: IssueStamp,
    /// Total including any late-payment surcharge
    pub amount: Amount,
    pub payer_name: String,
    pub status: String,
    pub verification_hash: VerificationHash,
}

impl ReceiptSummary {
    /// Stamps `payment` with the current time from `clock` and derives its
    /// verification hash for `org_identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::MissingField`] for a blank payment code and
    /// [`ReceiptError::Hash`] for a blank organization identifier.
    pub fn issue<C: Clock + ?Sized>(
        payment: &PaymentRecord,
        org_identifier: &str,
        clock: &C,
    ) -> ReceiptResult<Self> {
        validate(payment)?;
        let stamped = generate_verification_hash(clock, org_identifier)?;
        Self::from_payment(payment, stamped)
    }

    /// Builds a summary from an already generated hash.
    pub fn from_payment(payment: &PaymentRecord, stamped: StampedHash) -> ReceiptResult<Self> {
        validate(payment)?;
        Ok(Self {
            code: payment.code.trim().to_string(),
            issued_at: stamped.stamp,
            amount: payment.total()?,
            payer_name: payment.payer_name.clone(),
            status: payment.status.clone(),
            verification_hash: stamped.hash,
        })
    }

    pub fn hash_prefix(&self) -> &str {
        self.verification_hash.prefix()
    }
}

fn validate(payment: &PaymentRecord) -> ReceiptResult<()> {
    if payment.code.trim().is_empty() {
        return Err(ReceiptError::MissingField {
            field: "code".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use rstest::*;
    use rvp_hash::{FixedClock, HashError};

    use super::*;

    #[fixture]
    fn clock() -> FixedClock {
        FixedClock(
            FixedOffset::west_opt(5 * 3600)
                .unwrap()
                .with_ymd_and_hms(2026, 10, 16, 9, 5, 3)
                .unwrap(),
        )
    }

    #[fixture]
    fn payment() -> PaymentRecord {
        PaymentRecord {
            code: "PAG0007".to_string(),
            payer_name: "Juana Pérez".to_string(),
            amount: Amount::from_cents(4000),
            late_fee: Some(Amount::from_cents(550)),
            status: "Pagado".to_string(),
            paid_at: None,
        }
    }

    #[rstest]
    fn summary_includes_late_fee(payment: PaymentRecord, clock: FixedClock) {
        let summary = ReceiptSummary::issue(&payment, "20445398455", &clock).unwrap();
        assert_eq!(summary.amount.to_string(), "45.50");
        assert_eq!(summary.code, "PAG0007");
        assert_eq!(summary.issued_at.compact(), "20261016090503");
        assert_eq!(summary.hash_prefix(), "affa0c1b9d05df5e");
    }

    #[rstest]
    fn blank_code_is_rejected(mut payment: PaymentRecord, clock: FixedClock) {
        payment.code = "  ".to_string();
        assert_eq!(
            ReceiptSummary::issue(&payment, "20445398455", &clock),
            Err(ReceiptError::MissingField {
                field: "code".to_string()
            })
        );
    }

    #[rstest]
    fn blank_org_identifier_is_rejected(payment: PaymentRecord, clock: FixedClock) {
        assert_eq!(
            ReceiptSummary::issue(&payment, "", &clock),
            Err(ReceiptError::Hash(HashError::MissingOrgIdentifier))
        );
    }

    #[rstest]
    fn surcharge_overflow_is_reported(mut payment: PaymentRecord) {
        payment.amount = Amount::from_cents(u64::MAX);
        assert!(matches!(
            payment.total(),
            Err(ReceiptError::AmountOverflow { .. })
        ));
    }

    #[test]
    fn payment_record_reads_camel_case_json() {
        let payment: PaymentRecord = serde_json::from_str(
            r#"{"code":"PAG0010","payerName":"Luis Quispe","amount":30,"lateFee":"1.5","status":"Pagado"}"#,
        )
        .unwrap();
        assert_eq!(payment.total().unwrap().to_string(), "31.50");
        assert_eq!(payment.paid_at, None);
    }
}
