// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Monetary amounts held as integer cents.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ReceiptError;

/// A non-negative amount with two decimal places.
///
/// Billing records arrive either as JSON numbers (`45.5`) or decimal strings
/// (`"45.50"`); both are accepted. Amounts always serialize as strings with
/// exactly two decimals.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawAmount", into = "String")]
pub struct Amount {
    cents: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// Accepts a JSON number under the same rules as a decimal string: at
    /// most two decimal places and no more than `u64::MAX` cents.
    pub fn from_f64(value: f64) -> Result<Self, ReceiptError> {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(value.to_string(), "must be a finite, non-negative number"));
        }
        // `Display` for f64 prints the shortest round-tripping decimal, never
        // in exponent form.
        value.to_string().parse()
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.cents.checked_add(other.cents).map(Self::from_cents)
    }
}

fn invalid(value: String, reason: &str) -> ReceiptError {
    ReceiptError::InvalidAmount {
        value,
        reason: reason.to_string(),
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl FromStr for Amount {
    type Err = ReceiptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (units, decimals) = trimmed.split_once('.').unwrap_or((trimmed, ""));
        if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(s.to_string(), "expected a non-negative decimal number"));
        }
        if decimals.len() > 2 || !decimals.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(s.to_string(), "at most two decimal places are allowed"));
        }
        let units: u64 = units
            .parse()
            .map_err(|_| invalid(s.to_string(), "out of range"))?;
        let decimals = format!("{decimals:0<2}");
        let fraction: u64 = decimals
            .parse()
            .map_err(|_| invalid(s.to_string(), "expected a non-negative decimal number"))?;
        units
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Self::from_cents)
            .ok_or_else(|| invalid(s.to_string(), "out of range"))
    }
}

impl TryFrom<RawAmount> for Amount {
    type Error = ReceiptError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Number(value) => Self::from_f64(value),
            RawAmount::Text(text) => text.parse(),
        }
    }
}

impl From<Amount> for String {
    fn from(amount: Amount) -> Self {
        amount.to_string()
    }
}
