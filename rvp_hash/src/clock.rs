// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock access for hash generation.
//!
//! The hash generator never reads the system time directly, it asks a [`Clock`].
//! Production code uses [`SystemClock`]; tests pin time with [`FixedClock`].

use chrono::{DateTime, FixedOffset, Local, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Reads the local system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// The instant a receipt was issued, truncated to whole seconds.
///
/// A single stamp feeds both the verification hash and the payload's
/// `timestamp`/`fecha` fields, so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueStamp(DateTime<FixedOffset>);

impl IssueStamp {
    pub fn new(instant: DateTime<FixedOffset>) -> Self {
        Self(instant.trunc_subsecs(0))
    }

    /// Reads `clock` once and keeps the result.
    pub fn capture<C: Clock + ?Sized>(clock: &C) -> Self {
        Self::new(clock.now())
    }

    pub fn instant(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Fixed-width `YYYYMMDDHHMMSS` in the stamp's own wall-clock fields.
    pub fn compact(&self) -> String {
        self.0.format("%Y%m%d%H%M%S").to_string()
    }

    /// ISO-8601 in UTC with millisecond precision, e.g. `2026-10-16T14:05:03.000Z`.
    pub fn iso_utc(&self) -> String {
        self.0
            .with_timezone(&Utc)
            .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }

    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// `dd/mm/yyyy HH:MM:SS`, the way printed receipts show the issue date.
    pub fn display(&self) -> String {
        self.0.format("%d/%m/%Y %H:%M:%S").to_string()
    }
}
