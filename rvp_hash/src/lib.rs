// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Verification hash
//!
//! Every exported receipt carries a verification hash: the SHA-256 of the
//! issue time (`YYYYMMDDHHMMSS`) concatenated with the issuing organization's
//! identifier. The hash is bound to the moment of export, not to the receipt
//! contents, so exporting the same payment twice yields two different hashes.
//!
//! # Example
//! ```rust
//! # use chrono::{FixedOffset, TimeZone};
//! use rvp_hash::{generate_verification_hash, FixedClock};
//!
//! # let instant = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2026, 10, 16, 9, 5, 3).unwrap();
//! let clock = FixedClock(instant);
//! let stamped = generate_verification_hash(&clock, "20445398455").unwrap();
//!
//! assert_eq!(stamped.hash.as_str().len(), 64);
//! assert!(stamped.hash.verify(&stamped.stamp, "20445398455").unwrap());
//! ```
//!

mod clock;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub use clock::{Clock, FixedClock, IssueStamp, SystemClock};

/// Length of a rendered hash, in hex characters.
pub const HASH_HEX_LEN: usize = 64;

/// Length of the hash prefix embedded in payloads and compact documents.
pub const HASH_PREFIX_LEN: usize = 16;

/// Errors returned while generating or parsing verification hashes
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("organization identifier is missing or blank")]
    MissingOrgIdentifier,
    #[error("malformed verification hash {value:?}: expected 64 lowercase hex characters")]
    MalformedHash { value: String },
}

/// A 64-character lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VerificationHash(String);

/// A hash together with the stamp it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedHash {
    pub stamp: IssueStamp,
    pub hash: VerificationHash,
}

impl VerificationHash {
    /// Hashes `stamp.compact()` followed directly by `org_identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`HashError::MissingOrgIdentifier`] if `org_identifier` is blank.
    pub fn from_parts(stamp: &IssueStamp, org_identifier: &str) -> Result<Self, HashError> {
        if org_identifier.trim().is_empty() {
            return Err(HashError::MissingOrgIdentifier);
        }
        let mut hasher = Sha256::new();
        hasher.update(stamp.compact().as_bytes());
        hasher.update(org_identifier.as_bytes());
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First [`HASH_PREFIX_LEN`] hex characters.
    pub fn prefix(&self) -> &str {
        &self.0[..HASH_PREFIX_LEN]
    }

    /// Recomputes the hash for `stamp` and `org_identifier` and compares.
    pub fn verify(&self, stamp: &IssueStamp, org_identifier: &str) -> Result<bool, HashError> {
        Ok(Self::from_parts(stamp, org_identifier)? == *self)
    }
}

impl fmt::Display for VerificationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VerificationHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == HASH_HEX_LEN
            && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !well_formed {
            return Err(HashError::MalformedHash {
                value: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for VerificationHash {
    type Error = HashError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VerificationHash> for String {
    fn from(hash: VerificationHash) -> Self {
        hash.0
    }
}

/// Captures the current time from `clock` and derives the verification hash
/// for `org_identifier`.
///
/// # Errors
///
/// Returns [`HashError::MissingOrgIdentifier`] if `org_identifier` is blank.
pub fn generate_verification_hash<C: Clock + ?Sized>(
    clock: &C,
    org_identifier: &str,
) -> Result<StampedHash, HashError> {
    let stamp = IssueStamp::capture(clock);
    let hash = VerificationHash::from_parts(&stamp, org_identifier)?;
    Ok(StampedHash { stamp, hash })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, FixedOffset, TimeZone};
    use rstest::*;

    use super::*;

    #[fixture]
    fn org_id() -> &'static str {
        "20445398455"
    }

    #[fixture]
    fn instant() -> DateTime<FixedOffset> {
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 9, 5, 3)
            .unwrap()
    }

    #[rstest]
    fn hash_of_known_input(instant: DateTime<FixedOffset>, org_id: &str) {
        let stamped = generate_verification_hash(&FixedClock(instant), org_id).unwrap();
        assert_eq!(
            stamped.hash.as_str(),
            "affa0c1b9d05df5e2090bdd890f4fa9548c49a12d4d5f541e3f705290dd4664e"
        );
        assert_eq!(stamped.hash.prefix(), "affa0c1b9d05df5e");
        assert_eq!(stamped.stamp.compact(), "20261016090503");
    }

    #[rstest]
    fn hash_is_deterministic_for_fixed_clock(instant: DateTime<FixedOffset>, org_id: &str) {
        let clock = FixedClock(instant);
        let first = generate_verification_hash(&clock, org_id).unwrap();
        let second = generate_verification_hash(&clock, org_id).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.hash.as_str().len(), HASH_HEX_LEN);
        assert!(first
            .hash
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[rstest]
    fn hashes_one_second_apart_differ(instant: DateTime<FixedOffset>, org_id: &str) {
        let first = generate_verification_hash(&FixedClock(instant), org_id).unwrap();
        let second =
            generate_verification_hash(&FixedClock(instant + Duration::seconds(1)), org_id)
                .unwrap();
        assert_ne!(first.hash, second.hash);
        assert_eq!(
            second.hash.as_str(),
            "5007281ca59adb65b201143bffe1cc497b1a9c55f9330a46f376130926a6aeb0"
        );
    }

    #[rstest]
    fn hashes_within_the_same_second_collide(instant: DateTime<FixedOffset>, org_id: &str) {
        let first = generate_verification_hash(&FixedClock(instant), org_id).unwrap();
        let second = generate_verification_hash(
            &FixedClock(instant + Duration::milliseconds(999)),
            org_id,
        )
        .unwrap();
        assert_eq!(first.hash, second.hash);
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("   ")]
    fn blank_org_identifier_is_rejected(instant: DateTime<FixedOffset>, #[case] org_id: &str) {
        assert_eq!(
            generate_verification_hash(&FixedClock(instant), org_id),
            Err(HashError::MissingOrgIdentifier)
        );
    }

    #[rstest]
    fn verify_detects_other_organization(instant: DateTime<FixedOffset>, org_id: &str) {
        let stamped = generate_verification_hash(&FixedClock(instant), org_id).unwrap();
        assert!(stamped.hash.verify(&stamped.stamp, org_id).unwrap());
        assert!(!stamped.hash.verify(&stamped.stamp, "20100070970").unwrap());
    }

    #[rstest]
    #[case::too_short("abc123")]
    #[case::uppercase("AFFA0C1B9D05DF5E2090BDD890F4FA9548C49A12D4D5F541E3F705290DD4664E")]
    #[case::not_hex("zffa0c1b9d05df5e2090bdd890f4fa9548c49a12d4d5f541e3f705290dd4664e")]
    fn malformed_hashes_do_not_parse(#[case] value: &str) {
        assert!(matches!(
            value.parse::<VerificationHash>(),
            Err(HashError::MalformedHash { .. })
        ));
    }

    #[rstest]
    fn hash_serializes_as_plain_string(instant: DateTime<FixedOffset>, org_id: &str) {
        let stamped = generate_verification_hash(&FixedClock(instant), org_id).unwrap();
        let json = serde_json::to_string(&stamped.hash).unwrap();
        assert_eq!(json, format!("\"{}\"", stamped.hash));
        let back: VerificationHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stamped.hash);
    }
}
