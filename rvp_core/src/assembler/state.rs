// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Assembly State
//!
//! Typestate markers for the two payload attempts.
//! The `AssemblyState` trait represents the different states a payload
//! attempt can be in.

use rvp_receipt::SerializedPayload;

/// The rich payload, with the compact document embedded, has not been tried yet.
#[derive(Debug, Clone)]
pub struct AttemptRich;

/// The rich payload did not fit and the minimal one must be built.
#[derive(Debug, Clone)]
pub struct AttemptMinimal {
    /// Serialized size of the rejected rich payload, in bytes
    pub rejected_len: usize,
}

/// A payload ready to be encoded.
#[derive(Debug, Clone)]
pub struct Done {
    pub serialized: SerializedPayload,
}

/// Trait for the different states a payload attempt can be in.
pub trait AssemblyState {}
impl AssemblyState for AttemptRich {}
impl AssemblyState for AttemptMinimal {}
impl AssemblyState for Done {}
