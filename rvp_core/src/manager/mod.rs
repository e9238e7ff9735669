// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The `manager` module drives receipt exports end to end.
//!
//! [`ExportManager`] stamps each payment record, assembles its verification
//! code and reports the outcome through a user-defined [`adapters::Notifier`].
//! Batches are exported one item at a time, and a failure in one item never
//! stops the rest of the batch.

pub mod adapters;
#[cfg(feature = "in_memory")]
pub mod context;
mod export_manager;
mod notification;

pub use export_manager::{BatchReport, ExportManager, FailedExport};
pub use notification::Notification;
