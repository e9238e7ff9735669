// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Context adapters for the export manager.
//!
//! Each adapter is defined by the user of the library. Notifications might
//! end up in a UI toast queue, a log, or a channel consumed by another task.

mod notifier;

pub use notifier::Notifier;
