// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Context implementations.
//!
//! Contexts receive the notifications produced by the export manager.
//! [`memory::NotificationQueue`] keeps them in a shared queue that the caller
//! drains; [`channel::ChannelNotifier`] forwards them to another task.
pub mod channel;
pub mod memory;
