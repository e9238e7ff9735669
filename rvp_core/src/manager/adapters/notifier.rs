// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;

use crate::manager::Notification;

/// Delivers export notifications.
///
/// # Example
///
/// For example code see [crate::manager::context::memory::NotificationQueue]
#[async_trait]
pub trait Notifier {
    /// Defines the user-specified error type.
    ///
    /// This error type should implement the `Error` and `Debug` traits from the standard library.
    /// Errors of this type are returned to the user when an operation fails.
    type AdapterError: std::error::Error + std::fmt::Debug + Send + Sync + 'static;

    /// Publishes a single [`Notification`].
    ///
    /// A failure here is logged by the manager and does not affect the export
    /// it reports on.
    async fn notify(&self, notification: Notification) -> Result<(), Self::AdapterError>;
}
