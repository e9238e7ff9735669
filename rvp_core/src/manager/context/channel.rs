// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Forwards notifications over a tokio channel.

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::SendError, UnboundedReceiver, UnboundedSender};

use crate::manager::{adapters::Notifier, Notification};

#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiving end of its channel.
    pub fn new() -> (Self, UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    type AdapterError = SendError<Notification>;

    async fn notify(&self, notification: Notification) -> Result<(), Self::AdapterError> {
        self.sender.send(notification)
    }
}
