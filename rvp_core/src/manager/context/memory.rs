// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! In-memory notification queue.
//!
//! Useful for testing, and for callers that show notifications after a batch
//! has finished.

use std::{
    collections::VecDeque,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use thiserror::Error;

use crate::manager::{adapters::Notifier, Notification};

pub type NotificationStorage = Arc<RwLock<VecDeque<Notification>>>;

#[derive(Debug, Error)]
pub enum InMemoryError {
    #[error("notification queue lock is poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    storage: NotificationStorage,
}

impl NotificationQueue {
    pub fn new(storage: NotificationStorage) -> Self {
        Self { storage }
    }

    /// Removes and returns every queued notification, oldest first.
    pub fn drain(&self) -> Result<Vec<Notification>, InMemoryError> {
        let mut storage = self.storage.write().map_err(|_| InMemoryError::Poisoned)?;
        Ok(storage.drain(..).collect())
    }

    pub fn len(&self) -> Result<usize, InMemoryError> {
        Ok(self
            .storage
            .read()
            .map_err(|_| InMemoryError::Poisoned)?
            .len())
    }

    pub fn is_empty(&self) -> Result<bool, InMemoryError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl Notifier for NotificationQueue {
    type AdapterError = InMemoryError;

    async fn notify(&self, notification: Notification) -> Result<(), Self::AdapterError> {
        self.storage
            .write()
            .map_err(|_| InMemoryError::Poisoned)?
            .push_back(notification);
        Ok(())
    }
}
