// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use rvp_receipt::PayloadVariant;

/// Outcome of a single receipt export, as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Exported {
        code: String,
        variant: PayloadVariant,
        hash_prefix: String,
    },
    Failed {
        code: String,
        message: String,
    },
}

impl Notification {
    pub fn code(&self) -> &str {
        match self {
            Notification::Exported { code, .. } | Notification::Failed { code, .. } => code,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failed { .. })
    }
}
