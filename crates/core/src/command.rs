// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pillora_domain::{OrderStatus, PaymentStatus};

/// A requested change to an existing order.
///
/// Commands are the only way to request order mutations after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the order to a new fulfilment status.
    SetStatus {
        /// The requested status.
        target: OrderStatus,
    },
    /// Overwrite the payment status label.
    SetPaymentStatus {
        /// The new label.
        payment_status: PaymentStatus,
    },
}

impl Command {
    /// Returns the name recorded in the order history.
    #[must_use]
    pub const fn field(&self) -> ChangedField {
        match self {
            Self::SetStatus { .. } => ChangedField::Status,
            Self::SetPaymentStatus { .. } => ChangedField::PaymentStatus,
        }
    }
}

/// The order field a history entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangedField {
    Status,
    PaymentStatus,
}

impl ChangedField {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::PaymentStatus => "payment_status",
        }
    }
}

impl std::str::FromStr for ChangedField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Self::Status),
            "payment_status" => Ok(Self::PaymentStatus),
            _ => Err(format!("Unknown history field: {s}")),
        }
    }
}

impl std::fmt::Display for ChangedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
