// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order status tracking and transition logic.
//!
//! Status changes are driven by events. The transition table is the only
//! path by which an order's status moves:
//!
//! | From         | Event             | To           |
//! |--------------|-------------------|--------------|
//! | `pending`    | `start_processing`| `processing` |
//! | `pending`    | `ship`            | `shipped`    |
//! | `processing` | `ship`            | `shipped`    |
//! | `shipped`    | `deliver`         | `delivered`  |
//! | `pending`    | `cancel`          | `cancelled`  |
//! | `processing` | `cancel`          | `cancelled`  |
//!
//! `delivered` and `cancelled` are terminal.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the vendor.
    #[default]
    Pending,
    /// Being prepared by the vendor.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Withdrawn before shipping.
    Cancelled,
}

/// Events that move an order through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderEvent {
    /// The vendor starts preparing the order.
    StartProcessing,
    /// The order leaves the vendor.
    Ship,
    /// The carrier confirms delivery.
    Deliver,
    /// The order is withdrawn.
    Cancel,
}

impl OrderEvent {
    /// Returns the event whose successful application lands on `target`.
    ///
    /// `pending` is only ever an initial state, so no event reaches it.
    #[must_use]
    pub const fn reaching(target: OrderStatus) -> Option<Self> {
        match target {
            OrderStatus::Pending => None,
            OrderStatus::Processing => Some(Self::StartProcessing),
            OrderStatus::Shipped => Some(Self::Ship),
            OrderStatus::Delivered => Some(Self::Deliver),
            OrderStatus::Cancelled => Some(Self::Cancel),
        }
    }
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if no event leaves this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Looks up `(self, event)` in the transition table.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` when the pair is not an
    /// edge of the table.
    pub fn apply(self, event: OrderEvent) -> Result<Self, DomainError> {
        let next: Option<Self> = match (self, event) {
            (Self::Pending, OrderEvent::StartProcessing) => Some(Self::Processing),
            (Self::Pending | Self::Processing, OrderEvent::Ship) => Some(Self::Shipped),
            (Self::Shipped, OrderEvent::Deliver) => Some(Self::Delivered),
            (Self::Pending | Self::Processing, OrderEvent::Cancel) => Some(Self::Cancelled),
            _ => None,
        };

        next.ok_or(DomainError::InvalidStatusTransition {
            from: self,
            to: Self::landing(event),
            reason: if self.is_terminal() {
                "order is in a terminal state"
            } else {
                "transition not permitted by order lifecycle rules"
            },
        })
    }

    /// Moves to `target` through the event that reaches it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if no event reaches
    /// `target` or the edge is not in the table.
    pub fn transition_to(self, target: Self) -> Result<Self, DomainError> {
        let event: OrderEvent =
            OrderEvent::reaching(target).ok_or(DomainError::InvalidStatusTransition {
                from: self,
                to: target,
                reason: "pending is only an initial state",
            })?;
        self.apply(event)
    }

    const fn landing(event: OrderEvent) -> Self {
        match event {
            OrderEvent::StartProcessing => Self::Processing,
            OrderEvent::Ship => Self::Shipped,
            OrderEvent::Deliver => Self::Delivered,
            OrderEvent::Cancel => Self::Cancelled,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidOrderStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
