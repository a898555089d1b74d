// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::order_status::OrderStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The order has no line items.
    EmptyItems,
    /// A line item is malformed.
    InvalidItem {
        /// Zero-based position of the item in the order.
        position: usize,
        /// Why the item was rejected.
        reason: String,
    },
    /// The shipping address is empty.
    MissingShippingAddress,
    /// No customer email could be resolved for the order.
    MissingCustomerEmail,
    /// An email address is malformed.
    InvalidEmail(String),
    /// The customer name is empty.
    MissingCustomerName,
    /// A monetary amount is negative or otherwise unusable.
    InvalidAmount {
        /// The field carrying the amount.
        field: &'static str,
        /// The offending value as text.
        value: String,
    },
    /// The supplied total does not equal the sum of the line items.
    TotalMismatch {
        /// The total supplied by the caller.
        supplied: String,
        /// The total computed from the line items.
        computed: String,
    },
    /// The payment method token is empty or unknown.
    InvalidPaymentMethod(String),
    /// The payment status token is unknown.
    InvalidPaymentStatus(String),
    /// The order status token is unknown.
    InvalidOrderStatus(String),
    /// The actor kind token is unknown.
    InvalidActorKind(String),
    /// The order number is empty or contains characters that are not URL-safe.
    InvalidOrderNumber(String),
    /// The requested status change is not an edge of the transition table.
    InvalidStatusTransition {
        /// The current status.
        from: OrderStatus,
        /// The requested status.
        to: OrderStatus,
        /// Why the transition was refused.
        reason: &'static str,
    },
    /// A timestamp could not be formatted or parsed.
    InvalidTimestamp(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyItems => write!(f, "Order must contain at least one item"),
            Self::InvalidItem { position, reason } => {
                write!(f, "Invalid item at position {position}: {reason}")
            }
            Self::MissingShippingAddress => write!(f, "Shipping address is required"),
            Self::MissingCustomerEmail => write!(f, "Customer email is required"),
            Self::InvalidEmail(value) => write!(f, "Invalid email address: '{value}'"),
            Self::MissingCustomerName => write!(f, "Customer name is required"),
            Self::InvalidAmount { field, value } => {
                write!(f, "Invalid amount for {field}: {value}")
            }
            Self::TotalMismatch { supplied, computed } => {
                write!(
                    f,
                    "Total amount {supplied} does not match the item total {computed}"
                )
            }
            Self::InvalidPaymentMethod(value) => write!(f, "Invalid payment method: '{value}'"),
            Self::InvalidPaymentStatus(value) => write!(f, "Invalid payment status: '{value}'"),
            Self::InvalidOrderStatus(value) => write!(f, "Invalid order status: '{value}'"),
            Self::InvalidActorKind(value) => write!(f, "Invalid actor kind: '{value}'"),
            Self::InvalidOrderNumber(value) => write!(f, "Invalid order number: '{value}'"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move order from {from} to {to}: {reason}")
            }
            Self::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
