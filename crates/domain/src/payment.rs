// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment method and payment status labels.
//!
//! Payment status is a stored label, not a reconciled gateway state.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// `PayPal` checkout.
    Paypal,
    /// Card payment.
    Card,
}

impl PaymentMethod {
    /// Returns the token used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cod => "cod",
            Self::Paypal => "paypal",
            Self::Card => "card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cod" => Ok(Self::Cod),
            "paypal" => Ok(Self::Paypal),
            "card" => Ok(Self::Card),
            _ => Err(DomainError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment state label stored on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting payment.
    #[default]
    Pending,
    /// Payment received.
    Paid,
    /// Payment attempt failed.
    Failed,
    /// Payment returned to the customer.
    Refunded,
}

impl PaymentStatus {
    /// Returns the token used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }

    /// Derives the payment status recorded at order creation.
    ///
    /// Cash on delivery is always pending. Other methods take the gateway
    /// result supplied with the order (`completed` counts as paid), or
    /// pending when none was supplied.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPaymentStatus` if a supplied gateway
    /// result is not a known status.
    pub fn at_creation(method: PaymentMethod, supplied: Option<&str>) -> Result<Self, DomainError> {
        if method == PaymentMethod::Cod {
            return Ok(Self::Pending);
        }
        supplied
            .filter(|s| !s.trim().is_empty())
            .map_or(Ok(Self::Pending), str::parse)
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "paid" | "completed" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            _ => Err(DomainError::InvalidPaymentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cod_is_always_pending() {
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Cod, None),
            Ok(PaymentStatus::Pending)
        );
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Cod, Some("paid")),
            Ok(PaymentStatus::Pending)
        );
    }

    #[test]
    fn test_paypal_completed_is_paid() {
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Paypal, Some("completed")),
            Ok(PaymentStatus::Paid)
        );
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Paypal, Some("PAID")),
            Ok(PaymentStatus::Paid)
        );
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Paypal, Some("failed")),
            Ok(PaymentStatus::Failed)
        );
    }

    #[test]
    fn test_missing_result_defaults_to_pending() {
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Card, None),
            Ok(PaymentStatus::Pending)
        );
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Paypal, Some("  ")),
            Ok(PaymentStatus::Pending)
        );
    }

    #[test]
    fn test_unknown_supplied_status_rejected() {
        assert_eq!(
            PaymentStatus::at_creation(PaymentMethod::Card, Some("authorized")),
            Err(DomainError::InvalidPaymentStatus(String::from("authorized")))
        );
    }

    #[test]
    fn test_payment_method_parsing() {
        assert_eq!("COD".parse::<PaymentMethod>(), Ok(PaymentMethod::Cod));
        assert_eq!("paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::Paypal));
        assert!("barter".parse::<PaymentMethod>().is_err());
    }
}
