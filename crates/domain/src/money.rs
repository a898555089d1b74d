// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monetary helpers.
//!
//! Amounts are `rust_decimal::Decimal` throughout; floating point never
//! touches a price. Display and tax rounding use two decimal places with
//! half-away-from-zero rounding.

use crate::error::DomainError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Number of decimal places shown for every monetary value.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to two decimal places, half away from zero.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount with exactly two decimal places.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let mut rounded: Decimal = round_money(amount);
    rounded.rescale(MONEY_SCALE);
    rounded.to_string()
}

/// Parses a stored decimal amount.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmount` if the text is not a decimal number.
pub fn parse_money(field: &'static str, text: &str) -> Result<Decimal, DomainError> {
    Decimal::from_str(text.trim()).map_err(|_| DomainError::InvalidAmount {
        field,
        value: text.to_string(),
    })
}

/// A tax rate expressed as a percentage (e.g. `12` for 12%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate {
    percent: Decimal,
}

impl TaxRate {
    /// Creates a tax rate from a percentage.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if the percentage is negative or
    /// above 100.
    pub fn from_percent(percent: Decimal) -> Result<Self, DomainError> {
        if percent.is_sign_negative() || percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::InvalidAmount {
                field: "tax_rate",
                value: percent.to_string(),
            });
        }
        Ok(Self { percent })
    }

    /// Returns the rate as a percentage.
    #[must_use]
    pub const fn percent(&self) -> Decimal {
        self.percent
    }

    /// Computes the tax due on a subtotal, rounded to two decimal places.
    ///
    /// The rate is at most one, so the product never exceeds the subtotal.
    #[must_use]
    pub fn tax_on(&self, subtotal: Decimal) -> Decimal {
        round_money(subtotal * (self.percent / Decimal::ONE_HUNDRED))
    }
}

impl std::fmt::Display for TaxRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent.normalize())
    }
}
