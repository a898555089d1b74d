// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use time::OffsetDateTime;

/// Per-process sequence mixed into generated order numbers so that two
/// orders created in the same millisecond still differ.
static ORDER_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Width of the sequence suffix.
const SEQUENCE_SPAN: u32 = 10_000;

/// The public, URL-safe identifier of an order.
///
/// Generated once at creation as `ORD<unix millis><4-digit sequence>` and
/// never changed. Cross-process uniqueness is guaranteed by the storage
/// layer's unique constraint; a collision there triggers regeneration.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generates a fresh order number for an order created at `now`.
    #[must_use]
    pub fn generate(now: OffsetDateTime) -> Self {
        let millis: i128 = now.unix_timestamp_nanos() / 1_000_000;
        let sequence: u32 = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed) % SEQUENCE_SPAN;
        Self(format!("ORD{millis}{sequence:04}"))
    }

    /// Parses an order number received from a caller or the database.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOrderNumber` if the value is empty or
    /// contains anything other than ASCII letters, digits, `-` or `_`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let url_safe: bool = !value.is_empty()
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if url_safe {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidOrderNumber(value.to_string()))
        }
    }

    /// Returns the order number text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the invoice number derived from this order number.
    #[must_use]
    pub fn invoice_number(&self) -> String {
        format!("INV-{}", self.0)
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<OrderNumber> for String {
    fn from(value: OrderNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_numbers_are_url_safe_and_parse() {
        let number: OrderNumber = OrderNumber::generate(OffsetDateTime::now_utc());
        assert!(number.as_str().starts_with("ORD"));
        assert_eq!(OrderNumber::parse(number.as_str()), Ok(number));
    }

    #[test]
    fn test_same_instant_yields_distinct_numbers() {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let numbers: HashSet<OrderNumber> = (0..500).map(|_| OrderNumber::generate(now)).collect();
        assert_eq!(numbers.len(), 500);
    }

    #[test]
    fn test_parse_rejects_unsafe_values() {
        assert!(OrderNumber::parse("").is_err());
        assert!(OrderNumber::parse("ORD 1").is_err());
        assert!(OrderNumber::parse("ORD/1").is_err());
        assert!(OrderNumber::parse("ORD-1_a").is_ok());
    }

    #[test]
    fn test_invoice_number() {
        let number: OrderNumber = OrderNumber::parse("ORD1700000000000").unwrap_or_else(|e| {
            panic!("valid order number rejected: {e}");
        });
        assert_eq!(number.invoice_number(), "INV-ORD1700000000000");
    }
}
