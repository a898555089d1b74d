// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, OrderStatus};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::EmptyItems;
    assert_eq!(format!("{err}"), "Order must contain at least one item");

    let err: DomainError = DomainError::InvalidItem {
        position: 1,
        reason: String::from("name is required"),
    };
    assert_eq!(
        format!("{err}"),
        "Invalid item at position 1: name is required"
    );

    let err: DomainError = DomainError::TotalMismatch {
        supplied: String::from("25.00"),
        computed: String::from("20.00"),
    };
    assert_eq!(
        format!("{err}"),
        "Total amount 25.00 does not match the item total 20.00"
    );

    let err: DomainError = DomainError::InvalidStatusTransition {
        from: OrderStatus::Delivered,
        to: OrderStatus::Shipped,
        reason: "order is in a terminal state",
    };
    assert_eq!(
        format!("{err}"),
        "Cannot move order from delivered to shipped: order is in a terminal state"
    );

    let err: DomainError = DomainError::InvalidPaymentMethod(String::from("barter"));
    assert_eq!(format!("{err}"), "Invalid payment method: 'barter'");
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::MissingShippingAddress);
    assert_eq!(err.to_string(), "Shipping address is required");
}
