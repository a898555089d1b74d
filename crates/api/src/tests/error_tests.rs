// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
use pillora::CoreError;
use pillora_domain::{DomainError, OrderStatus, ProductId};
use pillora_persistence::PersistenceError;

#[test]
fn test_domain_errors_map_to_fields() {
    assert!(matches!(
        translate_domain_error(DomainError::EmptyItems),
        ApiError::InvalidInput { field, .. } if field == "items"
    ));
    assert!(matches!(
        translate_domain_error(DomainError::MissingShippingAddress),
        ApiError::InvalidInput { field, .. } if field == "shippingAddress"
    ));
    assert!(matches!(
        translate_domain_error(DomainError::InvalidAmount {
            field: "price",
            value: String::from("-1"),
        }),
        ApiError::InvalidInput { field, .. } if field == "price"
    ));
}

#[test]
fn test_invalid_transition_is_rule_violation() {
    let err = DomainError::InvalidStatusTransition {
        from: OrderStatus::Delivered,
        to: OrderStatus::Pending,
        reason: "order is in a terminal state",
    };
    match translate_domain_error(err) {
        ApiError::DomainRuleViolation { rule, message } => {
            assert_eq!(rule, "order_status_transition");
            assert!(message.contains("delivered"));
        }
        other => panic!("Unexpected: {other:?}"),
    }
}

#[test]
fn test_core_errors() {
    assert!(matches!(
        translate_core_error(CoreError::UnknownProduct(ProductId::new(5))),
        ApiError::InvalidInput { field, .. } if field == "items"
    ));
    assert!(matches!(
        translate_core_error(CoreError::Forbidden(String::from("nope"))),
        ApiError::Unauthorized { .. }
    ));
    assert!(matches!(
        translate_core_error(CoreError::Catalog(String::from("down"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_persistence_errors() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::OrderNotFound(String::from("ORD1"))),
        ApiError::ResourceNotFound { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::QueryFailed(String::from("boom"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_auth_error_conversion() {
    let api: ApiError = AuthError::AuthenticationFailed {
        reason: String::from("Session expired"),
    }
    .into();
    assert_eq!(api.to_string(), "Authentication failed: Session expired");
}
