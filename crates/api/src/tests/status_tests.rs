// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{fixture, now, place_simple};
use crate::{
    ApiError, UpdatePaymentStatusRequest, UpdateStatusRequest, load_invoice_order,
    order_history, update_order_status, update_payment_status,
};
use time::Duration;

fn status(value: &str) -> UpdateStatusRequest {
    UpdateStatusRequest {
        status: value.to_string(),
    }
}

fn payment(value: &str) -> UpdatePaymentStatusRequest {
    UpdatePaymentStatusRequest {
        payment_status: value.to_string(),
    }
}

#[test]
fn test_owning_vendor_ships_order() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let v1 = fx.vendor_one.clone();

    let response = update_order_status(
        &mut fx.persistence,
        &number,
        &status("shipped"),
        &v1,
        now() + Duration::hours(1),
    )
    .unwrap();

    assert_eq!(response.status, "shipped");
    assert_ne!(response.updated_at, response.created_at);
}

#[test]
fn test_non_owning_vendor_is_forbidden() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let v2 = fx.vendor_two.clone();

    let result = update_order_status(&mut fx.persistence, &number, &status("shipped"), &v2, now());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_customer_cannot_change_status() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let a = fx.customer_a.clone();

    let result =
        update_order_status(&mut fx.persistence, &number, &status("cancelled"), &a, now());

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_status_update_errors() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let v1 = fx.vendor_one.clone();

    assert!(matches!(
        update_order_status(&mut fx.persistence, "ORD0", &status("shipped"), &v1, now()),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        update_order_status(&mut fx.persistence, &number, &status("lost"), &v1, now()),
        Err(ApiError::InvalidInput { .. })
    ));
    assert!(matches!(
        update_order_status(&mut fx.persistence, &number, &status("delivered"), &v1, now()),
        Err(ApiError::DomainRuleViolation { .. })
    ));
}

#[test]
fn test_terminal_state_rejects_further_transitions() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let v1 = fx.vendor_one.clone();

    update_order_status(&mut fx.persistence, &number, &status("cancelled"), &v1, now()).unwrap();
    let result =
        update_order_status(&mut fx.persistence, &number, &status("processing"), &v1, now());

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "order_status_transition");
        }
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_payment_status_has_no_ownership_check() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let v2 = fx.vendor_two.clone();

    let anonymous =
        update_payment_status(&mut fx.persistence, &number, &payment("paid"), None, now())
            .unwrap();
    assert_eq!(anonymous.payment_status, "paid");

    let by_stranger = update_payment_status(
        &mut fx.persistence,
        &number,
        &payment("refunded"),
        Some(&v2),
        now(),
    )
    .unwrap();
    assert_eq!(by_stranger.payment_status, "refunded");
    assert_eq!(by_stranger.status, "pending");
}

#[test]
fn test_payment_status_errors() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());

    assert!(matches!(
        update_payment_status(&mut fx.persistence, &number, &payment("bogus"), None, now()),
        Err(ApiError::InvalidInput { .. })
    ));
    assert!(matches!(
        update_payment_status(&mut fx.persistence, "ORD0", &payment("paid"), None, now()),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_history_records_each_change() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let v1 = fx.vendor_one.clone();
    let a = fx.customer_a.clone();

    update_order_status(&mut fx.persistence, &number, &status("processing"), &v1, now()).unwrap();
    update_payment_status(&mut fx.persistence, &number, &payment("paid"), None, now()).unwrap();

    let history = order_history(&mut fx.persistence, &number, &a).unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].field, "status");
    assert_eq!(history[0].previous_value, "pending");
    assert_eq!(history[0].new_value, "processing");
    assert_eq!(history[0].changed_by_kind.as_deref(), Some("vendor"));
    assert_eq!(history[0].changed_by_id, Some(v1.id));
    assert_eq!(history[1].field, "payment_status");
    assert_eq!(history[1].changed_by_kind, None);

    let b = fx.customer_b.clone();
    assert!(matches!(
        order_history(&mut fx.persistence, &number, &b),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_invoice_order_requires_visibility() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let a = fx.customer_a.clone();
    let v1 = fx.vendor_one.clone();
    let v2 = fx.vendor_two.clone();

    assert_eq!(
        load_invoice_order(&mut fx.persistence, &number, &a)
            .unwrap()
            .order_number()
            .as_str(),
        number
    );
    assert!(load_invoice_order(&mut fx.persistence, &number, &v1).is_ok());
    assert!(matches!(
        load_invoice_order(&mut fx.persistence, &number, &v2),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        load_invoice_order(&mut fx.persistence, "ORD0", &a),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
