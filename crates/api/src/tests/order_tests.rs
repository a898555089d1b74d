// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{Fixture, fixture, item, now, place_simple, request};
use crate::handlers::store_new_order;
use crate::{
    ApiError, CreateOrderRequest, ORDER_NUMBER_ATTEMPTS, OrderResponse, UNKNOWN_CUSTOMER_EMAIL,
    UNKNOWN_CUSTOMER_NAME, create_order, get_order, list_orders,
};
use pillora::place_order;
use pillora_domain::{ItemDraft, Order, OrderDraft, OrderNumber, OrderStatus};
use rust_decimal::{Decimal, dec};
use std::collections::BTreeSet;
use time::Duration;

fn invalid_field(result: Result<impl std::fmt::Debug, ApiError>) -> String {
    match result {
        Err(ApiError::InvalidInput { field, .. }) => field,
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_cod_order_is_pending_and_attributed_to_first_item_vendor() {
    let mut fx = fixture();
    let req = request(
        "a@x.com",
        vec![item(fx.p1, "Paracetamol", 2, dec!(10.00))],
        dec!(20.00),
    );

    let created = create_order(&mut fx.persistence, req, None, now()).unwrap();
    let response: OrderResponse = created.response;

    assert_eq!(response.payment_status, "pending");
    assert_eq!(response.status, "pending");
    assert_eq!(response.vendor_id, fx.vendor_one.vendor_id().map(|v| v.value()));
    assert_eq!(response.total_amount, dec!(20.00));
    assert!(response.order_number.starts_with("ORD"));
    assert!(response.id > 0);
    assert_eq!(created.order.status(), OrderStatus::Pending);
    assert_eq!(created.order.customer().email.as_str(), "a@x.com");
}

#[test]
fn test_guest_order_shows_fallback_customer_fields() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "guest@x.com", now());

    let response = get_order(
        &mut fx.persistence,
        &number,
        &fx.vendor_one,
    )
    .unwrap();

    assert_eq!(response.customer_id, None);
    assert_eq!(response.customer_name, UNKNOWN_CUSTOMER_NAME);
    assert_eq!(response.customer_email, UNKNOWN_CUSTOMER_EMAIL);
}

#[test]
fn test_guest_create_response_returns_stored_customer_fields() {
    let mut fx = fixture();
    let req = request(
        "Guest@X.com",
        vec![item(fx.p1, "Paracetamol", 2, dec!(10.00))],
        dec!(20.00),
    );

    let response = create_order(&mut fx.persistence, req, None, now())
        .unwrap()
        .response;

    assert_eq!(response.customer_id, None);
    assert_eq!(response.customer_name, "Walk-in Customer");
    assert_eq!(response.customer_email, "guest@x.com");
}

#[test]
fn test_overflowing_line_total_is_invalid_input() {
    let mut fx = fixture();
    let huge = Decimal::MAX / dec!(2) + Decimal::ONE;
    let req = request("a@x.com", vec![item(fx.p1, "Paracetamol", 2, huge)], huge);

    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, req, None, now())),
        "items"
    );
}

#[test]
fn test_quantity_beyond_storage_range_is_invalid_input() {
    let mut fx = fixture();
    let req = request(
        "a@x.com",
        vec![item(fx.p1, "Paracetamol", 3_000_000_000, dec!(10.00))],
        Decimal::from(30_000_000_000_i64),
    );

    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, req, None, now())),
        "items"
    );
}

#[test]
fn test_customer_id_in_body_resolves_display_fields() {
    let mut fx = fixture();
    let mut req = request(
        "a@x.com",
        vec![item(fx.p1, "Paracetamol", 1, dec!(10.00))],
        dec!(10.00),
    );
    req.customer_id = Some(fx.customer_a.id);

    let created = create_order(&mut fx.persistence, req, None, now())
        .unwrap()
        .response;
    assert_eq!(created.customer_id, Some(fx.customer_a.id));
    assert_eq!(created.customer_name, "Walk-in Customer");

    let response = get_order(&mut fx.persistence, &created.order_number, &fx.vendor_one).unwrap();

    assert_eq!(response.customer_id, Some(fx.customer_a.id));
    assert_eq!(response.customer_name, "Asha Rao");
    assert_eq!(response.customer_email, "a@x.com");
}

#[test]
fn test_unknown_customer_id_rejected() {
    let mut fx = fixture();
    let mut req = request(
        "a@x.com",
        vec![item(fx.p1, "Paracetamol", 1, dec!(10.00))],
        dec!(10.00),
    );
    req.customer_id = Some(9_999);

    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, req, None, now())),
        "customerId"
    );
}

#[test]
fn test_authenticated_customer_overrides_body_identity() {
    let mut fx = fixture();
    let req = request(
        "someone-else@x.com",
        vec![item(fx.p1, "Paracetamol", 1, dec!(10.00))],
        dec!(10.00),
    );
    let actor = fx.customer_a.clone();

    let created = create_order(&mut fx.persistence, req, Some(&actor), now()).unwrap();

    assert_eq!(created.order.customer().email.as_str(), "a@x.com");
    assert_eq!(created.order.customer().name, "Asha Rao");
    assert_eq!(created.response.customer_id, Some(actor.id));

    let listed = list_orders(&mut fx.persistence, &actor).unwrap();
    assert_eq!(listed.len(), 1);
}

#[test]
fn test_paypal_completed_is_paid() {
    let mut fx = fixture();
    let mut req = request(
        "a@x.com",
        vec![item(fx.p1, "Paracetamol", 1, dec!(10.00))],
        dec!(10.00),
    );
    req.payment_method = Some(String::from("paypal"));
    req.payment_status = Some(String::from("completed"));

    let response = create_order(&mut fx.persistence, req, None, now())
        .unwrap()
        .response;

    assert_eq!(response.payment_method, "paypal");
    assert_eq!(response.payment_status, "paid");
}

#[test]
fn test_blank_item_name_taken_from_catalog() {
    let mut fx = fixture();
    let req = request("a@x.com", vec![item(fx.p2, "", 2, dec!(4.25))], dec!(8.50));

    let response = create_order(&mut fx.persistence, req, None, now())
        .unwrap()
        .response;

    assert_eq!(response.items[0].name, "Cetirizine");
}

#[test]
fn test_missing_total_is_computed() {
    let mut fx = fixture();
    let mut req = request(
        "a@x.com",
        vec![
            item(fx.p1, "Paracetamol", 2, dec!(10.00)),
            item(fx.p2, "Cetirizine", 1, dec!(4.25)),
        ],
        dec!(0),
    );
    req.total_amount = None;

    let response = create_order(&mut fx.persistence, req, None, now())
        .unwrap()
        .response;

    assert_eq!(response.total_amount, dec!(24.25));
}

#[test]
fn test_validation_failures_name_the_field() {
    let mut fx = fixture();
    let p1 = fx.p1;
    let good = || request("a@x.com", vec![item(p1, "Paracetamol", 2, dec!(10.00))], dec!(20.00));

    let empty: CreateOrderRequest = CreateOrderRequest {
        items: Vec::new(),
        ..good()
    };
    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, empty, None, now())),
        "items"
    );

    let no_address: CreateOrderRequest = CreateOrderRequest {
        shipping_address: Some(String::from("   ")),
        ..good()
    };
    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, no_address, None, now())),
        "shippingAddress"
    );

    let no_email: CreateOrderRequest = CreateOrderRequest {
        customer_email: None,
        ..good()
    };
    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, no_email, None, now())),
        "customerEmail"
    );

    let wrong_total: CreateOrderRequest = CreateOrderRequest {
        total_amount: Some(dec!(25.00)),
        ..good()
    };
    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, wrong_total, None, now())),
        "totalAmount"
    );

    let bad_method: CreateOrderRequest = CreateOrderRequest {
        payment_method: Some(String::from("barter")),
        ..good()
    };
    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, bad_method, None, now())),
        "paymentMethod"
    );

    let zero_quantity: CreateOrderRequest = CreateOrderRequest {
        items: vec![item(p1, "Paracetamol", 0, dec!(10.00))],
        total_amount: None,
        ..good()
    };
    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, zero_quantity, None, now())),
        "items"
    );

    assert!(list_orders(&mut fx.persistence, &fx.vendor_one.clone()).unwrap().is_empty());
}

#[test]
fn test_unknown_product_rejected() {
    let mut fx = fixture();
    let req = request(
        "a@x.com",
        vec![item(pillora_domain::ProductId::new(424_242), "Ghost", 1, dec!(1.00))],
        dec!(1.00),
    );

    assert_eq!(
        invalid_field(create_order(&mut fx.persistence, req, None, now())),
        "items"
    );
}

#[test]
fn test_order_numbers_are_unique() {
    let mut fx = fixture();
    let numbers: BTreeSet<String> = (0..50)
        .map(|_| place_simple(&mut fx, "a@x.com", now()))
        .collect();
    assert_eq!(numbers.len(), 50);
}

/// A placed, unsaved order for `a@x.com` carrying `number`.
fn unsaved_order(fx: &mut Fixture, number: &str) -> Order {
    let draft = OrderDraft {
        customer_id: None,
        customer_name: String::from("Walk-in Customer"),
        customer_email: String::from("a@x.com"),
        items: vec![ItemDraft {
            product_id: fx.p1,
            name: String::from("Paracetamol"),
            quantity: 1,
            price: dec!(10.00),
        }],
        total_amount: Some(dec!(10.00)),
        shipping_address: String::from("12 MG Road, Pune"),
        payment_method: String::from("cod"),
        payment_status: None,
    };
    let mut order = place_order(draft, &mut fx.persistence, now()).unwrap();
    order.renumber(OrderNumber::parse(number).unwrap()).unwrap();
    order
}

#[test]
fn test_colliding_order_number_is_regenerated() {
    let mut fx = fixture();
    let taken = place_simple(&mut fx, "a@x.com", now());
    let order = unsaved_order(&mut fx, &taken);

    let mut drawn: usize = 0;
    let stored = store_new_order(&mut fx.persistence, order, || {
        drawn += 1;
        OrderNumber::generate(now())
    })
    .unwrap();

    assert_eq!(drawn, 1);
    assert_ne!(stored.order_number().as_str(), taken);
    assert!(stored.order_id().is_some());

    let fetched = get_order(
        &mut fx.persistence,
        stored.order_number().as_str(),
        &fx.vendor_one,
    )
    .unwrap();
    assert_eq!(fetched.total_amount, dec!(10.00));

    let original = get_order(&mut fx.persistence, &taken, &fx.vendor_one).unwrap();
    assert_eq!(original.total_amount, dec!(20.00));
}

#[test]
fn test_persistent_collisions_give_up_after_bounded_attempts() {
    let mut fx = fixture();
    let taken = place_simple(&mut fx, "a@x.com", now());
    let order = unsaved_order(&mut fx, &taken);

    let mut drawn: usize = 0;
    let result = store_new_order(&mut fx.persistence, order, || {
        drawn += 1;
        OrderNumber::parse(&taken).unwrap()
    });

    assert!(matches!(result, Err(ApiError::Internal { .. })));
    assert_eq!(drawn, ORDER_NUMBER_ATTEMPTS - 1);
}

#[test]
fn test_customer_listing_is_scoped_by_email() {
    let mut fx = fixture();
    let mine = place_simple(&mut fx, "a@x.com", now());
    let theirs = place_simple(&mut fx, "b@x.com", now());

    let a = fx.customer_a.clone();
    let b = fx.customer_b.clone();
    let for_a: Vec<String> = list_orders(&mut fx.persistence, &a)
        .unwrap()
        .into_iter()
        .map(|o| o.order_number)
        .collect();
    let for_b: Vec<String> = list_orders(&mut fx.persistence, &b)
        .unwrap()
        .into_iter()
        .map(|o| o.order_number)
        .collect();

    assert_eq!(for_a, vec![mine.clone()]);
    assert_eq!(for_b, vec![theirs]);
    assert!(!for_b.contains(&mine));
}

#[test]
fn test_vendor_listing_uses_owned_products() {
    let mut fx = fixture();
    let only_v1 = place_simple(&mut fx, "a@x.com", now());
    let mixed_req = request(
        "a@x.com",
        vec![
            item(fx.p3, "ORS Sachet", 2, dec!(1.50)),
            item(fx.p1, "Paracetamol", 1, dec!(10.00)),
        ],
        dec!(13.00),
    );
    let mixed = create_order(&mut fx.persistence, mixed_req, None, now() + Duration::minutes(5))
        .unwrap()
        .response;

    // First item belongs to the second vendor.
    assert_eq!(mixed.vendor_id, fx.vendor_two.vendor_id().map(|v| v.value()));

    let v1 = fx.vendor_one.clone();
    let v2 = fx.vendor_two.clone();
    let for_v1: Vec<String> = list_orders(&mut fx.persistence, &v1)
        .unwrap()
        .into_iter()
        .map(|o| o.order_number)
        .collect();
    let for_v2: Vec<String> = list_orders(&mut fx.persistence, &v2)
        .unwrap()
        .into_iter()
        .map(|o| o.order_number)
        .collect();

    assert_eq!(for_v1, vec![mixed.order_number.clone(), only_v1]);
    assert_eq!(for_v2, vec![mixed.order_number]);
}

#[test]
fn test_get_order_by_id_and_number() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let a = fx.customer_a.clone();

    let by_number = get_order(&mut fx.persistence, &number, &a).unwrap();
    let by_id = get_order(&mut fx.persistence, &by_number.id.to_string(), &a).unwrap();

    assert_eq!(by_number, by_id);
    assert_eq!(by_number.customer_name, UNKNOWN_CUSTOMER_NAME);
}

#[test]
fn test_get_order_hides_orders_from_other_tenants() {
    let mut fx = fixture();
    let number = place_simple(&mut fx, "a@x.com", now());
    let b = fx.customer_b.clone();
    let v2 = fx.vendor_two.clone();

    assert!(matches!(
        get_order(&mut fx.persistence, &number, &b),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        get_order(&mut fx.persistence, &number, &v2),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        get_order(&mut fx.persistence, "ORD-missing", &b),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        get_order(&mut fx.persistence, "not a number!", &b),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
