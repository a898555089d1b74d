// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{Seed, build_order, item, seed, t0};
use crate::{Persistence, PersistenceError};
use pillora_domain::{Order, OrderId, OrderNumber, OrderStatus, PaymentStatus};
use rust_decimal::dec;
use std::collections::HashSet;

#[test]
fn test_create_and_reload_order() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let s: Seed = seed(&mut persistence);
    let order: Order = build_order(
        "a@x.com",
        vec![
            item(s.p1, "Paracetamol", 2, dec!(10.00)),
            item(s.p3, "ORS Sachet", 1, dec!(1.50)),
        ],
        Some(s.vendor_one),
        t0(),
    );

    let order_id: OrderId = persistence.create_order(&order).unwrap();
    let stored: Order = persistence.get_order(order_id).unwrap().unwrap();

    assert_eq!(stored, order.clone().with_id(order_id));
    assert_eq!(stored.items()[0].name, "Paracetamol");
    assert_eq!(stored.items()[1].product_id, s.p3);
    assert_eq!(stored.total_amount(), dec!(21.50));
    assert_eq!(stored.status(), OrderStatus::Pending);
    assert_eq!(stored.payment_status(), PaymentStatus::Pending);
    assert_eq!(stored.created_at(), t0());
}

#[test]
fn test_lookup_by_order_number() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let s: Seed = seed(&mut persistence);
    let order: Order = build_order(
        "a@x.com",
        vec![item(s.p1, "Paracetamol", 1, dec!(10.00))],
        Some(s.vendor_one),
        t0(),
    );
    let order_id: OrderId = persistence.create_order(&order).unwrap();

    let found: Order = persistence
        .get_order_by_number(order.order_number())
        .unwrap()
        .unwrap();
    assert_eq!(found.order_id(), Some(order_id));

    let missing: Option<Order> = persistence
        .get_order_by_number(&OrderNumber::parse("ORD0").unwrap())
        .unwrap();
    assert!(missing.is_none());
    assert!(persistence.get_order(OrderId::new(999)).unwrap().is_none());
}

#[test]
fn test_duplicate_order_number_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let s: Seed = seed(&mut persistence);
    let first: Order = build_order(
        "a@x.com",
        vec![item(s.p1, "Paracetamol", 1, dec!(10.00))],
        Some(s.vendor_one),
        t0(),
    );
    persistence.create_order(&first).unwrap();

    let mut second: Order = build_order(
        "b@x.com",
        vec![item(s.p2, "Cetirizine", 1, dec!(4.25))],
        Some(s.vendor_one),
        t0(),
    );
    second.renumber(first.order_number().clone()).unwrap();

    assert_eq!(
        persistence.create_order(&second),
        Err(PersistenceError::DuplicateOrderNumber(
            first.order_number().to_string()
        ))
    );
    // the failed insert left no partial rows behind
    assert_eq!(
        persistence
            .list_orders(&pillora::OrderScope::Unrestricted)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_many_orders_get_distinct_numbers() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let s: Seed = seed(&mut persistence);
    let mut numbers: HashSet<String> = HashSet::new();
    for _ in 0..50 {
        let order: Order = build_order(
            "a@x.com",
            vec![item(s.p1, "Paracetamol", 1, dec!(10.00))],
            Some(s.vendor_one),
            t0(),
        );
        persistence.create_order(&order).unwrap();
        numbers.insert(order.order_number().to_string());
    }
    assert_eq!(numbers.len(), 50);
}
