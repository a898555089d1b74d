// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{Seed, build_order, item, seed, t0};
use crate::{Persistence, PersistenceError};
use pillora::{ChangedField, Command, OrderChange, TransitionResult, apply};
use pillora_domain::{
    Actor, ActorKind, Order, OrderId, OrderStatus, PaymentStatus,
};
use rust_decimal::dec;
use time::Duration;

fn stored_order(persistence: &mut Persistence, s: &Seed) -> Order {
    let order: Order = build_order(
        "a@x.com",
        vec![item(s.p1, "Paracetamol", 2, dec!(10.00))],
        Some(s.vendor_one),
        t0(),
    );
    let order_id: OrderId = persistence.create_order(&order).unwrap();
    persistence.get_order(order_id).unwrap().unwrap()
}

#[test]
fn test_status_transition_persists_with_history() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let s: Seed = seed(&mut persistence);
    let order: Order = stored_order(&mut persistence, &s);
    let vendor: Actor = Actor::vendor(s.vendor_one, "MediMart", None);
    let later = t0() + Duration::hours(3);

    let result: TransitionResult = apply(
        &order,
        Command::SetStatus {
            target: OrderStatus::Shipped,
        },
        Some(&vendor),
        &mut persistence,
        later,
    )
    .unwrap();
    persistence.persist_transition(&result).unwrap();

    let order_id: OrderId = order.order_id().unwrap();
    let reloaded: Order = persistence.get_order(order_id).unwrap().unwrap();
    assert_eq!(reloaded.status(), OrderStatus::Shipped);
    assert_eq!(reloaded.updated_at(), later);
    assert_eq!(reloaded.created_at(), t0());

    let history: Vec<OrderChange> = persistence.order_history(order_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].field, ChangedField::Status);
    assert_eq!(history[0].previous_value, "pending");
    assert_eq!(history[0].new_value, "shipped");
    assert_eq!(
        history[0].changed_by,
        Some((ActorKind::Vendor, s.vendor_one.value()))
    );
    assert_eq!(history[0].changed_at, later);
}

#[test]
fn test_payment_transition_by_system() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let s: Seed = seed(&mut persistence);
    let order: Order = stored_order(&mut persistence, &s);

    let result: TransitionResult = apply(
        &order,
        Command::SetPaymentStatus {
            payment_status: PaymentStatus::Paid,
        },
        None,
        &mut persistence,
        t0(),
    )
    .unwrap();
    persistence.persist_transition(&result).unwrap();

    let order_id: OrderId = order.order_id().unwrap();
    let reloaded: Order = persistence.get_order(order_id).unwrap().unwrap();
    assert_eq!(reloaded.payment_status(), PaymentStatus::Paid);
    assert_eq!(reloaded.status(), OrderStatus::Pending);

    let history: Vec<OrderChange> = persistence.order_history(order_id).unwrap();
    assert_eq!(history[0].field, ChangedField::PaymentStatus);
    assert_eq!(history[0].changed_by, None);
}

#[test]
fn test_transition_of_unsaved_order_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let s: Seed = seed(&mut persistence);
    let unsaved: Order = build_order(
        "a@x.com",
        vec![item(s.p1, "Paracetamol", 1, dec!(10.00))],
        Some(s.vendor_one),
        t0(),
    );
    let result: TransitionResult = apply(
        &unsaved,
        Command::SetStatus {
            target: OrderStatus::Cancelled,
        },
        None,
        &mut persistence,
        t0(),
    )
    .unwrap();
    assert!(matches!(
        persistence.persist_transition(&result),
        Err(PersistenceError::OrderNotFound(_))
    ));
}
