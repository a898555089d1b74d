// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod order_tests;
mod transition_tests;

use crate::Persistence;
use pillora_domain::{
    CustomerId, EmailAddress, ItemDraft, Order, OrderDraft, OrderNumber, ProductId, VendorId,
    validate_new_order,
};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use time::macros::datetime;

pub const CREATED_AT: &str = "+002026-01-01T00:00:00.000000000Z";

/// Two vendors and one customer, with products P1, P2 owned by the first
/// vendor and P3 by the second.
pub struct Seed {
    pub vendor_one: VendorId,
    pub vendor_two: VendorId,
    pub customer: CustomerId,
    pub p1: ProductId,
    pub p2: ProductId,
    pub p3: ProductId,
}

pub fn seed(persistence: &mut Persistence) -> Seed {
    let vendor_one: VendorId = persistence
        .create_vendor(
            "MediMart",
            &EmailAddress::parse("orders@medimart.in").unwrap(),
            CREATED_AT,
        )
        .unwrap();
    let vendor_two: VendorId = persistence
        .create_vendor(
            "HealthHub",
            &EmailAddress::parse("sales@healthhub.in").unwrap(),
            CREATED_AT,
        )
        .unwrap();
    let customer: CustomerId = persistence
        .create_customer(
            "Asha Rao",
            &EmailAddress::parse("a@x.com").unwrap(),
            CREATED_AT,
        )
        .unwrap();
    let p1: ProductId = persistence
        .create_product(vendor_one, "Paracetamol", Decimal::new(1000, 2))
        .unwrap();
    let p2: ProductId = persistence
        .create_product(vendor_one, "Cetirizine", Decimal::new(425, 2))
        .unwrap();
    let p3: ProductId = persistence
        .create_product(vendor_two, "ORS Sachet", Decimal::new(150, 2))
        .unwrap();
    Seed {
        vendor_one,
        vendor_two,
        customer,
        p1,
        p2,
        p3,
    }
}

pub fn item(product_id: ProductId, name: &str, quantity: i64, price: Decimal) -> ItemDraft {
    ItemDraft {
        product_id,
        name: name.to_string(),
        quantity,
        price,
    }
}

pub fn build_order(
    email: &str,
    items: Vec<ItemDraft>,
    vendor_id: Option<VendorId>,
    created_at: OffsetDateTime,
) -> Order {
    let draft: OrderDraft = OrderDraft {
        customer_id: None,
        customer_name: String::from("Asha Rao"),
        customer_email: email.to_string(),
        items,
        total_amount: None,
        shipping_address: String::from("12 MG Road, Pune"),
        payment_method: String::from("cod"),
        payment_status: None,
    };
    Order::place(
        validate_new_order(draft).unwrap(),
        OrderNumber::generate(created_at),
        vendor_id,
        created_at,
    )
}

pub fn t0() -> OffsetDateTime {
    datetime!(2026-03-01 10:00 UTC)
}
