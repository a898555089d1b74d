// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use pillora_domain::{Actor, CustomerId, EmailAddress, ProductId, VendorId};
use pillora_persistence::Persistence;
use rust_decimal::{Decimal, dec};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{CreateOrderRequest, OrderItemRequest, create_order};

pub const CREATED_AT: &str = "+002026-01-01T00:00:00.000000000Z";

/// Two vendors, two customers, and three products.
///
/// `p1` and `p2` belong to `vendor_one`, `p3` to `vendor_two`.
pub struct Fixture {
    pub persistence: Persistence,
    pub vendor_one: Actor,
    pub vendor_two: Actor,
    pub customer_a: Actor,
    pub customer_b: Actor,
    pub p1: ProductId,
    pub p2: ProductId,
    pub p3: ProductId,
}

pub fn fixture() -> Fixture {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let medimart: EmailAddress = EmailAddress::parse("orders@medimart.in").unwrap();
    let healthhub: EmailAddress = EmailAddress::parse("sales@healthhub.in").unwrap();
    let asha: EmailAddress = EmailAddress::parse("a@x.com").unwrap();
    let bina: EmailAddress = EmailAddress::parse("b@x.com").unwrap();

    let v1: VendorId = persistence
        .create_vendor("MediMart", &medimart, CREATED_AT)
        .unwrap();
    let v2: VendorId = persistence
        .create_vendor("HealthHub", &healthhub, CREATED_AT)
        .unwrap();
    let c1: CustomerId = persistence
        .create_customer("Asha Rao", &asha, CREATED_AT)
        .unwrap();
    let c2: CustomerId = persistence
        .create_customer("Bina Shah", &bina, CREATED_AT)
        .unwrap();

    let p1: ProductId = persistence
        .create_product(v1, "Paracetamol", dec!(10.00))
        .unwrap();
    let p2: ProductId = persistence
        .create_product(v1, "Cetirizine", dec!(4.25))
        .unwrap();
    let p3: ProductId = persistence
        .create_product(v2, "ORS Sachet", dec!(1.50))
        .unwrap();

    Fixture {
        persistence,
        vendor_one: Actor::vendor(v1, "MediMart", Some(medimart)),
        vendor_two: Actor::vendor(v2, "HealthHub", Some(healthhub)),
        customer_a: Actor::customer(c1, "Asha Rao", asha),
        customer_b: Actor::customer(c2, "Bina Shah", bina),
        p1,
        p2,
        p3,
    }
}

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 10:00 UTC)
}

pub fn item(product_id: ProductId, name: &str, quantity: i64, price: Decimal) -> OrderItemRequest {
    OrderItemRequest {
        product_id: product_id.value(),
        name: name.to_string(),
        quantity,
        price,
    }
}

pub fn request(email: &str, items: Vec<OrderItemRequest>, total: Decimal) -> CreateOrderRequest {
    CreateOrderRequest {
        customer_id: None,
        customer_name: Some(String::from("Walk-in Customer")),
        customer_email: Some(email.to_string()),
        items,
        total_amount: Some(total),
        shipping_address: Some(String::from("12 MG Road, Pune")),
        payment_method: Some(String::from("cod")),
        payment_status: None,
    }
}

/// Creates `{P1, "Paracetamol", 2, 10.00}` for `email` and returns its order number.
pub fn place_simple(fx: &mut Fixture, email: &str, at: OffsetDateTime) -> String {
    let req = request(email, vec![item(fx.p1, "Paracetamol", 2, dec!(10.00))], dec!(20.00));
    create_order(&mut fx.persistence, req, None, at)
        .unwrap()
        .response
        .order_number
}
