// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CatalogError, CatalogLookup, ProductInfo};
use pillora_domain::{
    Actor, CustomerId, EmailAddress, ItemDraft, Order, OrderDraft, OrderNumber, ProductId,
    VendorId, validate_new_order,
};
use rust_decimal::Decimal;
use rust_decimal::dec;
use std::collections::{BTreeMap, BTreeSet};
use time::OffsetDateTime;
use time::macros::datetime;

pub const V1: VendorId = VendorId::new(1);
pub const V2: VendorId = VendorId::new(2);
pub const P1: ProductId = ProductId::new(101);
pub const P2: ProductId = ProductId::new(102);
pub const P3: ProductId = ProductId::new(201);

/// Catalog held in memory: P1 and P2 belong to V1, P3 to V2.
#[derive(Default)]
pub struct FakeCatalog {
    products: BTreeMap<ProductId, ProductInfo>,
    pub fail: bool,
}

impl FakeCatalog {
    pub fn seeded() -> Self {
        let mut catalog: Self = Self::default();
        catalog.add(P1, V1, "Paracetamol", dec!(10.00));
        catalog.add(P2, V1, "Cetirizine", dec!(4.25));
        catalog.add(P3, V2, "ORS Sachet", dec!(1.50));
        catalog
    }

    fn add(&mut self, product_id: ProductId, vendor_id: VendorId, name: &str, price: Decimal) {
        self.products.insert(
            product_id,
            ProductInfo {
                product_id,
                vendor_id,
                name: name.to_string(),
                price,
            },
        );
    }
}

impl CatalogLookup for FakeCatalog {
    fn product(&mut self, product_id: ProductId) -> Result<Option<ProductInfo>, CatalogError> {
        if self.fail {
            return Err(CatalogError::new("catalog offline"));
        }
        Ok(self.products.get(&product_id).cloned())
    }

    fn products_owned_by(
        &mut self,
        vendor_id: VendorId,
    ) -> Result<BTreeSet<ProductId>, CatalogError> {
        if self.fail {
            return Err(CatalogError::new("catalog offline"));
        }
        Ok(self
            .products
            .values()
            .filter(|p| p.vendor_id == vendor_id)
            .map(|p| p.product_id)
            .collect())
    }
}

pub fn now() -> OffsetDateTime {
    datetime!(2026-03-01 10:00 UTC)
}

pub fn item(product_id: ProductId, name: &str, quantity: i64, price: Decimal) -> ItemDraft {
    ItemDraft {
        product_id,
        name: name.to_string(),
        quantity,
        price,
    }
}

pub fn create_test_draft(email: &str, items: Vec<ItemDraft>) -> OrderDraft {
    OrderDraft {
        customer_id: None,
        customer_name: String::from("Asha Rao"),
        customer_email: email.to_string(),
        items,
        total_amount: None,
        shipping_address: String::from("12 MG Road, Pune"),
        payment_method: String::from("cod"),
        payment_status: None,
    }
}

pub fn create_test_order(email: &str, items: Vec<ItemDraft>, vendor_id: Option<VendorId>) -> Order {
    Order::place(
        validate_new_order(create_test_draft(email, items)).unwrap(),
        OrderNumber::generate(now()),
        vendor_id,
        now(),
    )
}

pub fn vendor(vendor_id: VendorId) -> Actor {
    Actor::vendor(vendor_id, "MediMart", None)
}

pub fn customer(email: &str) -> Actor {
    Actor::customer(CustomerId::new(9), "Asha Rao", EmailAddress::parse(email).unwrap())
}
