// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order queries.
//!
//! Orders are always loaded together with their items, ordered by position.
//! Listings are sorted newest first, ties broken by descending id.

use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel::sqlite::Sqlite;
use pillora::OrderScope;
use pillora_domain::{
    CustomerId, CustomerSnapshot, EmailAddress, Order, OrderId, OrderItem, OrderNumber,
    OrderRecord, ProductId, VendorId, parse_money, parse_timestamp,
};
use std::collections::BTreeMap;
use tracing::debug;

use crate::diesel_schema::{order_items, orders};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
struct OrderRow {
    order_id: i64,
    order_number: String,
    customer_id: Option<i64>,
    customer_name: String,
    customer_email: String,
    total_amount: String,
    shipping_address: String,
    payment_method: String,
    payment_status: String,
    status: String,
    vendor_id: Option<i64>,
    created_at: String,
    updated_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_items)]
struct OrderItemRow {
    order_id: i64,
    product_id: i64,
    name: String,
    quantity: i32,
    price: String,
}

impl OrderItemRow {
    fn into_item(self) -> Result<OrderItem, PersistenceError> {
        let quantity: u32 = u32::try_from(self.quantity).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "order {} has item quantity {}",
                self.order_id, self.quantity
            ))
        })?;
        Ok(OrderItem {
            product_id: ProductId::new(self.product_id),
            name: self.name,
            quantity,
            price: parse_money("price", &self.price)?,
        })
    }
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> Result<Order, PersistenceError> {
        Ok(Order::restore(OrderRecord {
            order_id: OrderId::new(self.order_id),
            order_number: OrderNumber::parse(&self.order_number)?,
            customer: CustomerSnapshot {
                customer_id: self.customer_id.map(CustomerId::new),
                name: self.customer_name,
                email: EmailAddress::parse(&self.customer_email)?,
            },
            items,
            total_amount: parse_money("total_amount", &self.total_amount)?,
            shipping_address: self.shipping_address,
            payment_method: self.payment_method.parse()?,
            payment_status: self.payment_status.parse()?,
            status: self.status.parse()?,
            vendor_id: self.vendor_id.map(VendorId::new),
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        }))
    }
}

/// Loads the items of the given orders, grouped by order id.
fn load_items(
    conn: &mut SqliteConnection,
    order_ids: &[i64],
) -> Result<BTreeMap<i64, Vec<OrderItem>>, PersistenceError> {
    let rows: Vec<OrderItemRow> = order_items::table
        .filter(order_items::order_id.eq_any(order_ids))
        .order((order_items::order_id, order_items::position))
        .select(OrderItemRow::as_select())
        .load(conn)?;

    let mut grouped: BTreeMap<i64, Vec<OrderItem>> = BTreeMap::new();
    for row in rows {
        let order_id: i64 = row.order_id;
        grouped.entry(order_id).or_default().push(row.into_item()?);
    }
    Ok(grouped)
}

fn assemble(
    conn: &mut SqliteConnection,
    rows: Vec<OrderRow>,
) -> Result<Vec<Order>, PersistenceError> {
    let order_ids: Vec<i64> = rows.iter().map(|row| row.order_id).collect();
    let mut items: BTreeMap<i64, Vec<OrderItem>> = load_items(conn, &order_ids)?;

    rows.into_iter()
        .map(|row| {
            let order_items: Vec<OrderItem> = items.remove(&row.order_id).unwrap_or_default();
            row.into_order(order_items)
        })
        .collect()
}

fn single(
    conn: &mut SqliteConnection,
    row: Option<OrderRow>,
) -> Result<Option<Order>, PersistenceError> {
    match row {
        Some(row) => Ok(assemble(conn, vec![row])?.pop()),
        None => Ok(None),
    }
}

/// Retrieves an order by its canonical id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
/// Returns `Ok(None)` if the order does not exist.
pub fn get_order_by_id(
    conn: &mut SqliteConnection,
    order_id: OrderId,
) -> Result<Option<Order>, PersistenceError> {
    let row: Option<OrderRow> = orders::table
        .filter(orders::order_id.eq(order_id.value()))
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;
    single(conn, row)
}

/// Retrieves an order by its order number.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
/// Returns `Ok(None)` if the order does not exist.
pub fn get_order_by_number(
    conn: &mut SqliteConnection,
    order_number: &OrderNumber,
) -> Result<Option<Order>, PersistenceError> {
    let row: Option<OrderRow> = orders::table
        .filter(orders::order_number.eq(order_number.as_str()))
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;
    single(conn, row)
}

/// Lists the orders within `scope`, newest first.
///
/// Vendor scopes select orders containing any of the vendor's products,
/// regardless of the order's vendor hint.
///
/// # Errors
///
/// Returns an error if a query fails or a stored row is invalid.
pub fn list_orders(
    conn: &mut SqliteConnection,
    scope: &OrderScope,
) -> Result<Vec<Order>, PersistenceError> {
    let mut query = orders::table
        .select(OrderRow::as_select())
        .order((orders::created_at.desc(), orders::order_id.desc()))
        .into_boxed::<Sqlite>();

    match scope {
        OrderScope::Unrestricted => {}
        OrderScope::Nothing => return Ok(Vec::new()),
        OrderScope::CustomerEmail(email) => {
            query = query.filter(orders::customer_email.eq(email.as_str().to_string()));
        }
        OrderScope::VendorProducts(products) => {
            if products.is_empty() {
                return Ok(Vec::new());
            }
            let product_ids: Vec<i64> = products.iter().map(ProductId::value).collect();
            let order_ids: Vec<i64> = order_items::table
                .filter(order_items::product_id.eq_any(&product_ids))
                .select(order_items::order_id)
                .distinct()
                .load(conn)?;
            debug!(
                products = product_ids.len(),
                orders = order_ids.len(),
                "Resolved vendor order set"
            );
            query = query.filter(orders::order_id.eq_any(order_ids));
        }
    }

    let rows: Vec<OrderRow> = query.load(conn)?;
    assemble(conn, rows)
}
