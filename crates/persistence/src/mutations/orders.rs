// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order mutations.
//!
//! Each operation runs in a single transaction: an order is stored with all
//! of its items or not at all, and a transition updates the order row and
//! appends its history entry together.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pillora::TransitionResult;
use pillora_domain::{Order, OrderId, OrderItem, format_timestamp};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{order_items, order_status_history, orders};
use crate::error::PersistenceError;

/// Inserts a placed order and its items.
///
/// # Returns
///
/// The canonical id assigned to the order.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateOrderNumber` if the order number is
/// already taken, or another error if the insert fails.
pub fn insert_order(
    conn: &mut SqliteConnection,
    order: &Order,
) -> Result<OrderId, PersistenceError> {
    let created_at: String = format_timestamp(order.created_at())?;
    let updated_at: String = format_timestamp(order.updated_at())?;

    conn.transaction::<OrderId, PersistenceError, _>(|conn| {
        let inserted = diesel::insert_into(orders::table)
            .values((
                orders::order_number.eq(order.order_number().as_str()),
                orders::customer_id.eq(order.customer().customer_id.map(|id| id.value())),
                orders::customer_name.eq(&order.customer().name),
                orders::customer_email.eq(order.customer().email.as_str()),
                orders::total_amount.eq(order.total_amount().to_string()),
                orders::shipping_address.eq(order.shipping_address()),
                orders::payment_method.eq(order.payment_method().as_str()),
                orders::payment_status.eq(order.payment_status().as_str()),
                orders::status.eq(order.status().as_str()),
                orders::vendor_id.eq(order.vendor_id().map(|id| id.value())),
                orders::created_at.eq(&created_at),
                orders::updated_at.eq(&updated_at),
            ))
            .execute(conn);

        match inserted {
            Ok(_) => {}
            Err(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            )) => {
                return Err(PersistenceError::DuplicateOrderNumber(
                    order.order_number().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        let order_id: i64 = conn.get_last_insert_rowid()?;
        insert_items(conn, order_id, order.items())?;

        info!(
            order_id,
            order_number = %order.order_number(),
            items = order.items().len(),
            "Persisted order"
        );
        Ok(OrderId::new(order_id))
    })
}

fn insert_items(
    conn: &mut SqliteConnection,
    order_id: i64,
    items: &[OrderItem],
) -> Result<(), PersistenceError> {
    for (position, item) in items.iter().enumerate() {
        let position: i32 = i32::try_from(position).map_err(|_| {
            PersistenceError::QueryFailed(format!("order {order_id} has too many items"))
        })?;
        let quantity: i32 = i32::try_from(item.quantity).map_err(|_| {
            PersistenceError::QueryFailed(format!(
                "quantity {} does not fit the items table",
                item.quantity
            ))
        })?;

        diesel::insert_into(order_items::table)
            .values((
                order_items::order_id.eq(order_id),
                order_items::position.eq(position),
                order_items::product_id.eq(item.product_id.value()),
                order_items::name.eq(&item.name),
                order_items::quantity.eq(quantity),
                order_items::price.eq(item.price.to_string()),
            ))
            .execute(conn)?;
    }
    debug!(order_id, count = items.len(), "Inserted order items");
    Ok(())
}

/// Stores a transition: the order's mutable fields and one history row.
///
/// # Returns
///
/// The id of the history row.
///
/// # Errors
///
/// Returns `PersistenceError::OrderNotFound` if the order has no id or no
/// longer exists, or another error if a write fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    let order: &Order = &result.order;
    let order_id: OrderId = order
        .order_id()
        .ok_or_else(|| PersistenceError::OrderNotFound(order.order_number().to_string()))?;
    let updated_at: String = format_timestamp(order.updated_at())?;
    let changed_at: String = format_timestamp(result.change.changed_at)?;

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(orders::table)
            .filter(orders::order_id.eq(order_id.value()))
            .set((
                orders::status.eq(order.status().as_str()),
                orders::payment_status.eq(order.payment_status().as_str()),
                orders::updated_at.eq(&updated_at),
            ))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::OrderNotFound(order_id.to_string()));
        }

        diesel::insert_into(order_status_history::table)
            .values((
                order_status_history::order_id.eq(order_id.value()),
                order_status_history::field.eq(result.change.field.as_str()),
                order_status_history::previous_value.eq(&result.change.previous_value),
                order_status_history::new_value.eq(&result.change.new_value),
                order_status_history::changed_by_kind
                    .eq(result.change.changed_by.map(|(kind, _)| kind.as_str())),
                order_status_history::changed_by_id
                    .eq(result.change.changed_by.map(|(_, id)| id)),
                order_status_history::changed_at.eq(&changed_at),
            ))
            .execute(conn)?;
        let history_id: i64 = conn.get_last_insert_rowid()?;

        info!(
            order_id = order_id.value(),
            field = %result.change.field,
            from = %result.change.previous_value,
            to = %result.change.new_value,
            "Persisted order transition"
        );
        Ok(history_id)
    })
}
