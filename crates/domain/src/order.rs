// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The order aggregate.
//!
//! An `Order` owns its line items and its status. Fields are private so the
//! status can only move through [`Order::transition_to`] and identity fields
//! are fixed once assigned.

use crate::error::DomainError;
use crate::order_number::OrderNumber;
use crate::order_status::OrderStatus;
use crate::payment::{PaymentMethod, PaymentStatus};
use crate::types::{CustomerId, EmailAddress, OrderId, ProductId, VendorId};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// A single line of an order.
///
/// `name` and `price` are snapshots taken at creation; later catalog edits
/// do not reach existing orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// The product purchased.
    pub product_id: ProductId,
    /// Product name at the time of purchase.
    pub name: String,
    /// Units purchased, at least one.
    pub quantity: u32,
    /// Unit price at the time of purchase.
    pub price: Decimal,
}

impl OrderItem {
    /// Returns `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Customer identity captured on the order at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSnapshot {
    /// The customer identity record, when one was resolved.
    pub customer_id: Option<CustomerId>,
    /// Customer name at the time of ordering.
    pub name: String,
    /// Normalized customer email at the time of ordering.
    pub email: EmailAddress,
}

/// A validated order that has not been persisted yet.
///
/// Only obtainable through [`crate::validate_new_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub(crate) customer: CustomerSnapshot,
    pub(crate) items: Vec<OrderItem>,
    pub(crate) total_amount: Decimal,
    pub(crate) shipping_address: String,
    pub(crate) payment_method: PaymentMethod,
    pub(crate) payment_status: PaymentStatus,
}

impl NewOrder {
    #[must_use]
    pub const fn customer(&self) -> &CustomerSnapshot {
        &self.customer
    }

    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Returns the distinct products referenced by the items.
    #[must_use]
    pub fn product_ids(&self) -> BTreeSet<ProductId> {
        self.items.iter().map(|item| item.product_id).collect()
    }
}

/// Every stored field of an order, used to rebuild one from persistence.
#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub order_number: OrderNumber,
    pub customer: CustomerSnapshot,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub vendor_id: Option<VendorId>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A status change that was applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// A payment status change that was applied to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentStatusChange {
    pub from: PaymentStatus,
    pub to: PaymentStatus,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    order_id: Option<OrderId>,
    order_number: OrderNumber,
    customer: CustomerSnapshot,
    items: Vec<OrderItem>,
    total_amount: Decimal,
    shipping_address: String,
    payment_method: PaymentMethod,
    payment_status: PaymentStatus,
    status: OrderStatus,
    vendor_id: Option<VendorId>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Order {
    /// Places a validated order. The order starts `pending` and has no
    /// canonical id until persisted.
    #[must_use]
    pub fn place(
        new_order: NewOrder,
        order_number: OrderNumber,
        vendor_id: Option<VendorId>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            order_id: None,
            order_number,
            customer: new_order.customer,
            items: new_order.items,
            total_amount: new_order.total_amount,
            shipping_address: new_order.shipping_address,
            payment_method: new_order.payment_method,
            payment_status: new_order.payment_status,
            status: OrderStatus::Pending,
            vendor_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a persisted order.
    #[must_use]
    pub fn restore(record: OrderRecord) -> Self {
        Self {
            order_id: Some(record.order_id),
            order_number: record.order_number,
            customer: record.customer,
            items: record.items,
            total_amount: record.total_amount,
            shipping_address: record.shipping_address,
            payment_method: record.payment_method,
            payment_status: record.payment_status,
            status: record.status,
            vendor_id: record.vendor_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Returns a copy carrying the canonical id assigned by storage.
    #[must_use]
    pub fn with_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Replaces the order number before the order is persisted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidOrderNumber` once the order has an id;
    /// persisted order numbers are immutable.
    pub fn renumber(&mut self, order_number: OrderNumber) -> Result<(), DomainError> {
        if self.order_id.is_some() {
            return Err(DomainError::InvalidOrderNumber(format!(
                "{} is already persisted",
                self.order_number
            )));
        }
        self.order_number = order_number;
        Ok(())
    }

    #[must_use]
    pub const fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    #[must_use]
    pub const fn order_number(&self) -> &OrderNumber {
        &self.order_number
    }

    #[must_use]
    pub const fn customer(&self) -> &CustomerSnapshot {
        &self.customer
    }

    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    #[must_use]
    pub const fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    #[must_use]
    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// The vendor attributed to the order, if any.
    #[must_use]
    pub const fn vendor_id(&self) -> Option<VendorId> {
        self.vendor_id
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// Sum of the line totals.
    #[must_use]
    pub fn items_subtotal(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Returns the distinct products referenced by the items.
    #[must_use]
    pub fn product_ids(&self) -> BTreeSet<ProductId> {
        self.items.iter().map(|item| item.product_id).collect()
    }

    /// Moves the order to `target` through the transition table.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the edge is not in
    /// the table. The order is left unchanged.
    pub fn transition_to(
        &mut self,
        target: OrderStatus,
        now: OffsetDateTime,
    ) -> Result<StatusChange, DomainError> {
        let from: OrderStatus = self.status;
        self.status = from.transition_to(target)?;
        self.updated_at = now;
        Ok(StatusChange { from, to: target })
    }

    /// Overwrites the payment status label.
    pub fn set_payment_status(
        &mut self,
        payment_status: PaymentStatus,
        now: OffsetDateTime,
    ) -> PaymentStatusChange {
        let from: PaymentStatus = self.payment_status;
        self.payment_status = payment_status;
        self.updated_at = now;
        PaymentStatusChange {
            from,
            to: payment_status,
        }
    }
}
