// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod money;
mod order;
mod order_number;
mod order_status;
mod payment;
mod timestamp;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use money::{MONEY_SCALE, TaxRate, format_money, parse_money, round_money};
pub use order::{
    CustomerSnapshot, NewOrder, Order, OrderItem, OrderRecord, PaymentStatusChange, StatusChange,
};
pub use order_number::OrderNumber;
pub use order_status::{OrderEvent, OrderStatus};
pub use payment::{PaymentMethod, PaymentStatus};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use types::{Actor, ActorKind, CustomerId, EmailAddress, OrderId, ProductId, VendorId};
pub use validation::{ItemDraft, MAX_ITEM_QUANTITY, OrderDraft, validate_new_order};
