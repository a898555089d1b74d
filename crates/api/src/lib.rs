// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Pillora order service.
//!
//! Translates wire DTOs into core commands, authenticates bearer sessions,
//! and maps every lower-layer error onto `ApiError`.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, DEFAULT_SESSION_TTL};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    CreateOrderResult, ORDER_NUMBER_ATTEMPTS, UNKNOWN_CUSTOMER_EMAIL, UNKNOWN_CUSTOMER_NAME,
    create_order, get_order, list_orders, load_invoice_order, order_history, resolve_order,
    update_order_status, update_payment_status,
};
pub use request_response::{
    CreateOrderRequest, HistoryEntryResponse, OrderItemRequest, OrderItemResponse, OrderResponse,
    UpdatePaymentStatusRequest, UpdateStatusRequest,
};
