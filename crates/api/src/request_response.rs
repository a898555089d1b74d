// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire. Monetary amounts travel as JSON
//! numbers and are converted to `Decimal` at this boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item of a creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: i64,
    /// Blank names are filled in from the catalog.
    #[serde(default)]
    pub name: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// API request to place an order.
///
/// Every field is optional at the wire level so that missing fields produce
/// a validation error naming the field rather than a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOrderRequest {
    pub customer_id: Option<i64>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub items: Vec<OrderItemRequest>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_amount: Option<Decimal>,
    pub shipping_address: Option<String>,
    pub payment_method: Option<String>,
    pub payment_status: Option<String>,
}

/// API request to move an order to a new status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// API request to relabel an order's payment status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: String,
}

/// One line item of an order response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// An order as returned to clients.
///
/// `customerName` and `customerEmail` come from the customer identity record;
/// orders without a resolvable record show `Unknown Customer` and `No Email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub customer_id: Option<i64>,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItemResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub shipping_address: String,
    pub payment_method: String,
    pub payment_status: String,
    pub status: String,
    pub vendor_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// One entry of an order's change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    /// `status` or `payment_status`.
    pub field: String,
    pub previous_value: String,
    pub new_value: String,
    /// `vendor` or `customer`; absent for system changes.
    pub changed_by_kind: Option<String>,
    pub changed_by_id: Option<i64>,
    pub changed_at: String,
}
