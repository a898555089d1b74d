// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::money::round_money;
use crate::order::{CustomerSnapshot, NewOrder, OrderItem};
use crate::payment::{PaymentMethod, PaymentStatus};
use crate::types::{CustomerId, EmailAddress, ProductId};
use rust_decimal::Decimal;

/// Largest quantity a single line may carry.
pub const MAX_ITEM_QUANTITY: i32 = i32::MAX;

/// An order line as submitted, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub price: Decimal,
}

/// An order as submitted, before validation.
///
/// Customer fields are whatever the caller resolved: the identity record for
/// an authenticated customer, or the request body on the legacy path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<ItemDraft>,
    pub total_amount: Option<Decimal>,
    pub shipping_address: String,
    pub payment_method: String,
    pub payment_status: Option<String>,
}

/// Validates a submitted order and derives its payment status.
///
/// Checks, in order:
/// - at least one item, each with a name, quantity of at least one, and a
///   non-negative unit price
/// - a non-empty shipping address
/// - a customer name and a well-formed customer email
/// - a known payment method (and gateway result, if supplied)
/// - every line total and their sum fit in a `Decimal`
/// - the supplied total, if any, equals the sum of the line totals once both
///   are rounded to cents
///
/// The stored total is always the computed line sum.
///
/// # Errors
///
/// Returns the `DomainError` for the first rule that fails.
pub fn validate_new_order(draft: OrderDraft) -> Result<NewOrder, DomainError> {
    if draft.items.is_empty() {
        return Err(DomainError::EmptyItems);
    }

    let items: Vec<OrderItem> = draft
        .items
        .into_iter()
        .enumerate()
        .map(|(position, item)| validate_item(position, item))
        .collect::<Result<_, _>>()?;

    let shipping_address: &str = draft.shipping_address.trim();
    if shipping_address.is_empty() {
        return Err(DomainError::MissingShippingAddress);
    }

    let customer_name: &str = draft.customer_name.trim();
    if customer_name.is_empty() {
        return Err(DomainError::MissingCustomerName);
    }
    if draft.customer_email.trim().is_empty() {
        return Err(DomainError::MissingCustomerEmail);
    }
    let email: EmailAddress = EmailAddress::parse(&draft.customer_email)?;

    let payment_method: PaymentMethod = draft.payment_method.parse()?;
    let payment_status: PaymentStatus =
        PaymentStatus::at_creation(payment_method, draft.payment_status.as_deref())?;

    let computed: Decimal = checked_subtotal(&items)?;
    if let Some(supplied) = draft.total_amount {
        if supplied.is_sign_negative() {
            return Err(DomainError::InvalidAmount {
                field: "total_amount",
                value: supplied.to_string(),
            });
        }
        if round_money(supplied) != round_money(computed) {
            return Err(DomainError::TotalMismatch {
                supplied: supplied.to_string(),
                computed: computed.to_string(),
            });
        }
    }

    Ok(NewOrder {
        customer: CustomerSnapshot {
            customer_id: draft.customer_id,
            name: customer_name.to_string(),
            email,
        },
        items,
        total_amount: computed,
        shipping_address: shipping_address.to_string(),
        payment_method,
        payment_status,
    })
}

fn validate_item(position: usize, item: ItemDraft) -> Result<OrderItem, DomainError> {
    let name: &str = item.name.trim();
    if name.is_empty() {
        return Err(DomainError::InvalidItem {
            position,
            reason: String::from("name is required"),
        });
    }

    let quantity: u32 = u32::try_from(item.quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or_else(|| DomainError::InvalidItem {
            position,
            reason: format!("quantity must be at least 1, got {}", item.quantity),
        })?;
    if item.quantity > i64::from(MAX_ITEM_QUANTITY) {
        return Err(DomainError::InvalidItem {
            position,
            reason: format!(
                "quantity must be at most {MAX_ITEM_QUANTITY}, got {}",
                item.quantity
            ),
        });
    }

    if item.price.is_sign_negative() {
        return Err(DomainError::InvalidItem {
            position,
            reason: format!("price must not be negative, got {}", item.price),
        });
    }

    Ok(OrderItem {
        product_id: item.product_id,
        name: name.to_string(),
        quantity,
        price: item.price,
    })
}

/// Sums the line totals, rejecting any line or running total that overflows.
fn checked_subtotal(items: &[OrderItem]) -> Result<Decimal, DomainError> {
    items
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |total, (position, item)| {
            let line: Decimal = item
                .price
                .checked_mul(Decimal::from(item.quantity))
                .ok_or_else(|| DomainError::InvalidItem {
                    position,
                    reason: format!(
                        "line total of {} x {} is too large",
                        item.price, item.quantity
                    ),
                })?;
            total
                .checked_add(line)
                .ok_or_else(|| DomainError::InvalidAmount {
                    field: "total_amount",
                    value: String::from("sum of line totals is too large"),
                })
        })
}
