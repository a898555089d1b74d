// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order operations at the API boundary.
//!
//! Each function takes the persistence adapter and an already
//! authenticated actor, runs the core logic, persists the outcome, and
//! returns a response DTO. Errors are translated to `ApiError` here so the
//! server never sees domain, core, or persistence errors.

use pillora::{
    Command, OrderChange, OrderScope, TransitionResult, apply, is_authorized_for_order,
    place_order, scope_for,
};
use pillora_domain::{
    Actor, ActorKind, CustomerId, ItemDraft, Order, OrderDraft, OrderId, OrderNumber,
    OrderStatus, PaymentStatus, ProductId, format_timestamp,
};
use pillora_persistence::{CustomerData, Persistence, PersistenceError};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    CreateOrderRequest, HistoryEntryResponse, OrderItemResponse, OrderResponse,
    UpdatePaymentStatusRequest, UpdateStatusRequest,
};

/// Attempts at allocating a fresh order number before giving up.
pub const ORDER_NUMBER_ATTEMPTS: usize = 5;

/// Display name used when an order's customer record cannot be resolved.
pub const UNKNOWN_CUSTOMER_NAME: &str = "Unknown Customer";

/// Display email used when an order's customer record cannot be resolved.
pub const UNKNOWN_CUSTOMER_EMAIL: &str = "No Email";

/// The outcome of a successful order creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderResult {
    /// The response returned to the client.
    pub response: OrderResponse,
    /// The stored order, for handing to the invoice pipeline.
    pub order: Order,
}

/// Places and stores a new order.
///
/// When the caller is an authenticated customer, the customer identity on
/// the order comes from their identity record and the body's customer
/// fields are ignored.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` on validation failure or an unknown
/// product or customer, and `ApiError::Internal` if the order cannot be
/// stored.
pub fn create_order(
    persistence: &mut Persistence,
    request: CreateOrderRequest,
    actor: Option<&Actor>,
    now: OffsetDateTime,
) -> Result<CreateOrderResult, ApiError> {
    let draft: OrderDraft = build_draft(persistence, request, actor)?;
    let order: Order = place_order(draft, persistence, now).map_err(translate_core_error)?;
    let order: Order = store_new_order(persistence, order, || OrderNumber::generate(now))?;
    let order_id: OrderId = order.order_id().ok_or_else(|| ApiError::Internal {
        message: String::from("Stored order has no id"),
    })?;

    info!(
        order_id = order_id.value(),
        order_number = %order.order_number(),
        vendor_id = order.vendor_id().map(|v| v.value()),
        total = %order.total_amount(),
        "Order created"
    );

    let response: OrderResponse = to_order_response(
        &order,
        order.customer().name.clone(),
        order.customer().email.to_string(),
    )?;
    Ok(CreateOrderResult { response, order })
}

/// Inserts a placed order, drawing a new number from `next_number` each
/// time the current one collides, up to `ORDER_NUMBER_ATTEMPTS` inserts.
///
/// # Errors
///
/// Returns `ApiError::Internal` when every attempt collides or the insert
/// fails for another reason.
pub(crate) fn store_new_order(
    persistence: &mut Persistence,
    mut order: Order,
    mut next_number: impl FnMut() -> OrderNumber,
) -> Result<Order, ApiError> {
    let mut attempt: usize = 1;
    let order_id: OrderId = loop {
        match persistence.create_order(&order) {
            Ok(order_id) => break order_id,
            Err(PersistenceError::DuplicateOrderNumber(number))
                if attempt < ORDER_NUMBER_ATTEMPTS =>
            {
                warn!(order_number = %number, attempt, "Order number collision, regenerating");
                order
                    .renumber(next_number())
                    .map_err(translate_domain_error)?;
                attempt += 1;
            }
            Err(e) => return Err(translate_persistence_error(e)),
        }
    };
    Ok(order.with_id(order_id))
}

/// Lists the orders visible to an actor, newest first.
///
/// # Errors
///
/// Returns `ApiError::Internal` on a store failure.
pub fn list_orders(
    persistence: &mut Persistence,
    actor: &Actor,
) -> Result<Vec<OrderResponse>, ApiError> {
    let scope: OrderScope = scope_for(Some(actor), persistence).map_err(translate_core_error)?;
    let orders: Vec<Order> = persistence
        .list_orders(&scope)
        .map_err(translate_persistence_error)?;

    let customer_ids: Vec<CustomerId> = orders
        .iter()
        .filter_map(|o| o.customer().customer_id)
        .collect();
    let customers: BTreeMap<CustomerId, CustomerData> = persistence
        .get_customers(&customer_ids)
        .map_err(translate_persistence_error)?;

    orders
        .iter()
        .map(|order| {
            let (name, email) = resolved_customer(order, &customers);
            to_order_response(order, name, email)
        })
        .collect()
}

/// Returns one order visible to the actor.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the order does not exist or is
/// not visible to the actor.
pub fn get_order(
    persistence: &mut Persistence,
    order_ref: &str,
    actor: &Actor,
) -> Result<OrderResponse, ApiError> {
    let order: Order = resolve_visible_order(persistence, order_ref, actor)?;
    enrich_one(persistence, &order)
}

/// Moves an order to a new status on behalf of an actor.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown order,
/// `ApiError::InvalidInput` for an unknown status, `ApiError::Unauthorized`
/// when the actor does not own the order, and
/// `ApiError::DomainRuleViolation` when the transition is not allowed.
pub fn update_order_status(
    persistence: &mut Persistence,
    order_ref: &str,
    request: &UpdateStatusRequest,
    actor: &Actor,
    now: OffsetDateTime,
) -> Result<OrderResponse, ApiError> {
    let order: Order = resolve_order(persistence, order_ref)?;
    let target: OrderStatus = request.status.parse().map_err(translate_domain_error)?;

    let result: TransitionResult = apply(
        &order,
        Command::SetStatus { target },
        Some(actor),
        persistence,
        now,
    )
    .map_err(translate_core_error)?;
    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        order_number = %order.order_number(),
        actor_kind = %actor.kind,
        actor_id = actor.id,
        from = %result.change.previous_value,
        to = %result.change.new_value,
        "Order status updated"
    );

    enrich_one(persistence, &result.order)
}

/// Relabels an order's payment status.
///
/// No ownership check is made; the intended caller is a payment webhook.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown order and
/// `ApiError::InvalidInput` for an unknown payment status.
pub fn update_payment_status(
    persistence: &mut Persistence,
    order_ref: &str,
    request: &UpdatePaymentStatusRequest,
    actor: Option<&Actor>,
    now: OffsetDateTime,
) -> Result<OrderResponse, ApiError> {
    let order: Order = resolve_order(persistence, order_ref)?;
    let payment_status: PaymentStatus = request
        .payment_status
        .parse()
        .map_err(translate_domain_error)?;

    let result: TransitionResult = apply(
        &order,
        Command::SetPaymentStatus { payment_status },
        actor,
        persistence,
        now,
    )
    .map_err(translate_core_error)?;
    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        order_number = %order.order_number(),
        from = %result.change.previous_value,
        to = %result.change.new_value,
        "Order payment status updated"
    );

    enrich_one(persistence, &result.order)
}

/// Returns the change history of an order visible to the actor.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the order does not exist or is
/// not visible to the actor.
pub fn order_history(
    persistence: &mut Persistence,
    order_ref: &str,
    actor: &Actor,
) -> Result<Vec<HistoryEntryResponse>, ApiError> {
    let order: Order = resolve_visible_order(persistence, order_ref, actor)?;
    let order_id: OrderId = order.order_id().ok_or_else(|| ApiError::Internal {
        message: format!("Order {} has no id", order.order_number()),
    })?;

    let changes: Vec<OrderChange> = persistence
        .order_history(order_id)
        .map_err(translate_persistence_error)?;

    changes
        .into_iter()
        .map(|change| -> Result<HistoryEntryResponse, ApiError> {
            Ok(HistoryEntryResponse {
                field: change.field.to_string(),
                previous_value: change.previous_value,
                new_value: change.new_value,
                changed_by_kind: change.changed_by.map(|(kind, _)| kind.to_string()),
                changed_by_id: change.changed_by.map(|(_, id)| id),
                changed_at: timestamp(change.changed_at)?,
            })
        })
        .collect()
}

/// Loads an order for invoice download.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown order and
/// `ApiError::Unauthorized` when the actor may not see it.
pub fn load_invoice_order(
    persistence: &mut Persistence,
    order_ref: &str,
    actor: &Actor,
) -> Result<Order, ApiError> {
    let order: Order = resolve_order(persistence, order_ref)?;
    let authorized: bool =
        is_authorized_for_order(actor, &order, persistence).map_err(translate_core_error)?;
    if !authorized {
        return Err(ApiError::Unauthorized {
            action: String::from("download_invoice"),
            reason: format!("order {} is not visible to this account", order.order_number()),
        });
    }
    Ok(order)
}

/// Finds an order by canonical id (all digits) or by order number.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if nothing matches.
pub fn resolve_order(persistence: &mut Persistence, order_ref: &str) -> Result<Order, ApiError> {
    let not_found = || ApiError::ResourceNotFound {
        resource_type: String::from("Order"),
        message: format!("Order '{order_ref}' does not exist"),
    };

    let lookup: Result<Option<Order>, PersistenceError> = match order_ref.parse::<i64>() {
        Ok(id) => persistence.get_order(OrderId::new(id)),
        Err(_) => match OrderNumber::parse(order_ref) {
            Ok(order_number) => persistence.get_order_by_number(&order_number),
            Err(_) => return Err(not_found()),
        },
    };

    lookup
        .map_err(translate_persistence_error)?
        .ok_or_else(not_found)
}

fn resolve_visible_order(
    persistence: &mut Persistence,
    order_ref: &str,
    actor: &Actor,
) -> Result<Order, ApiError> {
    let order: Order = resolve_order(persistence, order_ref)?;
    let visible: bool =
        is_authorized_for_order(actor, &order, persistence).map_err(translate_core_error)?;
    if visible {
        Ok(order)
    } else {
        Err(ApiError::ResourceNotFound {
            resource_type: String::from("Order"),
            message: format!("Order '{order_ref}' does not exist"),
        })
    }
}

fn build_draft(
    persistence: &mut Persistence,
    request: CreateOrderRequest,
    actor: Option<&Actor>,
) -> Result<OrderDraft, ApiError> {
    let (customer_id, customer_name, customer_email): (Option<CustomerId>, String, String) =
        match actor {
            Some(actor) if actor.kind == ActorKind::Customer => (
                actor.customer_id(),
                actor.name.clone(),
                actor
                    .email
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
            ),
            _ => {
                let customer_id: Option<CustomerId> = request.customer_id.map(CustomerId::new);
                if let Some(id) = customer_id {
                    let known: bool = persistence
                        .get_customer(id)
                        .map_err(translate_persistence_error)?
                        .is_some();
                    if !known {
                        return Err(ApiError::InvalidInput {
                            field: String::from("customerId"),
                            message: format!("Customer {id} does not exist"),
                        });
                    }
                }
                (
                    customer_id,
                    request.customer_name.unwrap_or_default(),
                    request.customer_email.unwrap_or_default(),
                )
            }
        };

    Ok(OrderDraft {
        customer_id,
        customer_name,
        customer_email,
        items: request
            .items
            .into_iter()
            .map(|item| ItemDraft {
                product_id: ProductId::new(item.product_id),
                name: item.name,
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
        total_amount: request.total_amount,
        shipping_address: request.shipping_address.unwrap_or_default(),
        payment_method: request.payment_method.unwrap_or_default(),
        payment_status: request.payment_status,
    })
}

fn enrich_one(persistence: &mut Persistence, order: &Order) -> Result<OrderResponse, ApiError> {
    let customer_ids: Vec<CustomerId> = order.customer().customer_id.into_iter().collect();
    let customers: BTreeMap<CustomerId, CustomerData> = persistence
        .get_customers(&customer_ids)
        .map_err(translate_persistence_error)?;
    let (name, email) = resolved_customer(order, &customers);
    to_order_response(order, name, email)
}

/// Display name and email from the order's customer record, or the
/// unknown-customer literals when there is none.
fn resolved_customer(
    order: &Order,
    customers: &BTreeMap<CustomerId, CustomerData>,
) -> (String, String) {
    order
        .customer()
        .customer_id
        .and_then(|id| customers.get(&id))
        .map_or_else(
            || {
                (
                    UNKNOWN_CUSTOMER_NAME.to_string(),
                    UNKNOWN_CUSTOMER_EMAIL.to_string(),
                )
            },
            |c| (c.name.clone(), c.email.to_string()),
        )
}

fn to_order_response(
    order: &Order,
    customer_name: String,
    customer_email: String,
) -> Result<OrderResponse, ApiError> {
    Ok(OrderResponse {
        id: order.order_id().map_or(0, |id| id.value()),
        order_number: order.order_number().to_string(),
        customer_id: order.customer().customer_id.map(|id| id.value()),
        customer_name,
        customer_email,
        items: order
            .items()
            .iter()
            .map(|item| OrderItemResponse {
                product_id: item.product_id.value(),
                name: item.name.clone(),
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
        total_amount: order.total_amount(),
        shipping_address: order.shipping_address().to_string(),
        payment_method: order.payment_method().to_string(),
        payment_status: order.payment_status().to_string(),
        status: order.status().to_string(),
        vendor_id: order.vendor_id().map(|id| id.value()),
        created_at: timestamp(order.created_at())?,
        updated_at: timestamp(order.updated_at())?,
    })
}

fn timestamp(at: OffsetDateTime) -> Result<String, ApiError> {
    format_timestamp(at).map_err(translate_domain_error)
}
