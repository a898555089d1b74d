// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::attribution::is_authorized_for_order;
use crate::catalog::CatalogLookup;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{OrderChange, TransitionResult};
use pillora_domain::{Actor, ActorKind, Order};
use time::OffsetDateTime;
use tracing::debug;

/// Applies a command to an order, producing the new order and its history
/// entry.
///
/// Status changes may be made by the system (`actor` is `None`) or by a
/// vendor owning at least one of the order's products. Customers may not
/// change status. Payment status changes carry no ownership check.
///
/// # Arguments
///
/// * `order` - The current order (immutable)
/// * `command` - The change to apply
/// * `actor` - The authenticated caller, if any
/// * `catalog` - Product ownership lookup
/// * `now` - Timestamp recorded on the order and the history entry
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not allowed to change the order's status
/// - The requested status is not reachable from the current one
/// - The catalog cannot be consulted
pub fn apply(
    order: &Order,
    command: Command,
    actor: Option<&Actor>,
    catalog: &mut impl CatalogLookup,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let mut next: Order = order.clone();

    let (previous_value, new_value): (String, String) = match command {
        Command::SetStatus { target } => {
            authorize_status_change(actor, order, catalog)?;
            let change = next.transition_to(target, now)?;
            (change.from.to_string(), change.to.to_string())
        }
        Command::SetPaymentStatus { payment_status } => {
            let change = next.set_payment_status(payment_status, now);
            (change.from.to_string(), change.to.to_string())
        }
    };

    debug!(
        order_number = %order.order_number(),
        field = %command.field(),
        from = %previous_value,
        to = %new_value,
        "Order transition applied"
    );

    Ok(TransitionResult {
        order: next,
        change: OrderChange {
            field: command.field(),
            previous_value,
            new_value,
            changed_by: actor.map(|a| (a.kind, a.id)),
            changed_at: now,
        },
    })
}

fn authorize_status_change(
    actor: Option<&Actor>,
    order: &Order,
    catalog: &mut impl CatalogLookup,
) -> Result<(), CoreError> {
    let Some(actor) = actor else {
        return Ok(());
    };

    match actor.kind {
        ActorKind::Customer => Err(CoreError::Forbidden(String::from(
            "customers cannot change order status",
        ))),
        ActorKind::Vendor => {
            if is_authorized_for_order(actor, order, catalog)? {
                Ok(())
            } else {
                Err(CoreError::Forbidden(format!(
                    "vendor {} owns no products in order {}",
                    actor.id,
                    order.order_number()
                )))
            }
        }
    }
}
