// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vendor attribution and tenant scoping.
//!
//! `Order::vendor_id` is a denormalized hint taken from the first item.
//! Visibility and authorization never use it: a vendor sees an order when
//! any of the order's products belongs to that vendor.

use crate::catalog::CatalogLookup;
use crate::error::CoreError;
use pillora_domain::{Actor, ActorKind, EmailAddress, Order, OrderItem, ProductId, VendorId};
use std::collections::BTreeSet;

/// Which orders an actor may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    /// Every order. Only for trusted internal callers.
    Unrestricted,
    /// Orders containing at least one of these products.
    VendorProducts(BTreeSet<ProductId>),
    /// Orders placed under this email.
    CustomerEmail(EmailAddress),
    /// No orders at all.
    Nothing,
}

impl OrderScope {
    /// Returns true if `order` falls within this scope.
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::VendorProducts(owned) => order
                .items()
                .iter()
                .any(|item| owned.contains(&item.product_id)),
            Self::CustomerEmail(email) => &order.customer().email == email,
            Self::Nothing => false,
        }
    }
}

/// Resolves the vendor owning the first item's product.
///
/// Returns `None` when the order has no items or the product is unknown.
///
/// # Errors
///
/// Returns `CoreError::Catalog` if the catalog cannot be consulted.
pub fn resolve_owning_vendor(
    items: &[OrderItem],
    catalog: &mut impl CatalogLookup,
) -> Result<Option<VendorId>, CoreError> {
    match items.first() {
        Some(first) => Ok(catalog.product_owner(first.product_id)?),
        None => Ok(None),
    }
}

/// Builds the visibility scope for an actor.
///
/// # Errors
///
/// Returns `CoreError::Catalog` if a vendor's products cannot be listed.
pub fn scope_for(
    actor: Option<&Actor>,
    catalog: &mut impl CatalogLookup,
) -> Result<OrderScope, CoreError> {
    let Some(actor) = actor else {
        return Ok(OrderScope::Unrestricted);
    };

    match actor.kind {
        ActorKind::Vendor => {
            let vendor_id: VendorId = VendorId::new(actor.id);
            let owned: BTreeSet<ProductId> = catalog.products_owned_by(vendor_id)?;
            Ok(OrderScope::VendorProducts(owned))
        }
        ActorKind::Customer => Ok(actor
            .email
            .clone()
            .map_or(OrderScope::Nothing, OrderScope::CustomerEmail)),
    }
}

/// Decides whether an authenticated actor may act on an order.
///
/// Vendors need at least one of their products in the order. Customers need
/// the order's email to match their own.
///
/// # Errors
///
/// Returns `CoreError::Catalog` if a vendor's products cannot be listed.
pub fn is_authorized_for_order(
    actor: &Actor,
    order: &Order,
    catalog: &mut impl CatalogLookup,
) -> Result<bool, CoreError> {
    let scope: OrderScope = scope_for(Some(actor), catalog)?;
    Ok(scope.matches(order))
}
