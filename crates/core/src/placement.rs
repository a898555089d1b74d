// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::attribution::resolve_owning_vendor;
use crate::catalog::{CatalogLookup, ProductInfo};
use crate::error::CoreError;
use pillora_domain::{NewOrder, Order, OrderDraft, OrderNumber, VendorId, validate_new_order};
use time::OffsetDateTime;

/// Checks every item against the catalog and fills blank item names from it.
///
/// # Errors
///
/// Returns `CoreError::UnknownProduct` for the first item whose product does
/// not exist.
pub fn complete_from_catalog(
    mut draft: OrderDraft,
    catalog: &mut impl CatalogLookup,
) -> Result<OrderDraft, CoreError> {
    for item in &mut draft.items {
        let product: ProductInfo = catalog
            .product(item.product_id)?
            .ok_or(CoreError::UnknownProduct(item.product_id))?;
        if item.name.trim().is_empty() {
            item.name = product.name;
        }
    }
    Ok(draft)
}

/// Turns a submitted order into a placed, not yet persisted, order.
///
/// The order gets a fresh order number, status `pending`, and the vendor of
/// its first item.
///
/// # Errors
///
/// Returns an error if an item's product is unknown, the draft fails
/// validation, or the catalog cannot be consulted.
pub fn place_order(
    draft: OrderDraft,
    catalog: &mut impl CatalogLookup,
    now: OffsetDateTime,
) -> Result<Order, CoreError> {
    let draft: OrderDraft = complete_from_catalog(draft, catalog)?;
    let new_order: NewOrder = validate_new_order(draft)?;
    let vendor_id: Option<VendorId> = resolve_owning_vendor(new_order.items(), catalog)?;
    Ok(Order::place(
        new_order,
        OrderNumber::generate(now),
        vendor_id,
        now,
    ))
}
