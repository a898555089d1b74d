// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pillora::ProductInfo;
use pillora_domain::{ProductId, VendorId, parse_money};
use std::collections::BTreeSet;

use crate::diesel_schema::products;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = products)]
struct ProductRow {
    product_id: i64,
    vendor_id: i64,
    name: String,
    price: String,
}

/// Retrieves a catalog product.
///
/// # Errors
///
/// Returns an error if the query fails or the stored price is invalid.
/// Returns `Ok(None)` if the product does not exist.
pub fn get_product(
    conn: &mut SqliteConnection,
    product_id: ProductId,
) -> Result<Option<ProductInfo>, PersistenceError> {
    let row: Option<ProductRow> = products::table
        .filter(products::product_id.eq(product_id.value()))
        .select(ProductRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| -> Result<ProductInfo, PersistenceError> {
        Ok(ProductInfo {
            product_id: ProductId::new(row.product_id),
            vendor_id: VendorId::new(row.vendor_id),
            name: row.name,
            price: parse_money("price", &row.price)?,
        })
    })
    .transpose()
}

/// Returns the ids of every product owned by a vendor.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn product_ids_for_vendor(
    conn: &mut SqliteConnection,
    vendor_id: VendorId,
) -> Result<BTreeSet<ProductId>, PersistenceError> {
    let ids: Vec<i64> = products::table
        .filter(products::vendor_id.eq(vendor_id.value()))
        .select(products::product_id)
        .load(conn)?;
    Ok(ids.into_iter().map(ProductId::new).collect())
}
