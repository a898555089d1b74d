// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pillora_domain::{ProductId, VendorId};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Display attributes of a catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    pub product_id: ProductId,
    pub vendor_id: VendorId,
    pub name: String,
    pub price: Decimal,
}

/// Failure reported by a catalog backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogError {
    message: String,
}

impl CatalogError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CatalogError {}

/// Read-only access to the product catalog.
///
/// Lookups take `&mut self` because backends hold a database connection.
pub trait CatalogLookup {
    /// Returns the product, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend fails.
    fn product(&mut self, product_id: ProductId) -> Result<Option<ProductInfo>, CatalogError>;

    /// Returns the ids of every product owned by `vendor_id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend fails.
    fn products_owned_by(&mut self, vendor_id: VendorId)
    -> Result<BTreeSet<ProductId>, CatalogError>;

    /// Returns the vendor owning `product_id`, or `None` if the product does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the backend fails.
    fn product_owner(&mut self, product_id: ProductId) -> Result<Option<VendorId>, CatalogError> {
        Ok(self.product(product_id)?.map(|product| product.vendor_id))
    }
}
