// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::catalog::CatalogError;
use pillora_domain::{DomainError, ProductId};

/// Errors that can occur while placing or transitioning orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// An order item references a product the catalog does not know.
    UnknownProduct(ProductId),
    /// The actor may not perform the operation on this order.
    Forbidden(String),
    /// The catalog could not be consulted.
    Catalog(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::UnknownProduct(product_id) => write!(f, "Product {product_id} does not exist"),
            Self::Forbidden(reason) => write!(f, "Forbidden: {reason}"),
            Self::Catalog(msg) => write!(f, "Catalog lookup failed: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err.to_string())
    }
}
