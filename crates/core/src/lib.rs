// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod attribution;
mod catalog;
mod command;
mod error;
mod placement;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use attribution::{OrderScope, is_authorized_for_order, resolve_owning_vendor, scope_for};
pub use catalog::{CatalogError, CatalogLookup, ProductInfo};
pub use command::{ChangedField, Command};
pub use error::CoreError;
pub use placement::{complete_from_catalog, place_order};
pub use state::{OrderChange, TransitionResult};
