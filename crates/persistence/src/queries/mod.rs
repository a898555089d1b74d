// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `orders`: order retrieval and tenant-scoped listing
//! - `catalog`: product lookups backing `CatalogLookup`
//! - `identity`: vendor, customer, and session records
//! - `history`: recorded status and payment status changes

pub mod catalog;
pub mod history;
pub mod identity;
pub mod orders;
