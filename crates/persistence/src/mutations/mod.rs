// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `orders`: order creation and transition persistence
//! - `identity`: vendor, customer, product, and session records

pub mod identity;
pub mod orders;
