// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pillora_domain::{ActorKind, CustomerId, EmailAddress, VendorId};

/// A vendor identity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorData {
    pub vendor_id: VendorId,
    pub business_name: String,
    pub email: EmailAddress,
}

/// A customer identity record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerData {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: EmailAddress,
}

/// A stored bearer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub actor_kind: ActorKind,
    pub actor_id: i64,
    pub created_at: String,
    pub expires_at: String,
}
