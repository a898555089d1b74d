// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::ChangedField;
use pillora_domain::{ActorKind, Order};
use time::OffsetDateTime;

/// One recorded change to an order field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChange {
    /// Which field changed.
    pub field: ChangedField,
    /// Value before the change.
    pub previous_value: String,
    /// Value after the change.
    pub new_value: String,
    /// Who made the change; `None` for the system.
    pub changed_by: Option<(ActorKind, i64)>,
    /// When the change was made.
    pub changed_at: OffsetDateTime,
}

/// The result of a successful order transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The order after the transition.
    pub order: Order,
    /// The history entry recording this transition.
    pub change: OrderChange,
}
