// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pillora::{ChangedField, OrderChange};
use pillora_domain::{ActorKind, OrderId, parse_timestamp};

use crate::diesel_schema::order_status_history;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = order_status_history)]
struct HistoryRow {
    field: String,
    previous_value: String,
    new_value: String,
    changed_by_kind: Option<String>,
    changed_by_id: Option<i64>,
    changed_at: String,
}

impl HistoryRow {
    fn into_change(self) -> Result<OrderChange, PersistenceError> {
        let field: ChangedField = self
            .field
            .parse()
            .map_err(PersistenceError::ReconstructionError)?;
        let changed_by: Option<(ActorKind, i64)> = match (self.changed_by_kind, self.changed_by_id)
        {
            (Some(kind), Some(id)) => Some((kind.parse()?, id)),
            _ => None,
        };
        Ok(OrderChange {
            field,
            previous_value: self.previous_value,
            new_value: self.new_value,
            changed_by,
            changed_at: parse_timestamp(&self.changed_at)?,
        })
    }
}

/// Lists the recorded changes of an order, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_history(
    conn: &mut SqliteConnection,
    order_id: OrderId,
) -> Result<Vec<OrderChange>, PersistenceError> {
    let rows: Vec<HistoryRow> = order_status_history::table
        .filter(order_status_history::order_id.eq(order_id.value()))
        .order(order_status_history::history_id.asc())
        .select(HistoryRow::as_select())
        .load(conn)?;
    rows.into_iter().map(HistoryRow::into_change).collect()
}
