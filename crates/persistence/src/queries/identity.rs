// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Vendor, customer, and session lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pillora_domain::{CustomerId, EmailAddress, VendorId};
use std::collections::BTreeMap;
use tracing::debug;

use crate::data_models::{CustomerData, SessionData, VendorData};
use crate::diesel_schema::{customers, sessions, vendors};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = vendors)]
struct VendorRow {
    vendor_id: i64,
    business_name: String,
    email: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = customers)]
struct CustomerRow {
    customer_id: i64,
    name: String,
    email: String,
}

impl CustomerRow {
    fn into_data(self) -> Result<CustomerData, PersistenceError> {
        Ok(CustomerData {
            customer_id: CustomerId::new(self.customer_id),
            name: self.name,
            email: EmailAddress::parse(&self.email)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
struct SessionRow {
    session_id: i64,
    session_token: String,
    actor_kind: String,
    actor_id: i64,
    created_at: String,
    expires_at: String,
}

/// Retrieves a vendor by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored email is invalid.
/// Returns `Ok(None)` if the vendor does not exist.
pub fn get_vendor_by_id(
    conn: &mut SqliteConnection,
    vendor_id: VendorId,
) -> Result<Option<VendorData>, PersistenceError> {
    let row: Option<VendorRow> = vendors::table
        .filter(vendors::vendor_id.eq(vendor_id.value()))
        .select(VendorRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| -> Result<VendorData, PersistenceError> {
        Ok(VendorData {
            vendor_id: VendorId::new(row.vendor_id),
            business_name: row.business_name,
            email: EmailAddress::parse(&row.email)?,
        })
    })
    .transpose()
}

/// Retrieves a customer by id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored email is invalid.
/// Returns `Ok(None)` if the customer does not exist.
pub fn get_customer_by_id(
    conn: &mut SqliteConnection,
    customer_id: CustomerId,
) -> Result<Option<CustomerData>, PersistenceError> {
    customers::table
        .filter(customers::customer_id.eq(customer_id.value()))
        .select(CustomerRow::as_select())
        .first(conn)
        .optional()?
        .map(CustomerRow::into_data)
        .transpose()
}

/// Retrieves several customers at once, keyed by id. Unknown ids are
/// simply absent from the result.
///
/// # Errors
///
/// Returns an error if the query fails or a stored email is invalid.
pub fn get_customers_by_ids(
    conn: &mut SqliteConnection,
    customer_ids: &[CustomerId],
) -> Result<BTreeMap<CustomerId, CustomerData>, PersistenceError> {
    if customer_ids.is_empty() {
        return Ok(BTreeMap::new());
    }
    let raw_ids: Vec<i64> = customer_ids.iter().map(CustomerId::value).collect();
    let rows: Vec<CustomerRow> = customers::table
        .filter(customers::customer_id.eq_any(&raw_ids))
        .select(CustomerRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| row.into_data().map(|data| (data.customer_id, data)))
        .collect()
}

/// Retrieves a session by its bearer token.
///
/// # Errors
///
/// Returns an error if the query fails or the stored actor kind is invalid.
/// Returns `Ok(None)` if no session carries the token.
pub fn get_session_by_token(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    debug!("Looking up session by token");

    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    row.map(|row| -> Result<SessionData, PersistenceError> {
        Ok(SessionData {
            session_id: row.session_id,
            session_token: row.session_token,
            actor_kind: row.actor_kind.parse()?,
            actor_id: row.actor_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    })
    .transpose()
}
