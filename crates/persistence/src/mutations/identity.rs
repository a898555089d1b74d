// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity, catalog, and session mutations.
//!
//! Registration and catalog editing belong to other services; these exist
//! so that the order service can be seeded and tested on its own.

use diesel::SqliteConnection;
use diesel::prelude::*;
use pillora_domain::{ActorKind, CustomerId, EmailAddress, ProductId, VendorId};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{customers, products, sessions, vendors};
use crate::error::PersistenceError;

/// Creates a vendor identity record.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email is taken.
pub fn create_vendor(
    conn: &mut SqliteConnection,
    business_name: &str,
    email: &EmailAddress,
    created_at: &str,
) -> Result<VendorId, PersistenceError> {
    diesel::insert_into(vendors::table)
        .values((
            vendors::business_name.eq(business_name),
            vendors::email.eq(email.as_str()),
            vendors::created_at.eq(created_at),
        ))
        .execute(conn)?;
    let vendor_id: i64 = conn.get_last_insert_rowid()?;
    info!(vendor_id, %email, "Created vendor");
    Ok(VendorId::new(vendor_id))
}

/// Creates a customer identity record.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email is taken.
pub fn create_customer(
    conn: &mut SqliteConnection,
    name: &str,
    email: &EmailAddress,
    created_at: &str,
) -> Result<CustomerId, PersistenceError> {
    diesel::insert_into(customers::table)
        .values((
            customers::name.eq(name),
            customers::email.eq(email.as_str()),
            customers::created_at.eq(created_at),
        ))
        .execute(conn)?;
    let customer_id: i64 = conn.get_last_insert_rowid()?;
    info!(customer_id, %email, "Created customer");
    Ok(CustomerId::new(customer_id))
}

/// Adds a product to a vendor's catalog.
///
/// # Errors
///
/// Returns an error if the vendor does not exist or the insert fails.
pub fn create_product(
    conn: &mut SqliteConnection,
    vendor_id: VendorId,
    name: &str,
    price: Decimal,
) -> Result<ProductId, PersistenceError> {
    diesel::insert_into(products::table)
        .values((
            products::vendor_id.eq(vendor_id.value()),
            products::name.eq(name),
            products::price.eq(price.to_string()),
        ))
        .execute(conn)?;
    let product_id: i64 = conn.get_last_insert_rowid()?;
    debug!(product_id, vendor_id = vendor_id.value(), "Created product");
    Ok(ProductId::new(product_id))
}

/// Stores a bearer session.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    actor_kind: ActorKind,
    actor_id: i64,
    created_at: &str,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::actor_kind.eq(actor_kind.as_str()),
            sessions::actor_id.eq(actor_id),
            sessions::created_at.eq(created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;
    let session_id: i64 = conn.get_last_insert_rowid()?;
    debug!(session_id, %actor_kind, actor_id, expires_at, "Session created");
    Ok(session_id)
}

/// Deletes a session by token.
///
/// # Errors
///
/// Returns `PersistenceError::SessionNotFound` if no session carries the
/// token.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(sessions::table.filter(sessions::session_token.eq(session_token)))
            .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::SessionNotFound(String::from(
            "no session for token",
        )));
    }
    Ok(())
}

/// Deletes every session that expired before `now`.
///
/// # Returns
///
/// The number of sessions removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: &str,
) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(sessions::table.filter(sessions::expires_at.lt(now)))
        .execute(conn)?;
    if deleted > 0 {
        info!(deleted, "Removed expired sessions");
    }
    Ok(deleted)
}
