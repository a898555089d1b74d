// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Pillora order service.
//!
//! Orders, their line items, and their change history are stored in `SQLite`
//! through Diesel, next to the identity and catalog records the order
//! service reads. Migrations are embedded and applied when a connection is
//! opened.
//!
//! ## Storage conventions
//!
//! - Money is stored as canonical decimal text and read back into
//!   `rust_decimal::Decimal`; floating point never touches a price.
//! - Timestamps are ISO 8601 text in UTC with a fixed-width fraction, so
//!   ordering by the text column orders by time.
//! - `orders.order_number` carries a unique index; an insert that collides
//!   reports `PersistenceError::DuplicateOrderNumber`.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives every caller its own shared-cache
//! in-memory database, so tests never observe each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use pillora::{
    CatalogError, CatalogLookup, OrderChange, OrderScope, ProductInfo, TransitionResult,
};
use pillora_domain::{
    ActorKind, CustomerId, EmailAddress, Order, OrderId, OrderNumber, ProductId, VendorId,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::EXPECTED_TABLES;
pub use data_models::{CustomerData, SessionData, VendorData};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for orders and the records they reference.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_pillora_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Checks the migrated schema: expected tables and the unique index on
    /// `orders.order_number`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::MigrationFailed` naming what is missing.
    pub fn verify_schema(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_schema(&mut self.conn)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Stores a placed order and its items.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateOrderNumber` on an order number
    /// collision, or another error if the insert fails.
    pub fn create_order(&mut self, order: &Order) -> Result<OrderId, PersistenceError> {
        mutations::orders::insert_order(&mut self.conn, order)
    }

    /// Retrieves an order by canonical id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored order is invalid.
    pub fn get_order(&mut self, order_id: OrderId) -> Result<Option<Order>, PersistenceError> {
        queries::orders::get_order_by_id(&mut self.conn, order_id)
    }

    /// Retrieves an order by order number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored order is invalid.
    pub fn get_order_by_number(
        &mut self,
        order_number: &OrderNumber,
    ) -> Result<Option<Order>, PersistenceError> {
        queries::orders::get_order_by_number(&mut self.conn, order_number)
    }

    /// Lists orders within a visibility scope, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored order is invalid.
    pub fn list_orders(&mut self, scope: &OrderScope) -> Result<Vec<Order>, PersistenceError> {
        queries::orders::list_orders(&mut self.conn, scope)
    }

    /// Persists a status or payment status transition with its history row.
    ///
    /// # Returns
    ///
    /// The id of the history row.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is gone or a write fails.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<i64, PersistenceError> {
        mutations::orders::persist_transition(&mut self.conn, result)
    }

    /// Lists an order's recorded changes, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is invalid.
    pub fn order_history(&mut self, order_id: OrderId) -> Result<Vec<OrderChange>, PersistenceError> {
        queries::history::list_history(&mut self.conn, order_id)
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Adds a product to a vendor's catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor does not exist or the insert fails.
    pub fn create_product(
        &mut self,
        vendor_id: VendorId,
        name: &str,
        price: Decimal,
    ) -> Result<ProductId, PersistenceError> {
        mutations::identity::create_product(&mut self.conn, vendor_id, name, price)
    }

    /// Retrieves a catalog product.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_product(
        &mut self,
        product_id: ProductId,
    ) -> Result<Option<ProductInfo>, PersistenceError> {
        queries::catalog::get_product(&mut self.conn, product_id)
    }

    /// Returns the ids of every product a vendor owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn product_ids_for_vendor(
        &mut self,
        vendor_id: VendorId,
    ) -> Result<BTreeSet<ProductId>, PersistenceError> {
        queries::catalog::product_ids_for_vendor(&mut self.conn, vendor_id)
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// Creates a vendor identity record.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the insert fails.
    pub fn create_vendor(
        &mut self,
        business_name: &str,
        email: &EmailAddress,
        created_at: &str,
    ) -> Result<VendorId, PersistenceError> {
        mutations::identity::create_vendor(&mut self.conn, business_name, email, created_at)
    }

    /// Creates a customer identity record.
    ///
    /// # Errors
    ///
    /// Returns an error if the email is taken or the insert fails.
    pub fn create_customer(
        &mut self,
        name: &str,
        email: &EmailAddress,
        created_at: &str,
    ) -> Result<CustomerId, PersistenceError> {
        mutations::identity::create_customer(&mut self.conn, name, email, created_at)
    }

    /// Retrieves a vendor by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_vendor(&mut self, vendor_id: VendorId) -> Result<Option<VendorData>, PersistenceError> {
        queries::identity::get_vendor_by_id(&mut self.conn, vendor_id)
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_customer(
        &mut self,
        customer_id: CustomerId,
    ) -> Result<Option<CustomerData>, PersistenceError> {
        queries::identity::get_customer_by_id(&mut self.conn, customer_id)
    }

    /// Retrieves several customers at once, keyed by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_customers(
        &mut self,
        customer_ids: &[CustomerId],
    ) -> Result<BTreeMap<CustomerId, CustomerData>, PersistenceError> {
        queries::identity::get_customers_by_ids(&mut self.conn, customer_ids)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Stores a bearer session for an actor.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        actor_kind: ActorKind,
        actor_id: i64,
        created_at: &str,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::identity::create_session(
            &mut self.conn,
            session_token,
            actor_kind,
            actor_id,
            created_at,
            expires_at,
        )
    }

    /// Retrieves a session by its bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::identity::get_session_by_token(&mut self.conn, session_token)
    }

    /// Deletes a session.
    ///
    /// # Errors
    ///
    /// Returns an error if no session carries the token.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::identity::delete_session(&mut self.conn, session_token)
    }

    /// Deletes every session that expired before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: &str) -> Result<usize, PersistenceError> {
        mutations::identity::delete_expired_sessions(&mut self.conn, now)
    }
}

impl CatalogLookup for Persistence {
    fn product(&mut self, product_id: ProductId) -> Result<Option<ProductInfo>, CatalogError> {
        self.get_product(product_id)
            .map_err(|e| CatalogError::new(e.to_string()))
    }

    fn products_owned_by(
        &mut self,
        vendor_id: VendorId,
    ) -> Result<BTreeSet<ProductId>, CatalogError> {
        self.product_ids_for_vendor(vendor_id)
            .map_err(|e| CatalogError::new(e.to_string()))
    }
}
