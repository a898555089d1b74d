// Copyright (C) 2026 The Pillora Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! Connection setup, embedded migrations, and the few PRAGMA-level checks
//! Diesel has no DSL for.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations for the identity, catalog, and order tables.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Tables the order service expects after migration.
pub const EXPECTED_TABLES: [&str; 7] = [
    "customers",
    "order_items",
    "order_status_history",
    "orders",
    "products",
    "sessions",
    "vendors",
];

/// Result row of `PRAGMA foreign_keys`.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct IndexInfoRow {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Returns the rowid of the most recent insert on this connection.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Verifies that foreign key enforcement is enabled.
///
/// Order items and history rows reference their order; without enforcement
/// those references are unchecked.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Checks that the migrated schema has every expected table and that
/// `orders.order_number` is covered by a unique index.
///
/// # Errors
///
/// Returns `PersistenceError::MigrationFailed` naming the first missing
/// piece.
pub fn verify_schema(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let tables: Vec<String> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
    )
    .load::<NameRow>(conn)?
    .into_iter()
    .map(|row| row.name)
    .collect();

    if let Some(missing) = EXPECTED_TABLES
        .iter()
        .find(|table| !tables.iter().any(|t| t == *table))
    {
        return Err(PersistenceError::MigrationFailed(format!(
            "table '{missing}' is missing"
        )));
    }

    let unique_indexes: Vec<String> = diesel::sql_query(
        "SELECT name FROM pragma_index_list('orders') WHERE \"unique\" = 1",
    )
    .load::<NameRow>(conn)?
    .into_iter()
    .map(|row| row.name)
    .collect();

    for index in unique_indexes {
        let columns: Vec<IndexInfoRow> = diesel::sql_query(format!(
            "SELECT name FROM pragma_index_info('{index}')"
        ))
        .load(conn)?;
        if columns.len() == 1 && columns[0].name == "order_number" {
            debug!(index, "order_number unique index present");
            return Ok(());
        }
    }

    Err(PersistenceError::MigrationFailed(String::from(
        "orders.order_number has no unique index",
    )))
}

/// Applies all pending migrations.
///
/// # Arguments
///
/// * `conn` - A mutable reference to a Diesel `SqliteConnection`
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Initialize a `SQLite` database at the given URL and run migrations.
///
/// # Arguments
///
/// * `database_url` - The `SQLite` database URL (e.g., `":memory:"` or file path)
///
/// # Errors
///
/// Returns an error if connection or migration fails.
pub fn initialize_database(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, "Initializing SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    // Diesel has no PRAGMA DSL
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;

    run_migrations(&mut conn).map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    verify_schema(&mut conn)?;

    Ok(conn)
}

/// Enables WAL journaling for file-based databases.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}
