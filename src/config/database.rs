//! Database configuration and connection management.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. The
//! backend is selected by `DATABASE_URL`: a `sqlite://` file path for a
//! durable store, or `sqlite::memory:` for the in-memory variant used in
//! tests and throwaway runs. Tables are generated from the entity
//! definitions via `Schema::create_table_from_entity`, so the schema always
//! matches the Rust structs without hand-written SQL.

use crate::entities::{Account, Item, Sponsorship};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, QuerySelect, Schema};

/// Gets the database URL from the environment or returns the default
/// `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/sponsorboard.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database selected by `DATABASE_URL`.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url())
        .await
        .map_err(Into::into)
}

/// Connects to the configured database and ensures the schema exists.
///
/// `SeaORM` schema generation does not emit `IF NOT EXISTS`, so the tables
/// are only created when a probe query shows they are missing. This makes
/// startup safe against both a fresh database file and a restart.
pub async fn init_db() -> Result<DatabaseConnection> {
    let db = create_connection().await?;

    let probe = Account::find().limit(1).all(&db).await;
    if probe.is_err() {
        create_tables(&db).await?;
    }

    Ok(db)
}

/// Creates all necessary tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let account_table = schema.create_table_from_entity(Account);
    let item_table = schema.create_table_from_entity(Item);
    let sponsorship_table = schema.create_table_from_entity(Sponsorship);

    db.execute(builder.build(&account_table)).await?;
    db.execute(builder.build(&item_table)).await?;
    db.execute(builder.build(&sponsorship_table)).await?;

    Ok(())
}
