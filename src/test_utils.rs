//! Shared test utilities for Sponsorboard.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::{item, sponsorship},
    entities::{self, account},
    errors::Result,
    secrets,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use uuid::Uuid;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test account with secrets derived from the username.
///
/// # Defaults
/// * `password`: `"{username}pass"`
/// * `passcode`: `"{username}code"`
/// * `display_name`: username with the first letter uppercased
pub async fn create_test_account(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::account::Model> {
    let display_name = {
        let mut chars = username.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    };
    create_custom_account(
        db,
        username,
        &format!("{username}pass"),
        &format!("{username}code"),
        &display_name,
    )
    .await
}

/// Creates a test account with explicit credentials.
///
/// Secrets are obscured before insert, the same way startup seeding stores
/// them.
pub async fn create_custom_account(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    passcode: &str,
    display_name: &str,
) -> Result<entities::account::Model> {
    let model = account::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        username: Set(username.to_string()),
        password: Set(secrets::obscure(password)),
        passcode: Set(secrets::obscure(passcode)),
        display_name: Set(display_name.to_string()),
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates a test item with sensible defaults.
///
/// # Defaults
/// * `price`: 100.0
/// * `image_url`: None
pub async fn create_test_item(
    db: &DatabaseConnection,
    account_id: &str,
    name: &str,
) -> Result<entities::item::Model> {
    item::create_item(db, account_id, name.to_string(), 100.0, None).await
}

/// Creates a test item with a custom price.
pub async fn create_custom_item(
    db: &DatabaseConnection,
    account_id: &str,
    name: &str,
    price: f64,
) -> Result<entities::item::Model> {
    item::create_item(db, account_id, name.to_string(), price, None).await
}

/// Creates a test sponsorship with a default sponsor name.
pub async fn create_test_sponsorship(
    db: &DatabaseConnection,
    account_id: &str,
    item_id: &str,
    amount: f64,
) -> Result<entities::sponsorship::Model> {
    sponsorship::create_sponsorship(db, account_id, item_id, "Test Sponsor".to_string(), amount)
        .await
}

/// Creates a test sponsorship with a custom sponsor name.
pub async fn create_custom_sponsorship(
    db: &DatabaseConnection,
    account_id: &str,
    item_id: &str,
    sponsor_name: &str,
    amount: f64,
) -> Result<entities::sponsorship::Model> {
    sponsorship::create_sponsorship(db, account_id, item_id, sponsor_name.to_string(), amount)
        .await
}

/// Sets up a complete test environment with one account.
/// Returns (db, account) for common test scenarios.
pub async fn setup_with_account() -> Result<(DatabaseConnection, entities::account::Model)> {
    let db = setup_test_db().await?;
    let account = create_test_account(&db, "alice").await?;
    Ok((db, account))
}

/// Sets up a complete test environment with an account and one item
/// priced at 100. Returns (db, account, item).
pub async fn setup_with_item() -> Result<(
    DatabaseConnection,
    entities::account::Model,
    entities::item::Model,
)> {
    let db = setup_test_db().await?;
    let account = create_test_account(&db, "alice").await?;
    let item = create_test_item(&db, &account.id, "Test Item").await?;
    Ok((db, account, item))
}
