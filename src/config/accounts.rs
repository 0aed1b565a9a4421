//! Account seeding from `accounts.toml`.
//!
//! Admin accounts are provisioned out-of-band: a TOML file lists each
//! account's username, password, passcode, and display name in plaintext,
//! and seeding obscures the secrets before they reach the database. Seeding
//! is idempotent - usernames already present are left untouched - so the
//! file can stay in place across restarts.

use crate::{
    entities::{Account, account},
    errors::{Error, Result},
    secrets,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Configuration structure representing the entire accounts.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// List of admin accounts to seed
    pub accounts: Vec<AccountSeed>,
}

/// Seed data for a single admin account
#[derive(Debug, Deserialize, Clone)]
pub struct AccountSeed {
    /// Login name for the admin path
    pub username: String,
    /// Admin password, plaintext in the seed file, obscured at rest
    pub password: String,
    /// Visitor passcode, plaintext in the seed file, obscured at rest
    pub passcode: String,
    /// Human-readable name shown in the dashboard header
    pub display_name: String,
}

/// Loads account configuration from a TOML file and validates it.
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML is invalid, or
/// the uniqueness invariants (username, password, passcode) are violated.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read accounts file: {e}"),
    })?;

    let config: Config = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse accounts.toml: {e}"),
    })?;

    validate(&config)?;
    Ok(config)
}

/// Loads account configuration from the default location (./accounts.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("accounts.toml")
}

/// Checks the seed file's invariants.
///
/// Usernames, passwords, and passcodes each serve as lookup keys during
/// authentication, so every one of them must be unique across accounts and
/// non-empty.
fn validate(config: &Config) -> Result<()> {
    let mut usernames = HashSet::new();
    let mut passwords = HashSet::new();
    let mut passcodes = HashSet::new();

    for seed in &config.accounts {
        if seed.username.trim().is_empty()
            || seed.password.is_empty()
            || seed.passcode.is_empty()
            || seed.display_name.trim().is_empty()
        {
            return Err(Error::Config {
                message: format!("Account '{}' has an empty field", seed.username),
            });
        }
        if !usernames.insert(seed.username.as_str()) {
            return Err(Error::Config {
                message: format!("Duplicate username in accounts.toml: {}", seed.username),
            });
        }
        if !passwords.insert(seed.password.as_str()) {
            return Err(Error::Config {
                message: format!("Duplicate password in accounts.toml ({})", seed.username),
            });
        }
        if !passcodes.insert(seed.passcode.as_str()) {
            return Err(Error::Config {
                message: format!("Duplicate passcode in accounts.toml ({})", seed.username),
            });
        }
    }

    Ok(())
}

/// Seeds the configured accounts into the database.
///
/// Existing usernames are skipped, making repeated startups safe. Secrets
/// are obscured before insert; the plaintext never reaches the store.
pub async fn seed_accounts(db: &DatabaseConnection, config: &Config) -> Result<()> {
    for seed in &config.accounts {
        let existing = Account::find()
            .filter(account::Column::Username.eq(seed.username.as_str()))
            .one(db)
            .await?;

        if existing.is_some() {
            continue;
        }

        let model = account::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(seed.username.clone()),
            password: Set(secrets::obscure(&seed.password)),
            passcode: Set(secrets::obscure(&seed.passcode)),
            display_name: Set(seed.display_name.clone()),
        };
        model.insert(db).await?;
        info!(username = %seed.username, "Seeded account");
    }

    Ok(())
}
