/// Account seeding from accounts.toml
pub mod accounts;

/// Database configuration and connection management
pub mod database;
