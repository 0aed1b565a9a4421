//! Account entity - Represents an administrator identity.
//!
//! Each account owns a private collection of items and, through them, their
//! sponsorships. Accounts are seeded at startup and never created or
//! modified by the running application. The `password` and `passcode`
//! columns hold obscured tokens, never plaintext; comparisons happen only
//! after [`crate::secrets::reveal`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Opaque identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Login name for the admin path, unique across accounts
    #[sea_orm(unique)]
    pub username: String,
    /// Admin password, obscured at rest
    pub password: String,
    /// Visitor passcode, obscured at rest; unique across accounts
    pub passcode: String,
    /// Human-readable name shown in the dashboard header
    pub display_name: String,
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One account owns many items
    #[sea_orm(has_many = "super::item::Entity")]
    Items,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
