//! Item entity - Represents a purchasable thing with a target price.
//!
//! Each item belongs to exactly one account and accumulates sponsorships
//! until its price is covered. The optional image reference is either an
//! inline data URL or an external URL; the application never decodes it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    /// Opaque identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Human-readable name of the item (e.g., "Grill", "Team Jersey")
    pub name: String,
    /// Target price in dollars, always positive
    pub price: f64,
    /// Optional image reference (data URL or external URL), never decoded
    pub image_url: Option<String>,
    /// ID of the account that owns this item
    pub account_id: String,
    /// When the item was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Item and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
    /// One item has many sponsorships
    #[sea_orm(has_many = "super::sponsorship::Entity")]
    Sponsorships,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::sponsorship::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sponsorships.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
