//! Sponsorship entity - Represents a pledge of funds toward one item.
//!
//! Sponsorships reference their item by id; the account scope is inherited
//! through the item. They are deleted only as part of the parent item's
//! cascading delete.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sponsorship database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sponsorships")]
pub struct Model {
    /// Opaque identifier assigned at insert time
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// ID of the item this pledge funds
    pub item_id: String,
    /// Display name of the sponsor, shown in the acknowledgment
    pub sponsor_name: String,
    /// Pledged amount in dollars, always positive
    pub amount: f64,
    /// When the pledge was recorded; listing order follows this
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Sponsorship and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each sponsorship belongs to one item
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id"
    )]
    Item,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
