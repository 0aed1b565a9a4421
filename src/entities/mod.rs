//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod account;
pub mod item;
pub mod sponsorship;

// Re-export specific types to avoid conflicts
pub use account::{Column as AccountColumn, Entity as Account, Model as AccountModel};
pub use item::{Column as ItemColumn, Entity as Item, Model as ItemModel};
pub use sponsorship::{
    Column as SponsorshipColumn, Entity as Sponsorship, Model as SponsorshipModel,
};
