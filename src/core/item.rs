//! Item registry business logic - scoped CRUD over an account's items.
//!
//! Every operation takes the acting account's id and only ever touches rows
//! belonging to that account; an id outside the scope behaves exactly like
//! a missing id. Deletion cascades over the item's sponsorships inside one
//! database transaction so no orphaned pledges can survive.

use crate::{
    entities::{Item, Sponsorship, item, sponsorship},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use uuid::Uuid;

/// Validates the mutable item fields, returning the trimmed name.
fn validate_fields(name: &str, price: f64) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Item name cannot be empty".to_string(),
        });
    }
    if price <= 0.0 || !price.is_finite() {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(trimmed.to_string())
}

/// Retrieves all items owned by an account, in creation order.
pub async fn get_items_for_account(
    db: &DatabaseConnection,
    account_id: &str,
) -> Result<Vec<item::Model>> {
    Item::find()
        .filter(item::Column::AccountId.eq(account_id))
        .order_by_asc(item::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an item by id within an account's scope.
///
/// Returns `None` both for ids that do not exist and for items owned by a
/// different account; callers cannot distinguish the two.
pub async fn get_item_by_id(
    db: &DatabaseConnection,
    account_id: &str,
    item_id: &str,
) -> Result<Option<item::Model>> {
    Item::find_by_id(item_id)
        .filter(item::Column::AccountId.eq(account_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new item owned by the acting account.
///
/// Validates that the name is non-empty and the price is positive and
/// finite before any write. The opaque id is assigned here, at insert time;
/// callers never pick ids.
pub async fn create_item(
    db: &DatabaseConnection,
    account_id: &str,
    name: String,
    price: f64,
    image_url: Option<String>,
) -> Result<item::Model> {
    let name = validate_fields(&name, price)?;

    let item = item::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(name),
        price: Set(price),
        image_url: Set(image_url),
        account_id: Set(account_id.to_string()),
        created_at: Set(chrono::Utc::now()),
    };

    item.insert(db).await.map_err(Into::into)
}

/// Replaces an item's mutable fields in place.
///
/// Identifier and account scope never change. An id absent from the
/// account's scope is an explicit [`Error::ItemNotFound`] rather than a
/// silent no-op.
pub async fn update_item(
    db: &DatabaseConnection,
    account_id: &str,
    item_id: &str,
    name: String,
    price: f64,
    image_url: Option<String>,
) -> Result<item::Model> {
    let name = validate_fields(&name, price)?;

    let existing = get_item_by_id(db, account_id, item_id)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;

    let mut active: item::ActiveModel = existing.into();
    active.name = Set(name);
    active.price = Set(price);
    active.image_url = Set(image_url);

    active.update(db).await.map_err(Into::into)
}

/// Deletes an item and every sponsorship referencing it, atomically.
///
/// Both deletions run inside one database transaction: either the item and
/// all of its pledges disappear together, or nothing changes.
pub async fn delete_item(db: &DatabaseConnection, account_id: &str, item_id: &str) -> Result<()> {
    let txn = db.begin().await?;

    let item = Item::find_by_id(item_id)
        .filter(item::Column::AccountId.eq(account_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;

    Sponsorship::delete_many()
        .filter(sponsorship::Column::ItemId.eq(item_id))
        .exec(&txn)
        .await?;

    item.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
