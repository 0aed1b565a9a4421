//! Sponsorship ledger business logic - pledges against items.
//!
//! Creation enforces the non-overfunding invariant: the pledge amount may
//! not exceed the item's remaining balance. The remaining computation and
//! the insert happen inside one database transaction, so two sponsors
//! racing for the same item cannot jointly push it past its price - the
//! client-side remaining display is advisory, this check is the guarantee.
//!
//! Edits are an admin correction tool and deliberately skip the cap
//! re-check; an admin must be able to fix a previously miscapped entry.

use crate::{
    entities::{Item, Sponsorship, item, sponsorship},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use uuid::Uuid;

/// Validates the mutable sponsorship fields, returning the trimmed name.
fn validate_fields(sponsor_name: &str, amount: f64) -> Result<String> {
    let trimmed = sponsor_name.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: "Sponsor name cannot be empty".to_string(),
        });
    }
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(trimmed.to_string())
}

/// Sums all pledges recorded against an item.
///
/// Generic over the connection so it can run inside the creation
/// transaction as well as against a plain connection.
pub async fn total_sponsored<C>(db: &C, item_id: &str) -> Result<f64>
where
    C: ConnectionTrait,
{
    let pledges = Sponsorship::find()
        .filter(sponsorship::Column::ItemId.eq(item_id))
        .all(db)
        .await?;
    Ok(pledges.iter().map(|s| s.amount).sum())
}

/// Records a new pledge against an item in the acting account's scope.
///
/// Field validation happens before any read or write. The item lookup, the
/// remaining-balance check, and the insert all run inside one database
/// transaction; a pledge that would exceed the remaining balance is
/// rejected with [`Error::ExceedsRemaining`] and leaves the ledger
/// unchanged.
pub async fn create_sponsorship(
    db: &DatabaseConnection,
    account_id: &str,
    item_id: &str,
    sponsor_name: String,
    amount: f64,
) -> Result<sponsorship::Model> {
    let sponsor_name = validate_fields(&sponsor_name, amount)?;

    let txn = db.begin().await?;

    let item = Item::find_by_id(item_id)
        .filter(item::Column::AccountId.eq(account_id))
        .one(&txn)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })?;

    let sponsored = total_sponsored(&txn, item_id).await?;
    let remaining = (item.price - sponsored).max(0.0);
    if amount > remaining {
        return Err(Error::ExceedsRemaining { amount, remaining });
    }

    let pledge = sponsorship::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        item_id: Set(item_id.to_string()),
        sponsor_name: Set(sponsor_name),
        amount: Set(amount),
        created_at: Set(chrono::Utc::now()),
    };

    let result = pledge.insert(&txn).await?;
    txn.commit().await?;

    Ok(result)
}

/// Retrieves all pledges for an item, in insertion order.
pub async fn get_sponsorships_for_item(
    db: &DatabaseConnection,
    item_id: &str,
) -> Result<Vec<sponsorship::Model>> {
    Sponsorship::find()
        .filter(sponsorship::Column::ItemId.eq(item_id))
        .order_by_asc(sponsorship::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a pledge by id within an account's scope.
///
/// The scope is inherited through the pledge's item: a sponsorship whose
/// item belongs to a different account resolves to `None`.
pub async fn get_sponsorship_by_id(
    db: &DatabaseConnection,
    account_id: &str,
    sponsorship_id: &str,
) -> Result<Option<sponsorship::Model>> {
    let Some(pledge) = Sponsorship::find_by_id(sponsorship_id).one(db).await? else {
        return Ok(None);
    };

    let owned = Item::find_by_id(&pledge.item_id)
        .filter(item::Column::AccountId.eq(account_id))
        .one(db)
        .await?
        .is_some();

    Ok(owned.then_some(pledge))
}

/// Corrects a pledge's sponsor name and amount.
///
/// Admin correction path. Validates field shape but does NOT re-check the
/// non-overfunding cap - an admin may deliberately need to set an amount
/// above the item's current remaining balance. An id absent from the
/// account's scope is an explicit [`Error::SponsorshipNotFound`].
pub async fn update_sponsorship(
    db: &DatabaseConnection,
    account_id: &str,
    sponsorship_id: &str,
    sponsor_name: String,
    amount: f64,
) -> Result<sponsorship::Model> {
    let sponsor_name = validate_fields(&sponsor_name, amount)?;

    let existing = get_sponsorship_by_id(db, account_id, sponsorship_id)
        .await?
        .ok_or_else(|| Error::SponsorshipNotFound {
            id: sponsorship_id.to_string(),
        })?;

    let mut active: sponsorship::ActiveModel = existing.into();
    active.sponsor_name = Set(sponsor_name);
    active.amount = Set(amount);

    active.update(db).await.map_err(Into::into)
}
