//! Funding status - derived quantities over items and their pledges.
//!
//! Nothing here is stored: total sponsored, remaining balance, and percent
//! funded are recomputed from the ledger on every read. The remaining
//! balance is clamped at zero so an over-corrected ledger (an admin edit
//! past the cap) can never surface a negative outstanding amount.

use crate::{
    core::{item as item_ops, sponsorship as sponsorship_ops},
    entities::{item, sponsorship},
    errors::Result,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Funding status of a single item, joined with its ledger.
#[derive(Debug, Clone, Serialize)]
pub struct ItemFunding {
    /// The item being funded
    pub item: item::Model,
    /// Sum of all pledges recorded against the item
    pub total_sponsored: f64,
    /// Outstanding balance, clamped at zero
    pub remaining: f64,
    /// Funding progress as a percentage of the price
    pub percent_funded: f64,
    /// Whether the remaining balance has reached zero
    pub fully_sponsored: bool,
    /// The pledges themselves, in insertion order
    pub sponsorships: Vec<sponsorship::Model>,
}

/// Outstanding balance for a price and sponsored total, floored at zero.
#[must_use]
pub fn remaining(price: f64, total_sponsored: f64) -> f64 {
    (price - total_sponsored).max(0.0)
}

/// Funding progress as a percentage of the price.
///
/// A zero price cannot occur for items created through the registry, but
/// the guard keeps the function total.
#[must_use]
pub fn percent_funded(price: f64, total_sponsored: f64) -> f64 {
    if price == 0.0 {
        return 0.0;
    }
    (total_sponsored / price) * 100.0
}

/// Whether the item's funding has reached or passed its price.
#[must_use]
pub fn fully_sponsored(price: f64, total_sponsored: f64) -> bool {
    percent_funded(price, total_sponsored) >= 100.0
}

/// Computes the funding status for one item.
pub async fn funding_for_item(
    db: &DatabaseConnection,
    item: item::Model,
) -> Result<ItemFunding> {
    let sponsorships = sponsorship_ops::get_sponsorships_for_item(db, &item.id).await?;
    let total_sponsored: f64 = sponsorships.iter().map(|s| s.amount).sum();

    Ok(ItemFunding {
        total_sponsored,
        remaining: remaining(item.price, total_sponsored),
        percent_funded: percent_funded(item.price, total_sponsored),
        fully_sponsored: fully_sponsored(item.price, total_sponsored),
        sponsorships,
        item,
    })
}

/// Dashboard read path: every item in an account's scope joined with its
/// funding status, in item creation order.
pub async fn funding_overview(
    db: &DatabaseConnection,
    account_id: &str,
) -> Result<Vec<ItemFunding>> {
    let items = item_ops::get_items_for_account(db, account_id).await?;

    let mut overview = Vec::with_capacity(items.len());
    for item in items {
        overview.push(funding_for_item(db, item).await?);
    }
    Ok(overview)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_remaining_partial() {
        assert_eq!(remaining(100.0, 75.0), 25.0);
    }

    #[test]
    fn test_remaining_clamped_at_zero() {
        // An over-corrected ledger never yields a negative balance.
        assert_eq!(remaining(100.0, 150.0), 0.0);
    }

    #[test]
    fn test_percent_funded_partial() {
        assert_eq!(percent_funded(100.0, 75.0), 75.0);
    }

    #[test]
    fn test_percent_funded_zero_price_guard() {
        assert_eq!(percent_funded(0.0, 50.0), 0.0);
    }

    #[test]
    fn test_fully_sponsored_boundary() {
        assert!(!fully_sponsored(100.0, 99.99));
        assert!(fully_sponsored(100.0, 100.0));
        assert!(fully_sponsored(100.0, 150.0));
    }

    #[tokio::test]
    async fn test_funding_for_item_integration() -> Result<()> {
        // Price 100 with pledges 40 + 35.
        let (db, account, item) = setup_with_item().await?;
        create_test_sponsorship(&db, &account.id, &item.id, 40.0).await?;
        create_test_sponsorship(&db, &account.id, &item.id, 35.0).await?;

        let funding = funding_for_item(&db, item).await?;
        assert_eq!(funding.total_sponsored, 75.0);
        assert_eq!(funding.remaining, 25.0);
        assert_eq!(funding.percent_funded, 75.0);
        assert!(!funding.fully_sponsored);
        assert_eq!(funding.sponsorships.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_funding_reaches_full() -> Result<()> {
        let (db, account, item) = setup_with_item().await?;
        create_test_sponsorship(&db, &account.id, &item.id, 40.0).await?;
        create_test_sponsorship(&db, &account.id, &item.id, 35.0).await?;
        create_test_sponsorship(&db, &account.id, &item.id, 25.0).await?;

        let funding = funding_for_item(&db, item).await?;
        assert_eq!(funding.remaining, 0.0);
        assert_eq!(funding.percent_funded, 100.0);
        assert!(funding.fully_sponsored);

        Ok(())
    }

    #[tokio::test]
    async fn test_funding_for_unsponsored_item() -> Result<()> {
        let (db, _account, item) = setup_with_item().await?;

        let funding = funding_for_item(&db, item).await?;
        assert_eq!(funding.total_sponsored, 0.0);
        assert_eq!(funding.remaining, 100.0);
        assert_eq!(funding.percent_funded, 0.0);
        assert!(!funding.fully_sponsored);
        assert!(funding.sponsorships.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_funding_overview_scoped_and_ordered() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_custom_account(&db, "alice", "alicepass", "alicecode", "Alice").await?;
        let bob = create_custom_account(&db, "bob", "bobpass", "bobcode", "Bob").await?;

        let grill = create_test_item(&db, &alice.id, "Grill").await?;
        create_test_item(&db, &alice.id, "Jersey").await?;
        create_test_item(&db, &bob.id, "Tent").await?;
        create_test_sponsorship(&db, &alice.id, &grill.id, 50.0).await?;

        let overview = funding_overview(&db, &alice.id).await?;
        assert_eq!(overview.len(), 2);
        assert_eq!(overview[0].item.name, "Grill");
        assert_eq!(overview[0].total_sponsored, 50.0);
        assert_eq!(overview[1].item.name, "Jersey");
        assert_eq!(overview[1].total_sponsored, 0.0);

        Ok(())
    }
}
