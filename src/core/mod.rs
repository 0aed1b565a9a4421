//! Core business logic - framework-agnostic account, item, sponsorship, and
//! funding operations.
//!
//! Every function takes the database connection (and, where scoping
//! applies, the acting account's id) explicitly; there is no ambient state.
//! The HTTP layer delegates here and owns no domain rules of its own.

/// Identity/access gate - credential resolution and session scoping
pub mod account;
/// Derived funding quantities and the dashboard read path
pub mod funding;
/// Item registry - scoped CRUD and the cascading delete
pub mod item;
/// Sponsorship ledger - pledges and the non-overfunding invariant
pub mod sponsorship;
