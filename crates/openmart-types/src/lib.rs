//! # openmart-types
//!
//! Shared types, errors, and configuration for the **OpenMart** marketplace
//! core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`AssetId`], [`NftContractId`], [`TokenId`], [`ListingKey`], [`EventId`]
//! - **Listing model**: [`Listing`] with the `price > 0` active sentinel
//! - **Event model**: [`MarketEvent`], [`EventRecord`]
//! - **Configuration**: [`MarketplaceConfig`]
//! - **Errors**: [`MarketError`] with `MKT_ERR_` prefix codes
//! - **Constants**: fee denominator and fee-exemption threshold

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod listing;

// Re-export all primary types at crate root for ergonomic imports:
//   use openmart_types::{Listing, MarketEvent, MarketError, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use listing::*;

// Constants are accessed via `openmart_types::constants::FOO`
// (not re-exported to avoid name collisions).
