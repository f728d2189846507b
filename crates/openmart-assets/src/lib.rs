//! # openmart-assets
//!
//! The external asset capabilities the OpenMart engine consumes. The engine
//! never owns token or balance state — it only calls these read/transfer
//! interfaces, passed in per operation the way collaborators are passed
//! throughout this workspace.
//!
//! - [`NonFungibleAsset`]: ownership lookup, approval lookup,
//!   transfer-on-behalf.
//! - [`FungibleAsset`]: balance lookup, allowance lookup, transfer,
//!   transfer-on-behalf.
//!
//! The `test-helpers` feature ships [`MemoryNft`] and [`MemoryToken`],
//! in-memory reference implementations used by the engine's test suites.
//! Production deployments supply adapters to real asset contracts instead.

pub mod fungible;
pub mod nft;

#[cfg(any(test, feature = "test-helpers"))]
pub mod memory;

pub use fungible::FungibleAsset;
pub use nft::NonFungibleAsset;

#[cfg(any(test, feature = "test-helpers"))]
pub use memory::{MemoryNft, MemoryToken};
