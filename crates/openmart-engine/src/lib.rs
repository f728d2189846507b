//! # openmart-engine
//!
//! The marketplace engine: listing/purchase/settlement state machine and the
//! internal earnings ledger.
//!
//! ## Architecture
//!
//! The engine is the sole writer of two keyed stores and consults two
//! external capabilities:
//!
//! 1. **`SupportedAssets`**: immutable-after-construction payment whitelist
//! 2. **`ListingBook`**: at most one active listing per (NFT contract, token)
//! 3. **`EarningsLedger`**: accrued proceeds per (beneficiary, asset), with
//!    the marketplace's own id as the reserved platform beneficiary
//! 4. **`ReentrancyGuard`**: "operation in progress" flag around purchases
//! 5. **`EventLog`**: append-only record of committed transitions
//!
//! ## Operation Flow
//!
//! ```text
//! caller → Marketplace → (reads ListingBook / EarningsLedger)
//!        → (calls out to NonFungibleAsset / FungibleAsset)
//!        → (mutates ListingBook / EarningsLedger)
//!        → EventLog.append
//! ```
//!
//! Every operation either commits all of its writes or none of them.

pub mod earnings;
pub mod engine;
pub mod events;
pub mod listings;
pub mod reentrancy;
pub mod registry;

pub use earnings::{EarningsLedger, StagedCredits};
pub use engine::Marketplace;
pub use events::EventLog;
pub use listings::ListingBook;
pub use reentrancy::{ReentrancyGuard, ReentrancySpan};
pub use registry::SupportedAssets;
