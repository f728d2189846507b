//! Domain events emitted by the marketplace engine.
//!
//! Events form an append-only, ordered record of successful state
//! transitions, consumable by off-chain indexers. Failed operations never
//! emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetId, EventId, NftContractId, TokenId};

/// A successful marketplace state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// A seller listed a token at a fixed price.
    ItemListed {
        seller: AccountId,
        nft_contract: NftContractId,
        token_id: TokenId,
        price: u128,
        payment_asset: AssetId,
    },
    /// A buyer executed an atomic purchase.
    ItemBought {
        buyer: AccountId,
        nft_contract: NftContractId,
        token_id: TokenId,
        price: u128,
        payment_asset: AssetId,
    },
    /// The owner withdrew an active listing. No funds moved (none were held).
    ListingCanceled {
        seller: AccountId,
        nft_contract: NftContractId,
        token_id: TokenId,
    },
    /// A beneficiary drained their accrued earnings for one asset.
    EarningsWithdrawn {
        beneficiary: AccountId,
        asset: AssetId,
        amount: u128,
    },
}

impl MarketEvent {
    /// Stable event kind label for log filtering and indexer routing.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ItemListed { .. } => "ITEM_LISTED",
            Self::ItemBought { .. } => "ITEM_BOUGHT",
            Self::ListingCanceled { .. } => "LISTING_CANCELED",
            Self::EarningsWithdrawn { .. } => "EARNINGS_WITHDRAWN",
        }
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind())
    }
}

/// One entry in the marketplace event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Deterministic per `(marketplace, sequence)`.
    pub id: EventId,
    /// Position in the log, contiguous from 0.
    pub sequence: u64,
    /// When the transition committed.
    pub at: DateTime<Utc>,
    /// The transition itself.
    pub event: MarketEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_labels() {
        let event = MarketEvent::ListingCanceled {
            seller: AccountId::random(),
            nft_contract: NftContractId::random(),
            token_id: TokenId(1),
        };
        assert_eq!(event.kind(), "LISTING_CANCELED");
        assert_eq!(format!("{event}"), "LISTING_CANCELED");
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = MarketEvent::ItemBought {
            buyer: AccountId::random(),
            nft_contract: NftContractId::random(),
            token_id: TokenId(3),
            price: 999,
            payment_asset: AssetId::random(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn record_serde_roundtrip() {
        let record = EventRecord {
            id: EventId::deterministic(AccountId([7u8; 32]), 4),
            sequence: 4,
            at: Utc::now(),
            event: MarketEvent::EarningsWithdrawn {
                beneficiary: AccountId::random(),
                asset: AssetId::random(),
                amount: 10,
            },
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
