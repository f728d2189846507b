//! The fixed-price listing record.
//!
//! A listing's existence is tested by `price > 0`: the all-zero record is the
//! canonical "absent" state, and reading an unlisted key yields that vacant
//! sentinel rather than an error.

use serde::{Deserialize, Serialize};

use crate::{AccountId, AssetId, ListingKey, NftContractId, TokenId};

/// A fixed-price offer of one token against one payment asset.
///
/// Listings are non-custodial: the seller keeps the token (and must keep the
/// marketplace approved on it) until the sale executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// The account that created the listing; must own the token at listing
    /// time.
    pub seller: AccountId,
    /// The NFT contract holding the token.
    pub nft_contract: NftContractId,
    /// The token offered for sale.
    pub token_id: TokenId,
    /// Payment amount required to purchase. `0` means "no active listing".
    pub price: u128,
    /// The fungible asset the price is denominated in.
    pub payment_asset: AssetId,
}

impl Listing {
    /// The zero sentinel for an unlisted key.
    #[must_use]
    pub fn vacant(nft_contract: NftContractId, token_id: TokenId) -> Self {
        Self {
            seller: AccountId([0u8; 32]),
            nft_contract,
            token_id,
            price: 0,
            payment_asset: AssetId([0u8; 32]),
        }
    }

    /// Whether this record represents an active listing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.price > 0
    }

    /// The compound key this listing lives under.
    #[must_use]
    pub fn key(&self) -> ListingKey {
        ListingKey::new(self.nft_contract, self.token_id)
    }
}
