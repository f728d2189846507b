//! Identifiers used throughout OpenMart.
//!
//! Accounts and contracts are 32-byte addresses rendered as hex. Tokens are
//! scoped to their NFT contract, so a listed item is always addressed by the
//! compound [`ListingKey`]. Event identifiers are derived deterministically
//! from `(marketplace, sequence)` so replicas of the same log agree.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// A caller, seller, buyer, operator, or the marketplace itself (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Random account for tests.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// A fungible payment-asset contract (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Random asset id for tests.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// NftContractId
// ---------------------------------------------------------------------------

/// A non-fungible asset contract (32 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NftContractId(pub [u8; 32]);

impl NftContractId {
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Random contract id for tests.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for NftContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nft:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// A token within an NFT contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ListingKey
// ---------------------------------------------------------------------------

/// Compound key addressing a listed item: at most one active listing exists
/// per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ListingKey {
    pub nft_contract: NftContractId,
    pub token_id: TokenId,
}

impl ListingKey {
    #[must_use]
    pub fn new(nft_contract: NftContractId, token_id: TokenId) -> Self {
        Self {
            nft_contract,
            token_id,
        }
    }
}

impl fmt::Display for ListingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.nft_contract, self.token_id)
    }
}

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// Unique identifier for an emitted market event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Deterministic `EventId` from the marketplace identity and the event's
    /// position in the log.
    ///
    /// Every replica of the same marketplace derives the **exact same** id
    /// for the same log position — indexers can dedupe on it.
    #[must_use]
    pub fn deterministic(marketplace: AccountId, sequence: u64) -> Self {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(b"openmart:event_id:v1:");
        hasher.update(marketplace.as_bytes());
        hasher.update(sequence.to_le_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_display_is_prefixed_hex() {
        let id = AccountId([0xab; 32]);
        assert_eq!(format!("{id}"), "acct:abababababababab");
        assert_eq!(id.short(), "abababab");
    }

    #[test]
    fn random_ids_differ() {
        assert_ne!(AccountId::random(), AccountId::random());
        assert_ne!(AssetId::random(), AssetId::random());
        assert_ne!(NftContractId::random(), NftContractId::random());
    }

    #[test]
    fn listing_key_equality() {
        let contract = NftContractId([1u8; 32]);
        let a = ListingKey::new(contract, TokenId(7));
        let b = ListingKey::new(contract, TokenId(7));
        let c = ListingKey::new(contract, TokenId(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn event_id_deterministic() {
        let mp = AccountId([9u8; 32]);
        let a = EventId::deterministic(mp, 0);
        let b = EventId::deterministic(mp, 0);
        assert_eq!(a, b);

        let c = EventId::deterministic(mp, 1);
        assert_ne!(a, c);

        let other = AccountId([10u8; 32]);
        assert_ne!(a, EventId::deterministic(other, 0));
    }

    #[test]
    fn serde_roundtrips() {
        let acct = AccountId::random();
        let json = serde_json::to_string(&acct).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(acct, back);

        let key = ListingKey::new(NftContractId::random(), TokenId(42));
        let json = serde_json::to_string(&key).unwrap();
        let back: ListingKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }
}
