//! Listing store — at most one active listing per (NFT contract, token).
//!
//! Reads preserve the source's mapping semantics: looking up an unlisted key
//! yields the vacant zero sentinel, and activity is tested via `price > 0`.

use std::collections::HashMap;

use openmart_types::{Listing, ListingKey};

/// Exclusive owner of all listing records. All mutation goes through the
/// engine.
#[derive(Debug, Default)]
pub struct ListingBook {
    listings: HashMap<ListingKey, Listing>,
}

impl ListingBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the listing under `key`, or the vacant sentinel if absent.
    #[must_use]
    pub fn get(&self, key: ListingKey) -> Listing {
        self.listings
            .get(&key)
            .copied()
            .unwrap_or_else(|| Listing::vacant(key.nft_contract, key.token_id))
    }

    /// Whether an active listing exists under `key`.
    #[must_use]
    pub fn is_listed(&self, key: ListingKey) -> bool {
        self.get(key).is_active()
    }

    /// Write (or overwrite) the listing under its own key.
    pub fn put(&mut self, listing: Listing) {
        self.listings.insert(listing.key(), listing);
    }

    /// Delete the listing under `key`, returning it if one was present.
    pub fn remove(&mut self, key: ListingKey) -> Option<Listing> {
        self.listings.remove(&key)
    }

    /// Number of stored listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use openmart_types::{AccountId, AssetId, NftContractId, TokenId};

    use super::*;

    fn listing(price: u128) -> Listing {
        Listing {
            seller: AccountId::random(),
            nft_contract: NftContractId::random(),
            token_id: TokenId(1),
            price,
            payment_asset: AssetId::random(),
        }
    }

    #[test]
    fn absent_key_reads_as_vacant() {
        let book = ListingBook::new();
        let key = ListingKey::new(NftContractId::random(), TokenId(9));
        let read = book.get(key);
        assert!(!read.is_active());
        assert_eq!(read.nft_contract, key.nft_contract);
        assert_eq!(read.token_id, key.token_id);
        assert!(!book.is_listed(key));
    }

    #[test]
    fn put_then_get_roundtrips() {
        let mut book = ListingBook::new();
        let entry = listing(500);
        book.put(entry);

        let read = book.get(entry.key());
        assert_eq!(read, entry);
        assert!(book.is_listed(entry.key()));
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn overwrite_replaces_previous() {
        let mut book = ListingBook::new();
        let mut entry = listing(500);
        book.put(entry);

        entry.price = 900;
        book.put(entry);

        assert_eq!(book.get(entry.key()).price, 900);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn remove_returns_the_listing() {
        let mut book = ListingBook::new();
        let entry = listing(500);
        book.put(entry);

        let removed = book.remove(entry.key());
        assert_eq!(removed, Some(entry));
        assert!(!book.is_listed(entry.key()));
        assert!(book.remove(entry.key()).is_none());
    }
}
