//! Append-only event log.
//!
//! Each successful state transition appends exactly one record; failed
//! operations append nothing. Sequences are contiguous from zero and ids are
//! deterministic per `(marketplace, sequence)`, so two replicas of the same
//! history produce identical logs (modulo timestamps) — indexers can dedupe
//! on the id.

use chrono::Utc;
use openmart_types::{AccountId, EventId, EventRecord, MarketEvent};

/// Ordered record of everything the marketplace has committed.
#[derive(Debug)]
pub struct EventLog {
    marketplace: AccountId,
    records: Vec<EventRecord>,
}

impl EventLog {
    #[must_use]
    pub fn new(marketplace: AccountId) -> Self {
        Self {
            marketplace,
            records: Vec::new(),
        }
    }

    /// Append one event, assigning the next sequence number.
    pub fn append(&mut self, event: MarketEvent) -> EventRecord {
        let sequence = self.records.len() as u64;
        let record = EventRecord {
            id: EventId::deterministic(self.marketplace, sequence),
            sequence,
            at: Utc::now(),
            event,
        };
        self.records.push(record);
        record
    }

    /// All records, oldest first.
    #[must_use]
    pub fn all(&self) -> &[EventRecord] {
        &self.records
    }

    /// Records at or after `sequence` — the indexer catch-up cursor.
    #[must_use]
    pub fn since(&self, sequence: u64) -> &[EventRecord] {
        let start = usize::try_from(sequence).unwrap_or(usize::MAX);
        if start >= self.records.len() {
            &[]
        } else {
            &self.records[start..]
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use openmart_types::{AssetId, NftContractId, TokenId};

    use super::*;

    fn canceled() -> MarketEvent {
        MarketEvent::ListingCanceled {
            seller: AccountId::random(),
            nft_contract: NftContractId::random(),
            token_id: TokenId(1),
        }
    }

    #[test]
    fn sequences_are_contiguous() {
        let mut log = EventLog::new(AccountId::random());
        log.append(canceled());
        log.append(canceled());
        log.append(canceled());

        let sequences: Vec<u64> = log.all().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[test]
    fn ids_deterministic_across_replicas() {
        let marketplace = AccountId::random();
        let mut a = EventLog::new(marketplace);
        let mut b = EventLog::new(marketplace);

        let event = MarketEvent::EarningsWithdrawn {
            beneficiary: AccountId::random(),
            asset: AssetId::random(),
            amount: 5,
        };
        let ra = a.append(event);
        let rb = b.append(event);
        assert_eq!(ra.id, rb.id);
    }

    #[test]
    fn since_cursor() {
        let mut log = EventLog::new(AccountId::random());
        for _ in 0..5 {
            log.append(canceled());
        }

        assert_eq!(log.since(0).len(), 5);
        assert_eq!(log.since(3).len(), 2);
        assert_eq!(log.since(3)[0].sequence, 3);
        assert!(log.since(5).is_empty());
        assert!(log.since(999).is_empty());
    }
}
