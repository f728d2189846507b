//! Earnings ledger — accrued-but-unwithdrawn proceeds per (beneficiary,
//! asset).
//!
//! The platform operator's share accrues under the marketplace's own account
//! id, a reserved beneficiary no external actor can occupy. Two disciplines
//! keep the ledger consistent:
//!
//! - **Staged credits**: a purchase credits seller and platform in one
//!   all-or-nothing step. The new values are computed with checked
//!   arithmetic before anything mutates, so accrual overflow aborts with the
//!   ledger untouched.
//! - **Take-before-transfer**: withdrawals zero the entry first, hand the
//!   drained amount to the outbound transfer, and restore it only if that
//!   transfer fails. A re-entrant withdrawal in between reads zero.

use std::collections::HashMap;

use openmart_types::{AccountId, AssetId, MarketError, Result};

/// One pending ledger write: the entry's value before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StagedEntry {
    key: (AccountId, AssetId),
    previous: u128,
    updated: u128,
}

/// A validated, not-yet-applied set of credits. Applying cannot fail;
/// reverting restores the exact prior values.
#[derive(Debug, Clone)]
pub struct StagedCredits {
    entries: Vec<StagedEntry>,
}

/// Keyed accrual store, exclusively owned by the engine.
#[derive(Debug, Default)]
pub struct EarningsLedger {
    balances: HashMap<(AccountId, AssetId), u128>,
}

impl EarningsLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accrued balance for a (beneficiary, asset) pair. Absent entries read
    /// as zero.
    #[must_use]
    pub fn balance(&self, beneficiary: AccountId, asset: AssetId) -> u128 {
        self.balances
            .get(&(beneficiary, asset))
            .copied()
            .unwrap_or(0)
    }

    /// Credit a single entry with checked addition.
    ///
    /// # Errors
    /// Returns [`MarketError::ArithmeticOverflow`] if the accrual would wrap.
    pub fn credit(&mut self, beneficiary: AccountId, asset: AssetId, amount: u128) -> Result<u128> {
        let current = self.balance(beneficiary, asset);
        let updated = current
            .checked_add(amount)
            .ok_or(MarketError::ArithmeticOverflow)?;
        self.balances.insert((beneficiary, asset), updated);
        Ok(updated)
    }

    /// Validate a batch of credits without mutating.
    ///
    /// Credits to the same (beneficiary, asset) pair accumulate within the
    /// batch, so combined overflow is caught even when each credit alone
    /// would fit.
    ///
    /// # Errors
    /// Returns [`MarketError::ArithmeticOverflow`] if any resulting value
    /// would wrap.
    pub fn stage_credits(
        &self,
        credits: &[(AccountId, AssetId, u128)],
    ) -> Result<StagedCredits> {
        let mut entries: Vec<StagedEntry> = Vec::with_capacity(credits.len());
        for &(beneficiary, asset, amount) in credits {
            let key = (beneficiary, asset);
            match entries.iter_mut().find(|e| e.key == key) {
                Some(entry) => {
                    entry.updated = entry
                        .updated
                        .checked_add(amount)
                        .ok_or(MarketError::ArithmeticOverflow)?;
                }
                None => {
                    let previous = self.balance(beneficiary, asset);
                    let updated = previous
                        .checked_add(amount)
                        .ok_or(MarketError::ArithmeticOverflow)?;
                    entries.push(StagedEntry {
                        key,
                        previous,
                        updated,
                    });
                }
            }
        }
        Ok(StagedCredits { entries })
    }

    /// Apply a staged batch. Infallible: all arithmetic already happened.
    pub fn apply(&mut self, staged: &StagedCredits) {
        for entry in &staged.entries {
            self.balances.insert(entry.key, entry.updated);
        }
    }

    /// Restore the exact pre-staging values.
    pub fn revert(&mut self, staged: &StagedCredits) {
        for entry in &staged.entries {
            if entry.previous == 0 {
                self.balances.remove(&entry.key);
            } else {
                self.balances.insert(entry.key, entry.previous);
            }
        }
    }

    /// Zero the entry and return the drained amount (zero if absent).
    pub fn take(&mut self, beneficiary: AccountId, asset: AssetId) -> u128 {
        self.balances.remove(&(beneficiary, asset)).unwrap_or(0)
    }

    /// Put back a drained amount after a failed outbound transfer.
    pub fn restore(&mut self, beneficiary: AccountId, asset: AssetId, amount: u128) {
        if amount > 0 {
            self.balances.insert((beneficiary, asset), amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (AccountId, AssetId) {
        (AccountId::random(), AssetId::random())
    }

    #[test]
    fn absent_entry_reads_zero() {
        let ledger = EarningsLedger::new();
        let (who, asset) = ids();
        assert_eq!(ledger.balance(who, asset), 0);
    }

    #[test]
    fn credit_accumulates() {
        let mut ledger = EarningsLedger::new();
        let (who, asset) = ids();
        ledger.credit(who, asset, 100).unwrap();
        ledger.credit(who, asset, 50).unwrap();
        assert_eq!(ledger.balance(who, asset), 150);
    }

    #[test]
    fn credit_overflow_leaves_entry_unchanged() {
        let mut ledger = EarningsLedger::new();
        let (who, asset) = ids();
        ledger.credit(who, asset, u128::MAX).unwrap();
        let err = ledger.credit(who, asset, 1).unwrap_err();
        assert!(matches!(err, MarketError::ArithmeticOverflow));
        assert_eq!(ledger.balance(who, asset), u128::MAX);
    }

    #[test]
    fn stage_then_apply_credits_both_parties() {
        let mut ledger = EarningsLedger::new();
        let (seller, asset) = ids();
        let platform = AccountId::random();

        let staged = ledger
            .stage_credits(&[(seller, asset, 975), (platform, asset, 25)])
            .unwrap();
        // Nothing applied yet.
        assert_eq!(ledger.balance(seller, asset), 0);

        ledger.apply(&staged);
        assert_eq!(ledger.balance(seller, asset), 975);
        assert_eq!(ledger.balance(platform, asset), 25);
    }

    #[test]
    fn stage_detects_combined_overflow_on_same_key() {
        let ledger = EarningsLedger::new();
        let (who, asset) = ids();
        // Each credit alone fits; together they wrap.
        let err = ledger
            .stage_credits(&[(who, asset, u128::MAX), (who, asset, 1)])
            .unwrap_err();
        assert!(matches!(err, MarketError::ArithmeticOverflow));
    }

    #[test]
    fn revert_restores_prior_values() {
        let mut ledger = EarningsLedger::new();
        let (seller, asset) = ids();
        let platform = AccountId::random();
        ledger.credit(seller, asset, 10).unwrap();

        let staged = ledger
            .stage_credits(&[(seller, asset, 90), (platform, asset, 5)])
            .unwrap();
        ledger.apply(&staged);
        assert_eq!(ledger.balance(seller, asset), 100);

        ledger.revert(&staged);
        assert_eq!(ledger.balance(seller, asset), 10);
        assert_eq!(ledger.balance(platform, asset), 0);
    }

    #[test]
    fn take_zeroes_and_restore_puts_back() {
        let mut ledger = EarningsLedger::new();
        let (who, asset) = ids();
        ledger.credit(who, asset, 700).unwrap();

        let drained = ledger.take(who, asset);
        assert_eq!(drained, 700);
        assert_eq!(ledger.balance(who, asset), 0);

        // Second take drains nothing.
        assert_eq!(ledger.take(who, asset), 0);

        ledger.restore(who, asset, drained);
        assert_eq!(ledger.balance(who, asset), 700);
    }
}
