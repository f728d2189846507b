//! The fungible asset capability.

use openmart_types::{AccountId, Result};

/// Read/transfer interface of a fungible payment-asset contract.
///
/// Amounts are integer token units. Balance and allowance reads are
/// infallible (unknown accounts read as zero); transfers fail per the asset
/// contract's own rules.
pub trait FungibleAsset {
    /// Balance of `owner`.
    fn balance_of(&self, owner: AccountId) -> u128;

    /// Remaining amount `spender` may pull from `owner`.
    fn allowance(&self, owner: AccountId, spender: AccountId) -> u128;

    /// Move `amount` from `from` to `to`, where `from` is the caller itself.
    ///
    /// # Errors
    /// Fails if `from`'s balance is below `amount`.
    fn transfer(&mut self, from: AccountId, to: AccountId, amount: u128) -> Result<()>;

    /// Move `amount` from `from` to `to` on behalf of `from`, consuming
    /// `spender`'s allowance.
    ///
    /// # Errors
    /// Fails if the allowance or the balance is below `amount`.
    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<()>;
}
