//! In-memory reference implementations of the asset capabilities.
//!
//! Test doubles for the engine's suites, faithful enough to exercise every
//! marketplace precondition: per-token approvals that clear on transfer, and
//! allowances that are consumed by `transfer_from`.

use std::collections::HashMap;

use openmart_types::{AccountId, MarketError, NftContractId, Result, TokenId};

use crate::{FungibleAsset, NonFungibleAsset};

/// An in-memory NFT contract.
#[derive(Debug)]
pub struct MemoryNft {
    /// Identity reported in diagnostics.
    contract_id: NftContractId,
    /// Token ownership.
    owners: HashMap<TokenId, AccountId>,
    /// Per-token approved spender. Cleared on every transfer.
    approvals: HashMap<TokenId, AccountId>,
}

impl MemoryNft {
    #[must_use]
    pub fn new(contract_id: NftContractId) -> Self {
        Self {
            contract_id,
            owners: HashMap::new(),
            approvals: HashMap::new(),
        }
    }

    #[must_use]
    pub fn contract_id(&self) -> NftContractId {
        self.contract_id
    }

    /// Mint a token directly to `owner`. Overwrites any existing owner.
    pub fn mint(&mut self, owner: AccountId, token_id: TokenId) {
        self.owners.insert(token_id, owner);
        self.approvals.remove(&token_id);
    }

    /// Set the approved spender for a token.
    ///
    /// # Errors
    /// Returns `UnknownToken` if the token was never minted.
    pub fn approve(&mut self, token_id: TokenId, spender: AccountId) -> Result<()> {
        if !self.owners.contains_key(&token_id) {
            return Err(self.unknown(token_id));
        }
        self.approvals.insert(token_id, spender);
        Ok(())
    }

    /// Clear the approval for a token, if any.
    pub fn revoke_approval(&mut self, token_id: TokenId) {
        self.approvals.remove(&token_id);
    }

    fn unknown(&self, token_id: TokenId) -> MarketError {
        MarketError::UnknownToken {
            nft_contract: self.contract_id,
            token_id,
        }
    }
}

impl NonFungibleAsset for MemoryNft {
    fn owner_of(&self, token_id: TokenId) -> Result<AccountId> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or_else(|| self.unknown(token_id))
    }

    fn approved_for(&self, token_id: TokenId) -> Result<Option<AccountId>> {
        if !self.owners.contains_key(&token_id) {
            return Err(self.unknown(token_id));
        }
        Ok(self.approvals.get(&token_id).copied())
    }

    fn safe_transfer_from(
        &mut self,
        operator: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    ) -> Result<()> {
        let owner = self.owner_of(token_id)?;
        if owner != from {
            return Err(MarketError::TransferFailed {
                reason: format!("{from} is not the owner of {}/{token_id}", self.contract_id),
            });
        }
        let approved = self.approvals.get(&token_id).copied();
        if operator != owner && approved != Some(operator) {
            return Err(MarketError::TransferFailed {
                reason: format!(
                    "{operator} is neither owner nor approved for {}/{token_id}",
                    self.contract_id
                ),
            });
        }
        self.owners.insert(token_id, to);
        self.approvals.remove(&token_id);
        Ok(())
    }
}

/// An in-memory fungible token contract.
#[derive(Debug, Default)]
pub struct MemoryToken {
    balances: HashMap<AccountId, u128>,
    /// (owner, spender) -> remaining allowance.
    allowances: HashMap<(AccountId, AccountId), u128>,
}

impl MemoryToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` to `owner`. Saturates at `u128::MAX` so tests can set
    /// up boundary balances.
    pub fn mint(&mut self, owner: AccountId, amount: u128) {
        let balance = self.balances.entry(owner).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Set the allowance `spender` may pull from `owner`.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: u128) {
        self.allowances.insert((owner, spender), amount);
    }

    fn debit(&mut self, from: AccountId, amount: u128) -> Result<()> {
        let balance = self.balances.entry(from).or_insert(0);
        let current = *balance;
        let updated = current
            .checked_sub(amount)
            .ok_or_else(|| MarketError::TransferFailed {
                reason: format!("insufficient balance: {from} has {current}, needs {amount}"),
            })?;
        *balance = updated;
        Ok(())
    }

    fn credit(&mut self, to: AccountId, amount: u128) -> Result<()> {
        let balance = self.balances.entry(to).or_insert(0);
        let updated = balance
            .checked_add(amount)
            .ok_or_else(|| MarketError::TransferFailed {
                reason: format!("balance overflow crediting {to}"),
            })?;
        *balance = updated;
        Ok(())
    }
}

impl FungibleAsset for MemoryToken {
    fn balance_of(&self, owner: AccountId) -> u128 {
        self.balances.get(&owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> u128 {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: AccountId, to: AccountId, amount: u128) -> Result<()> {
        self.debit(from, amount)?;
        self.credit(to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        amount: u128,
    ) -> Result<()> {
        let allowance = self.allowance(from, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or_else(|| MarketError::TransferFailed {
                reason: format!("allowance exceeded: {spender} may pull {allowance} from {from}"),
            })?;
        self.debit(from, amount)?;
        self.credit(to, amount)?;
        self.allowances.insert((from, spender), remaining);
        Ok(())
    }
}
