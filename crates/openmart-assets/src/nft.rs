//! The non-fungible asset capability.

use openmart_types::{AccountId, Result, TokenId};

/// Read/transfer interface of an NFT contract, as consumed by the engine.
///
/// The engine treats every call as a suspension point that might call back
/// into the marketplace: implementations are foreign code. All marketplace
/// bookkeeping that must not be observed half-done happens before these
/// calls, or is compensated if they fail.
pub trait NonFungibleAsset {
    /// Current owner of the token.
    ///
    /// # Errors
    /// Returns [`openmart_types::MarketError::UnknownToken`] if the token
    /// does not exist.
    fn owner_of(&self, token_id: TokenId) -> Result<AccountId>;

    /// The account approved to transfer this token, if any.
    ///
    /// # Errors
    /// Returns [`openmart_types::MarketError::UnknownToken`] if the token
    /// does not exist.
    fn approved_for(&self, token_id: TokenId) -> Result<Option<AccountId>>;

    /// Transfer `token_id` from `from` to `to`, with `operator` acting on
    /// the owner's behalf.
    ///
    /// # Errors
    /// Fails if `from` is not the current owner, or if `operator` is neither
    /// the owner nor the approved spender.
    fn safe_transfer_from(
        &mut self,
        operator: AccountId,
        from: AccountId,
        to: AccountId,
        token_id: TokenId,
    ) -> Result<()>;
}
