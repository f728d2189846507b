//! The marketplace engine.
//!
//! Orchestrates List, Cancel, Buy and the two withdrawals against the
//! listing book and the earnings ledger, calling out to the asset
//! capabilities for verification and transfers. Checks-effects-interactions
//! ordering is the primary defense around those call-outs; the reentrancy
//! flag backstops the purchase path.
//!
//! Every operation commits all of its writes or none of them. That holds
//! explicitly: every fallible computation (fee, ledger accrual) runs before
//! the first external call, and the one external call that can still fail
//! after internal state has moved — the NFT transfer at the end of a
//! purchase — is compensated by restoring the listing, reverting the ledger
//! credits, and refunding the buyer.

use openmart_assets::{FungibleAsset, NonFungibleAsset};
use openmart_types::{
    constants, AccountId, AssetId, EventRecord, Listing, ListingKey, MarketError, MarketEvent,
    MarketplaceConfig, NftContractId, Result, TokenId,
};

use crate::earnings::EarningsLedger;
use crate::events::EventLog;
use crate::listings::ListingBook;
use crate::reentrancy::ReentrancyGuard;
use crate::registry::SupportedAssets;

/// Platform fee for a sale. Sales at or below the exemption threshold are
/// fee-free; above it the basis-point rate applies with checked
/// multiplication.
fn platform_fee(price: u128, fee_bps: u8) -> Result<u128> {
    if price <= constants::FEE_EXEMPT_THRESHOLD {
        return Ok(0);
    }
    price
        .checked_mul(u128::from(fee_bps))
        .map(|scaled| scaled / constants::FEE_DENOMINATOR_BPS)
        .ok_or(MarketError::ArithmeticOverflow)
}

/// Escrow-based fixed-price marketplace.
///
/// Sole writer of the listing book and earnings ledger. Asset capabilities
/// are passed per operation; the engine never owns token or balance state.
#[derive(Debug)]
pub struct Marketplace {
    /// The marketplace's own identity: approved spender for listed tokens,
    /// recipient of pulled funds, and the reserved platform beneficiary.
    marketplace_id: AccountId,
    /// The only account allowed to withdraw platform earnings.
    operator: AccountId,
    fee_bps: u8,
    supported: SupportedAssets,
    listings: ListingBook,
    earnings: EarningsLedger,
    guard: ReentrancyGuard,
    events: EventLog,
}

impl Marketplace {
    /// Construct a marketplace from its one-time configuration.
    ///
    /// # Errors
    /// Returns [`MarketError::NoSupportedAssetsProvided`] if the config
    /// names no payment assets.
    pub fn new(
        config: &MarketplaceConfig,
        marketplace_id: AccountId,
        operator: AccountId,
    ) -> Result<Self> {
        config.validate()?;
        let supported = SupportedAssets::new(&config.supported_assets)?;
        Ok(Self {
            marketplace_id,
            operator,
            fee_bps: config.fee_bps,
            supported,
            listings: ListingBook::new(),
            earnings: EarningsLedger::new(),
            guard: ReentrancyGuard::new(),
            events: EventLog::new(marketplace_id),
        })
    }

    /// The marketplace's own account id (the reserved platform beneficiary).
    #[must_use]
    pub fn marketplace_id(&self) -> AccountId {
        self.marketplace_id
    }

    /// The platform operator.
    #[must_use]
    pub fn operator(&self) -> AccountId {
        self.operator
    }

    /// Configured fee rate in basis points.
    #[must_use]
    pub fn fee_bps(&self) -> u8 {
        self.fee_bps
    }

    // =====================================================================
    // List
    // =====================================================================

    /// List `nft_contract`/`token_id` at `price` in `payment_asset`.
    ///
    /// Non-custodial: the seller keeps the token and must keep the
    /// marketplace approved on it until sale or cancel.
    ///
    /// # Errors
    /// In precedence order: `AlreadyListed` (same-seller re-list only — a
    /// new owner may overwrite a stale listing), `NotOwner`,
    /// `AssetNotSupported`, `PriceBelowOrEqZero`,
    /// `NftNotApprovedForSpending`.
    pub fn list_item(
        &mut self,
        nft: &dyn NonFungibleAsset,
        caller: AccountId,
        nft_contract: NftContractId,
        token_id: TokenId,
        price: u128,
        payment_asset: AssetId,
    ) -> Result<()> {
        let key = ListingKey::new(nft_contract, token_id);

        // Only a re-list by the same seller is rejected here. A listing left
        // stale by an off-market ownership transfer can be overwritten by
        // the new owner.
        let existing = self.listings.get(key);
        if existing.is_active() && existing.seller == caller {
            return Err(MarketError::AlreadyListed {
                nft_contract,
                token_id,
            });
        }

        if nft.owner_of(token_id)? != caller {
            return Err(MarketError::NotOwner {
                nft_contract,
                token_id,
            });
        }

        self.supported.ensure_supported(payment_asset)?;

        if price == 0 {
            return Err(MarketError::PriceBelowOrEqZero);
        }

        if nft.approved_for(token_id)? != Some(self.marketplace_id) {
            return Err(MarketError::NftNotApprovedForSpending {
                nft_contract,
                token_id,
            });
        }

        self.listings.put(Listing {
            seller: caller,
            nft_contract,
            token_id,
            price,
            payment_asset,
        });
        self.emit(MarketEvent::ItemListed {
            seller: caller,
            nft_contract,
            token_id,
            price,
            payment_asset,
        });
        Ok(())
    }

    // =====================================================================
    // Cancel
    // =====================================================================

    /// Cancel the caller's active listing. No funds move — none were held.
    ///
    /// # Errors
    /// `NotOwner` if the caller does not own the token, `NotListed` if no
    /// active listing exists.
    pub fn cancel_listing(
        &mut self,
        nft: &dyn NonFungibleAsset,
        caller: AccountId,
        nft_contract: NftContractId,
        token_id: TokenId,
    ) -> Result<()> {
        if nft.owner_of(token_id)? != caller {
            return Err(MarketError::NotOwner {
                nft_contract,
                token_id,
            });
        }

        let key = ListingKey::new(nft_contract, token_id);
        let Some(listing) = self.listings.remove(key) else {
            return Err(MarketError::NotListed {
                nft_contract,
                token_id,
            });
        };

        // The canceling owner may differ from the recorded seller when the
        // token changed hands off-market; the event reports the listing
        // actually removed.
        self.emit(MarketEvent::ListingCanceled {
            seller: listing.seller,
            nft_contract,
            token_id,
        });
        Ok(())
    }

    // =====================================================================
    // Buy
    // =====================================================================

    /// Execute an atomic purchase of a listed item.
    ///
    /// Funds are pulled and ledger-credited before the token moves; if the
    /// final NFT transfer fails (stale approval, off-market ownership
    /// change), the whole purchase is unwound: listing restored, credits
    /// reverted, buyer refunded.
    ///
    /// # Errors
    /// `ReentrantCall`, `NotListed`, `AllowanceNotMet`, `PriceNotMet`,
    /// `ArithmeticOverflow` (fee or accrual), `TransferFailed` from either
    /// capability, or `Internal` if a compensating refund itself fails.
    pub fn buy_item(
        &mut self,
        nft: &mut dyn NonFungibleAsset,
        pay: &mut dyn FungibleAsset,
        buyer: AccountId,
        nft_contract: NftContractId,
        token_id: TokenId,
    ) -> Result<()> {
        let _span = self.guard.enter()?;

        let key = ListingKey::new(nft_contract, token_id);
        let listing = self.listings.get(key);
        if !listing.is_active() {
            return Err(MarketError::NotListed {
                nft_contract,
                token_id,
            });
        }
        let price = listing.price;
        let asset = listing.payment_asset;
        let seller = listing.seller;

        if pay.allowance(buyer, self.marketplace_id) < price {
            return Err(MarketError::AllowanceNotMet {
                nft_contract,
                token_id,
                price,
                asset,
            });
        }
        if pay.balance_of(buyer) < price {
            return Err(MarketError::PriceNotMet {
                nft_contract,
                token_id,
                price,
                asset,
            });
        }

        // All fallible arithmetic happens before the first external call:
        // an overflow aborts with zero state mutation.
        let fee = platform_fee(price, self.fee_bps)?;
        let seller_net = price - fee;
        let staged = self.earnings.stage_credits(&[
            (seller, asset, seller_net),
            (self.marketplace_id, asset, fee),
        ])?;

        // Pull the funds. If the capability refuses, nothing has mutated.
        pay.transfer_from(self.marketplace_id, buyer, self.marketplace_id, price)?;

        self.earnings.apply(&staged);
        self.listings.remove(key);

        // The marketplace acts as approved operator; the seller stays the
        // `from` party. A failure here unwinds the purchase.
        if let Err(transfer_err) =
            nft.safe_transfer_from(self.marketplace_id, seller, buyer, token_id)
        {
            tracing::warn!(
                %nft_contract,
                %token_id,
                %seller,
                %buyer,
                error = %transfer_err,
                "NFT transfer failed, unwinding purchase"
            );
            self.earnings.revert(&staged);
            self.listings.put(listing);
            pay.transfer(self.marketplace_id, buyer, price)
                .map_err(|refund_err| {
                    MarketError::Internal(format!(
                        "refund of {price} failed after NFT transfer failure: \
                         {refund_err} (original: {transfer_err})"
                    ))
                })?;
            return Err(transfer_err);
        }

        tracing::info!(
            %nft_contract,
            %token_id,
            %seller,
            %buyer,
            price,
            fee,
            %asset,
            "item sold"
        );
        // Direct field access: the reentrancy span still borrows the guard.
        let record = self.events.append(MarketEvent::ItemBought {
            buyer,
            nft_contract,
            token_id,
            price,
            payment_asset: asset,
        });
        tracing::debug!(sequence = record.sequence, kind = record.event.kind(), "event emitted");
        Ok(())
    }

    // =====================================================================
    // Withdrawals
    // =====================================================================

    /// Withdraw the caller's accrued earnings for one asset.
    ///
    /// The ledger entry is zeroed before the outbound transfer, so a
    /// re-entrant withdrawal reads zero and fails with `NoEarnings`.
    ///
    /// # Errors
    /// `AssetNotSupported`, `NoEarnings`, or the capability's transfer error
    /// (in which case the entry is restored).
    pub fn withdraw_earnings(
        &mut self,
        pay: &mut dyn FungibleAsset,
        caller: AccountId,
        asset: AssetId,
    ) -> Result<u128> {
        self.payout(pay, caller, caller, asset)
    }

    /// Withdraw the platform's accrued fees for one asset.
    ///
    /// # Errors
    /// `NotPlatformOperator` unless the caller is the operator; otherwise as
    /// [`Self::withdraw_earnings`] against the reserved platform
    /// beneficiary.
    pub fn withdraw_platform_earnings(
        &mut self,
        pay: &mut dyn FungibleAsset,
        caller: AccountId,
        asset: AssetId,
    ) -> Result<u128> {
        if caller != self.operator {
            return Err(MarketError::NotPlatformOperator);
        }
        self.payout(pay, self.marketplace_id, caller, asset)
    }

    /// Shared withdrawal body: drain `beneficiary`'s entry, pay `recipient`.
    fn payout(
        &mut self,
        pay: &mut dyn FungibleAsset,
        beneficiary: AccountId,
        recipient: AccountId,
        asset: AssetId,
    ) -> Result<u128> {
        self.supported.ensure_supported(asset)?;

        if self.earnings.balance(beneficiary, asset) == 0 {
            return Err(MarketError::NoEarnings(asset));
        }

        // Zero before transfer: a nested call observes no balance.
        let amount = self.earnings.take(beneficiary, asset);
        if let Err(err) = pay.transfer(self.marketplace_id, recipient, amount) {
            tracing::warn!(
                %beneficiary,
                %asset,
                amount,
                error = %err,
                "withdrawal transfer failed, restoring ledger entry"
            );
            self.earnings.restore(beneficiary, asset, amount);
            return Err(err);
        }

        tracing::info!(%beneficiary, %recipient, %asset, amount, "earnings withdrawn");
        self.emit(MarketEvent::EarningsWithdrawn {
            beneficiary,
            asset,
            amount,
        });
        Ok(amount)
    }

    // =====================================================================
    // Reads
    // =====================================================================

    /// The listing under a key, or the vacant sentinel if absent.
    #[must_use]
    pub fn get_listing(&self, nft_contract: NftContractId, token_id: TokenId) -> Listing {
        self.listings.get(ListingKey::new(nft_contract, token_id))
    }

    /// Accrued earnings for a (beneficiary, asset) pair.
    #[must_use]
    pub fn get_earnings(&self, beneficiary: AccountId, asset: AssetId) -> u128 {
        self.earnings.balance(beneficiary, asset)
    }

    /// Whether the asset is accepted as payment currency.
    #[must_use]
    pub fn is_supported_asset(&self, asset: AssetId) -> bool {
        self.supported.is_supported(asset)
    }

    /// The full event log, oldest first.
    #[must_use]
    pub fn events(&self) -> &[EventRecord] {
        self.events.all()
    }

    /// Events at or after `sequence` — the indexer catch-up cursor.
    #[must_use]
    pub fn events_since(&self, sequence: u64) -> &[EventRecord] {
        self.events.since(sequence)
    }

    fn emit(&mut self, event: MarketEvent) {
        let record = self.events.append(event);
        tracing::debug!(sequence = record.sequence, kind = event.kind(), "event emitted");
    }
}
