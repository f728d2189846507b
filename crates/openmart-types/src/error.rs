//! Error types for the OpenMart marketplace core.
//!
//! All errors use the `MKT_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Configuration / registry errors
//! - 2xx: Listing errors
//! - 3xx: Purchase / settlement errors
//! - 4xx: Earnings / withdrawal errors
//! - 9xx: General / internal errors
//!
//! Every error aborts the whole operation with zero retained state mutation.
//! None are retryable as-is: the caller must change state (approve, fund,
//! list) and resubmit.

use thiserror::Error;

use crate::{AssetId, NftContractId, TokenId};

/// Central error enum for all OpenMart operations.
#[derive(Debug, Error)]
pub enum MarketError {
    // =================================================================
    // Configuration / Registry Errors (1xx)
    // =================================================================
    /// The marketplace was constructed with an empty supported-asset set.
    #[error("MKT_ERR_100: No supported payment assets provided")]
    NoSupportedAssetsProvided,

    /// The payment asset is not in the supported-asset registry.
    #[error("MKT_ERR_101: Payment asset not supported: {0}")]
    AssetNotSupported(AssetId),

    // =================================================================
    // Listing Errors (2xx)
    // =================================================================
    /// The caller does not own the token it tried to list or cancel.
    #[error("MKT_ERR_200: Caller is not the owner of {nft_contract}/{token_id}")]
    NotOwner {
        nft_contract: NftContractId,
        token_id: TokenId,
    },

    /// The caller already has an active listing for this token.
    #[error("MKT_ERR_201: Already listed: {nft_contract}/{token_id}")]
    AlreadyListed {
        nft_contract: NftContractId,
        token_id: TokenId,
    },

    /// No active listing exists for this token.
    #[error("MKT_ERR_202: Not listed: {nft_contract}/{token_id}")]
    NotListed {
        nft_contract: NftContractId,
        token_id: TokenId,
    },

    /// Listing price must be strictly positive (zero is the absent sentinel).
    #[error("MKT_ERR_203: Listing price must be greater than zero")]
    PriceBelowOrEqZero,

    /// The marketplace is not the approved spender for the token.
    #[error("MKT_ERR_204: Marketplace not approved to transfer {nft_contract}/{token_id}")]
    NftNotApprovedForSpending {
        nft_contract: NftContractId,
        token_id: TokenId,
    },

    // =================================================================
    // Purchase / Settlement Errors (3xx)
    // =================================================================
    /// The buyer's allowance toward the marketplace is below the price.
    #[error(
        "MKT_ERR_300: Allowance not met for {nft_contract}/{token_id}: need {price} of {asset}"
    )]
    AllowanceNotMet {
        nft_contract: NftContractId,
        token_id: TokenId,
        price: u128,
        asset: AssetId,
    },

    /// The buyer's balance is below the price.
    #[error("MKT_ERR_301: Price not met for {nft_contract}/{token_id}: need {price} of {asset}")]
    PriceNotMet {
        nft_contract: NftContractId,
        token_id: TokenId,
        price: u128,
        asset: AssetId,
    },

    /// A mutating operation was re-entered while a purchase was in flight.
    #[error("MKT_ERR_302: Reentrant call rejected")]
    ReentrantCall,

    /// An external asset capability refused or failed a transfer.
    #[error("MKT_ERR_303: Asset transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// The NFT contract has no such token.
    #[error("MKT_ERR_304: Unknown token: {nft_contract}/{token_id}")]
    UnknownToken {
        nft_contract: NftContractId,
        token_id: TokenId,
    },

    // =================================================================
    // Earnings / Withdrawal Errors (4xx)
    // =================================================================
    /// The beneficiary has no accrued earnings in this asset.
    #[error("MKT_ERR_400: No earnings to withdraw for asset {0}")]
    NoEarnings(AssetId),

    /// Platform earnings may only be withdrawn by the platform operator.
    #[error("MKT_ERR_401: Caller is not the platform operator")]
    NotPlatformOperator,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Fee computation or earnings accrual would overflow. Hard abort,
    /// never wrapped.
    #[error("MKT_ERR_900: Arithmetic overflow during settlement")]
    ArithmeticOverflow,

    /// Unrecoverable internal error (e.g. a failed compensation transfer).
    #[error("MKT_ERR_901: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = MarketError::NoSupportedAssetsProvided;
        let msg = format!("{err}");
        assert!(msg.starts_with("MKT_ERR_100"), "Got: {msg}");
    }

    #[test]
    fn allowance_not_met_carries_diagnostics() {
        let asset = AssetId([3u8; 32]);
        let err = MarketError::AllowanceNotMet {
            nft_contract: NftContractId([1u8; 32]),
            token_id: TokenId(7),
            price: 1234,
            asset,
        };
        let msg = format!("{err}");
        assert!(msg.contains("MKT_ERR_300"));
        assert!(msg.contains("#7"));
        assert!(msg.contains("1234"));
        assert!(msg.contains(&format!("{asset}")));
    }

    #[test]
    fn all_errors_have_mkt_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(MarketError::PriceBelowOrEqZero),
            Box::new(MarketError::ReentrantCall),
            Box::new(MarketError::NoEarnings(AssetId([0u8; 32]))),
            Box::new(MarketError::NotPlatformOperator),
            Box::new(MarketError::ArithmeticOverflow),
            Box::new(MarketError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("MKT_ERR_"),
                "Error missing MKT_ERR_ prefix: {msg}"
            );
        }
    }
}
