//! Configuration for a marketplace instance.

use serde::{Deserialize, Serialize};

use crate::{AssetId, MarketError, Result};

/// Construction-time configuration. Set once; the supported-asset set is
/// immutable for the life of the marketplace (no onboarding surface exists).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// Fungible assets accepted as payment currency. Duplicates are
    /// idempotent; the list must be non-empty.
    pub supported_assets: Vec<AssetId>,
    /// Platform fee in basis points. The 8-bit width caps the rate at 2.55%.
    pub fee_bps: u8,
}

impl MarketplaceConfig {
    #[must_use]
    pub fn new(supported_assets: Vec<AssetId>, fee_bps: u8) -> Self {
        Self {
            supported_assets,
            fee_bps,
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`MarketError::NoSupportedAssetsProvided`] if the asset list
    /// is empty.
    pub fn validate(&self) -> Result<()> {
        if self.supported_assets.is_empty() {
            return Err(MarketError::NoSupportedAssetsProvided);
        }
        Ok(())
    }
}
