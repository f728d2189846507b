//! Supported-asset registry.
//!
//! Built once at construction and never mutated afterward — there is no
//! onboarding surface. Duplicate identifiers in the input are idempotent.

use std::collections::HashSet;

use openmart_types::{AssetId, MarketError, Result};

/// Immutable membership set of fungible assets eligible as payment currency.
#[derive(Debug, Clone)]
pub struct SupportedAssets {
    assets: HashSet<AssetId>,
}

impl SupportedAssets {
    /// Build the registry from a non-empty list of asset identifiers.
    ///
    /// # Errors
    /// Returns [`MarketError::NoSupportedAssetsProvided`] if `assets` is
    /// empty.
    pub fn new(assets: &[AssetId]) -> Result<Self> {
        if assets.is_empty() {
            return Err(MarketError::NoSupportedAssetsProvided);
        }
        Ok(Self {
            assets: assets.iter().copied().collect(),
        })
    }

    /// Pure membership test.
    #[must_use]
    pub fn is_supported(&self, asset: AssetId) -> bool {
        self.assets.contains(&asset)
    }

    /// Precondition gate used by listing and both withdrawal operations.
    ///
    /// # Errors
    /// Returns [`MarketError::AssetNotSupported`] for non-members.
    pub fn ensure_supported(&self, asset: AssetId) -> Result<()> {
        if self.is_supported(asset) {
            Ok(())
        } else {
            Err(MarketError::AssetNotSupported(asset))
        }
    }

    /// Number of distinct supported assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_rejected() {
        let err = SupportedAssets::new(&[]).unwrap_err();
        assert!(matches!(err, MarketError::NoSupportedAssetsProvided));
    }

    #[test]
    fn membership() {
        let usd = AssetId::random();
        let eur = AssetId::random();
        let other = AssetId::random();
        let registry = SupportedAssets::new(&[usd, eur]).unwrap();

        assert!(registry.is_supported(usd));
        assert!(registry.is_supported(eur));
        assert!(!registry.is_supported(other));

        assert!(registry.ensure_supported(usd).is_ok());
        let err = registry.ensure_supported(other).unwrap_err();
        assert!(matches!(err, MarketError::AssetNotSupported(a) if a == other));
    }

    #[test]
    fn duplicates_are_idempotent() {
        let usd = AssetId::random();
        let registry = SupportedAssets::new(&[usd, usd, usd]).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.is_supported(usd));
    }
}
