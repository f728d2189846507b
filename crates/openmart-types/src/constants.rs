//! System-wide constants for the OpenMart marketplace core.

/// Denominator for basis-point fee rates (parts per 10,000).
pub const FEE_DENOMINATOR_BPS: u128 = 10_000;

/// Sales at or below this price are fee-exempt.
pub const FEE_EXEMPT_THRESHOLD: u128 = 100_000_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenMart";
