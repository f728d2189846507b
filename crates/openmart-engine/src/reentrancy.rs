//! Reentrancy guard — an explicit "operation in progress" flag.
//!
//! External asset capabilities are foreign code that may call back into the
//! marketplace. The purchase path holds this flag for its whole body; the
//! RAII span clears it on every exit path, error returns included.
//! Withdrawals do not take the flag — they rely on take-before-transfer
//! ordering instead (see the earnings ledger).

use std::cell::Cell;

use openmart_types::{MarketError, Result};

/// Instance-scoped reentrancy flag.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    entered: Cell<bool>,
}

impl ReentrancyGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the flag for the duration of the returned span.
    ///
    /// # Errors
    /// Returns [`MarketError::ReentrantCall`] if the flag is already held.
    pub fn enter(&self) -> Result<ReentrancySpan<'_>> {
        if self.entered.replace(true) {
            return Err(MarketError::ReentrantCall);
        }
        Ok(ReentrancySpan { flag: &self.entered })
    }

    /// Whether an operation currently holds the flag.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered.get()
    }
}

/// Clears the flag when dropped.
#[derive(Debug)]
pub struct ReentrancySpan<'a> {
    flag: &'a Cell<bool>,
}

impl Drop for ReentrancySpan<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_sets_and_drop_clears() {
        let guard = ReentrancyGuard::new();
        assert!(!guard.is_entered());
        {
            let _span = guard.enter().unwrap();
            assert!(guard.is_entered());
        }
        assert!(!guard.is_entered());
    }

    #[test]
    fn nested_enter_rejected() {
        let guard = ReentrancyGuard::new();
        let _span = guard.enter().unwrap();
        let err = guard.enter().unwrap_err();
        assert!(matches!(err, MarketError::ReentrantCall));
    }

    #[test]
    fn reusable_after_release() {
        let guard = ReentrancyGuard::new();
        drop(guard.enter().unwrap());
        assert!(guard.enter().is_ok());
    }
}
