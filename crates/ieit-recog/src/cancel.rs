//! Cooperative cancellation for long sweeps

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{RecogError, RecogResult};

/// Shared interrupt flag
///
/// Clones observe the same flag. Sweeps check it at every outer iteration
/// (each delta, each class, each tile) and stop with
/// [`RecogError::Cancelled`] once it is set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Fail with [`RecogError::Cancelled`] if cancellation was requested
    pub fn check(&self, stage: &'static str, step: usize) -> RecogResult<()> {
        if self.is_cancelled() {
            Err(RecogError::Cancelled { stage, step })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(token.check("delta sweep", 0).is_ok());
        other.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(
            token.check("delta sweep", 3),
            Err(RecogError::Cancelled {
                stage: "delta sweep",
                step: 3
            })
        ));
    }
}
