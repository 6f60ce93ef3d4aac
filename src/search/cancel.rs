//! Cooperative cancellation for long-running searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable flag that asks a running search to stop.
///
/// Searches poll the token between attempts and return the best split found
/// so far instead of failing. Clone it into a Ctrl-C handler or a watchdog
/// thread to interrupt a search from outside.
///
/// # Examples
///
/// ```
/// use u_seating::search::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// assert!(!token.is_cancelled());
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Test rng that cancels `token` on every draw, so a search stops at the
/// first shuffle after an attempt.
#[cfg(test)]
pub(crate) struct CancelOnDraw<R> {
    inner: R,
    token: CancelToken,
}

#[cfg(test)]
impl<R: rand::RngCore> CancelOnDraw<R> {
    pub(crate) fn new(inner: R, token: CancelToken) -> Self {
        Self { inner, token }
    }
}

#[cfg(test)]
impl<R: rand::RngCore> rand::RngCore for CancelOnDraw<R> {
    fn next_u32(&mut self) -> u32 {
        self.token.cancel();
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.token.cancel();
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        self.token.cancel();
        self.inner.fill_bytes(dst);
    }
}
