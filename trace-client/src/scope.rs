//! View lifetime guard
//!
//! Requests are never cancelled explicitly. A view that goes away while a
//! call is in flight drops the late result instead of applying it to stale
//! state ([`ViewScope::deliver`]). Tearing down a whole view drops its work,
//! which releases whatever that work holds ([`ViewScope::until_disposed`]).

use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Lifetime of one view. Disposed explicitly or when dropped.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that can dispose this scope from elsewhere (e.g. a
    /// navigation handler)
    pub fn handle(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn dispose(&self) {
        self.token.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Await `fut` to completion and hand back its output only if the scope
    /// is still alive
    pub async fn deliver<F: Future>(&self, fut: F) -> Option<F::Output> {
        let output = fut.await;
        if self.is_disposed() {
            tracing::debug!("Dropping result that arrived after the view was disposed");
            return None;
        }
        Some(output)
    }

    /// Run `fut` until it finishes or the scope is disposed, whichever comes
    /// first. On disposal `fut` is dropped, so resources it owns (a camera,
    /// an open connection) are freed right away.
    pub async fn until_disposed<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!("View disposed, dropping unfinished work");
                None
            }
            output = fut => Some(output),
        }
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
