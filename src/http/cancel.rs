//! Cancellation scopes tied to a view's lifetime.
//!
//! A view owns a [`CancelScope`] and hands [`CancelToken`]s to whatever issues
//! requests on its behalf. Cancelling or dropping the scope resolves every
//! pending [`CancelToken::run`] with [`Cancelled`], so late responses are never
//! applied to a view that is gone.

use std::future::{Future, pending};

use thiserror::Error;
use tokio::sync::watch;

/// The scope owning a request was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request cancelled")]
pub struct Cancelled;

/// Owner side of a cancellation channel.
#[derive(Debug)]
pub struct CancelScope {
    sender: watch::Sender<bool>,
}

impl CancelScope {
    /// Create a live scope.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);

        Self { sender }
    }

    /// Issue a token observing this scope.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        CancelToken {
            receiver: Some(self.sender.subscribe()),
        }
    }

    /// Cancel every token issued by this scope.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Whether [`CancelScope::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}

impl Default for CancelScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancelScope {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Observer side of a cancellation channel.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: Option<watch::Receiver<bool>>,
}

impl CancelToken {
    /// A token that is never cancelled.
    #[must_use]
    pub fn never() -> Self {
        Self { receiver: None }
    }

    /// Whether the owning scope has been cancelled or dropped.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.receiver
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow() || receiver.has_changed().is_err())
    }

    /// Resolve once the owning scope is cancelled or dropped.
    pub async fn cancelled(&self) {
        let Some(receiver) = &self.receiver else {
            return pending().await;
        };

        let mut receiver = receiver.clone();
        let _closed_or_cancelled = receiver.wait_for(|cancelled| *cancelled).await;
    }

    /// Drive `future` to completion unless the scope is cancelled first.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] when the scope is cancelled before the future
    /// completes; the future's output is dropped.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Cancelled> {
        if self.is_cancelled() {
            return Err(Cancelled);
        }

        tokio::select! {
            biased;

            () = self.cancelled() => Err(Cancelled),
            output = future => Ok(output),
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::never()
    }
}
