use std::{future::Future, time::Duration};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::LookupError;

/// Caller-owned cancellation scope for a lookup.
///
/// Carries a cancellation token and an optional deadline. Lookups race their
/// network future against both; whichever fires first wins.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self { cancel, deadline: None }
    }

    /// Child context sharing this cancellation token, bounded by `deadline`.
    /// An earlier existing deadline is kept.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current <= deadline => current,
            _ => deadline,
        };
        Self { cancel: self.cancel.clone(), deadline: Some(deadline) }
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Error the context is already in, if any.
    pub fn err(&self) -> Option<LookupError> {
        if self.cancel.is_cancelled() {
            return Some(LookupError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(LookupError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Drive `fut` unless the context fires first. A context that has already
    /// fired never polls `fut`.
    pub async fn run<T, F>(&self, fut: F) -> Result<T, LookupError>
    where
        F: Future<Output = Result<T, LookupError>>,
    {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(LookupError::Cancelled),
            () = expired => Err(LookupError::DeadlineExceeded),
            res = fut => res,
        }
    }
}
