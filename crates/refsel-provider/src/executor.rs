//! Runs fetch requests against a [`Providers`] set.
//!
//! [`execute`] performs one request and waits for it. [`FetchExecutor`]
//! spawns each request as its own task and funnels the outcomes into a
//! channel, so a UI loop can keep handling input while fetches are in flight.
//! Requests are never cancelled; stale outcomes are filtered by the selector.

use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::request::{FetchOutcome, FetchRequest};
use crate::traits::Providers;

async fn with_timeout<T>(
    timeout: Duration,
    call: impl Future<Output = ProviderResult<T>>,
) -> ProviderResult<T> {
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::TimedOut(timeout)),
    }
}

/// Perform one request and return its outcome.
pub async fn execute(providers: &Providers, request: FetchRequest, timeout: Duration) -> FetchOutcome {
    let outcome = match request {
        FetchRequest::Refs {
            seq,
            repository,
            ref_type,
            query,
        } => {
            debug!(seq, %ref_type, repository = %repository, "fetching refs");
            let provider = providers.refs_for(ref_type);
            let result = with_timeout(timeout, provider.list_refs(&repository, &query)).await;
            FetchOutcome::Refs {
                seq,
                ref_type,
                result,
            }
        }
        FetchRequest::Commits {
            seq,
            repository,
            branch,
        } => {
            debug!(seq, branch = %branch, repository = %repository, "fetching commits");
            let result =
                with_timeout(timeout, providers.commits.list_commits(&repository, &branch)).await;
            FetchOutcome::Commits {
                seq,
                branch,
                result,
            }
        }
    };

    if !outcome.is_ok() {
        warn!(seq = outcome.seq(), "fetch failed");
    }
    outcome
}

/// Spawns fetches and collects their outcomes in completion order.
pub struct FetchExecutor {
    providers: Providers,
    timeout: Duration,
    tx: mpsc::UnboundedSender<FetchOutcome>,
    rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl FetchExecutor {
    pub fn new(providers: Providers, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            providers,
            timeout,
            tx,
            rx,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a request in the background. Must be called from within a tokio
    /// runtime.
    pub fn spawn(&self, request: FetchRequest) {
        let providers = self.providers.clone();
        let timeout = self.timeout;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = execute(&providers, request, timeout).await;
            // The receiver lives as long as the executor; a send error means
            // the executor was dropped and nobody wants the result.
            let _ = tx.send(outcome);
        });
    }

    /// Wait for the next completed request.
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome> {
        self.rx.recv().await
    }
}
