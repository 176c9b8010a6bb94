//! Provider capabilities consumed by the selector.
//!
//! Branch and tag listing share one shape, so both are a
//! [`RefListProvider`]; the selector picks the implementation by mode through
//! [`Providers::refs_for`].

use std::sync::Arc;

use async_trait::async_trait;
use refsel_types::{Commit, Pagination, RefType, ResultPage};

use crate::error::ProviderResult;
use crate::memory::{BranchLister, InMemoryRepositoryStore, TagLister};

/// Lists one kind of named ref, one cursor page at a time.
///
/// Implementations return refs whose names start with
/// `query.prefix_filter`, strictly after `query.after_cursor`, at most
/// `query.page_size` of them, in a stable order.
#[async_trait]
pub trait RefListProvider: Send + Sync {
    async fn list_refs(&self, repository: &str, query: &Pagination) -> ProviderResult<ResultPage>;
}

/// Lists the ancestry of a branch.
#[async_trait]
pub trait CommitProvider: Send + Sync {
    /// Commits reachable from the head of `branch`, newest first.
    async fn list_commits(&self, repository: &str, branch: &str) -> ProviderResult<Vec<Commit>>;
}

/// The provider set a selector session fetches from.
#[derive(Clone)]
pub struct Providers {
    pub branches: Arc<dyn RefListProvider>,
    pub tags: Arc<dyn RefListProvider>,
    pub commits: Arc<dyn CommitProvider>,
}

impl Providers {
    pub fn new(
        branches: Arc<dyn RefListProvider>,
        tags: Arc<dyn RefListProvider>,
        commits: Arc<dyn CommitProvider>,
    ) -> Self {
        Self {
            branches,
            tags,
            commits,
        }
    }

    /// Wire all three capabilities to one in-memory store.
    pub fn in_memory(store: Arc<InMemoryRepositoryStore>) -> Self {
        Self {
            branches: Arc::new(BranchLister::new(store.clone())),
            tags: Arc::new(TagLister::new(store.clone())),
            commits: store,
        }
    }

    /// Tag mode lists tags; every other mode lists branches.
    pub fn refs_for(&self, ref_type: RefType) -> &dyn RefListProvider {
        match ref_type {
            RefType::Tag => self.tags.as_ref(),
            RefType::Branch | RefType::Commit => self.branches.as_ref(),
        }
    }
}

impl std::fmt::Debug for Providers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Providers").finish_non_exhaustive()
    }
}
