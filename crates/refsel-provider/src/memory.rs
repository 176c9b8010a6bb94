//! In-memory repository store for tests, fixtures, and the CLI.
//!
//! [`InMemoryRepositoryStore`] keeps every repository in a `HashMap` behind a
//! `RwLock`. It implements [`CommitProvider`] itself; [`BranchLister`] and
//! [`TagLister`] are the two [`RefListProvider`] views over it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use async_trait::async_trait;
use refsel_types::{Commit, Pagination, RefRecord, RefType, ResultPage};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::traits::{CommitProvider, RefListProvider};

#[derive(Debug, Default)]
struct RepositoryData {
    default_branch: String,
    branches: BTreeMap<String, String>,
    tags: BTreeMap<String, String>,
    commits: HashMap<String, Commit>,
}

impl RepositoryData {
    fn names(&self, ref_type: RefType) -> &BTreeMap<String, String> {
        match ref_type {
            RefType::Tag => &self.tags,
            RefType::Branch | RefType::Commit => &self.branches,
        }
    }
}

/// An in-memory set of repositories.
///
/// Data is lost when the store is dropped. An optional latency is applied to
/// every provider call, which makes overlapping fetches observable.
#[derive(Debug, Default)]
pub struct InMemoryRepositoryStore {
    repos: RwLock<HashMap<String, RepositoryData>>,
    latency: Duration,
}

impl InMemoryRepositoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every provider call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn read(&self) -> ProviderResult<RwLockReadGuard<'_, HashMap<String, RepositoryData>>> {
        self.repos
            .read()
            .map_err(|e| ProviderError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> ProviderResult<RwLockWriteGuard<'_, HashMap<String, RepositoryData>>> {
        self.repos
            .write()
            .map_err(|e| ProviderError::Unavailable(format!("lock poisoned: {e}")))
    }

    /// Register an empty repository. Replaces any existing one with this id.
    pub fn insert_repository(&self, id: &str, default_branch: &str) -> ProviderResult<()> {
        let mut repos = self.write()?;
        repos.insert(
            id.to_string(),
            RepositoryData {
                default_branch: default_branch.to_string(),
                ..Default::default()
            },
        );
        Ok(())
    }

    /// The default branch of a repository, if the repository exists.
    pub fn default_branch(&self, id: &str) -> ProviderResult<Option<String>> {
        let repos = self.read()?;
        Ok(repos.get(id).map(|r| r.default_branch.clone()))
    }

    pub fn add_commit(&self, repository: &str, commit: Commit) -> ProviderResult<()> {
        let mut repos = self.write()?;
        let repo = repos
            .get_mut(repository)
            .ok_or_else(|| ProviderError::RepositoryNotFound(repository.to_string()))?;
        repo.commits.insert(commit.id.clone(), commit);
        Ok(())
    }

    /// Point a branch at a commit, creating the branch if needed.
    pub fn set_branch(&self, repository: &str, name: &str, commit_id: &str) -> ProviderResult<()> {
        self.set_named(repository, RefType::Branch, name, commit_id)
    }

    /// Point a tag at a commit.
    pub fn set_tag(&self, repository: &str, name: &str, commit_id: &str) -> ProviderResult<()> {
        self.set_named(repository, RefType::Tag, name, commit_id)
    }

    fn set_named(
        &self,
        repository: &str,
        ref_type: RefType,
        name: &str,
        commit_id: &str,
    ) -> ProviderResult<()> {
        let mut repos = self.write()?;
        let repo = repos
            .get_mut(repository)
            .ok_or_else(|| ProviderError::RepositoryNotFound(repository.to_string()))?;
        if !repo.commits.contains_key(commit_id) {
            return Err(ProviderError::RefNotFound(commit_id.to_string()));
        }
        let names = match ref_type {
            RefType::Tag => &mut repo.tags,
            RefType::Branch | RefType::Commit => &mut repo.branches,
        };
        names.insert(name.to_string(), commit_id.to_string());
        Ok(())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// One page of branch or tag names.
    ///
    /// Names are ordered lexicographically, so the last name of a page is a
    /// valid `after` cursor for the next one.
    fn page(&self, repository: &str, ref_type: RefType, query: &Pagination) -> ProviderResult<ResultPage> {
        let repos = self.read()?;
        let repo = repos
            .get(repository)
            .ok_or_else(|| ProviderError::RepositoryNotFound(repository.to_string()))?;

        let mut matching = repo
            .names(ref_type)
            .iter()
            .filter(|(name, _)| name.starts_with(&query.prefix_filter))
            .filter(|(name, _)| query.after_cursor.is_empty() || name.as_str() > query.after_cursor.as_str());

        let items: Vec<RefRecord> = matching
            .by_ref()
            .take(query.page_size)
            .map(|(name, commit)| RefRecord::new(name.clone()).with_commit(commit.clone()))
            .collect();
        let has_more = matching.next().is_some();

        debug!(
            repository,
            %ref_type,
            prefix = %query.prefix_filter,
            after = %query.after_cursor,
            returned = items.len(),
            has_more,
            "listed refs"
        );
        Ok(ResultPage::new(items, has_more))
    }

    fn ancestry(&self, repository: &str, branch: &str) -> ProviderResult<Vec<Commit>> {
        let repos = self.read()?;
        let repo = repos
            .get(repository)
            .ok_or_else(|| ProviderError::RepositoryNotFound(repository.to_string()))?;
        let head = repo
            .branches
            .get(branch)
            .ok_or_else(|| ProviderError::RefNotFound(branch.to_string()))?;

        let mut commits = Vec::new();
        let mut seen = HashSet::new();
        let mut next = Some(head.as_str());
        while let Some(id) = next {
            if !seen.insert(id) {
                break;
            }
            // A missing parent ends the history.
            let Some(commit) = repo.commits.get(id) else {
                break;
            };
            commits.push(commit.clone());
            next = commit.first_parent();
        }
        Ok(commits)
    }
}

#[async_trait]
impl CommitProvider for InMemoryRepositoryStore {
    async fn list_commits(&self, repository: &str, branch: &str) -> ProviderResult<Vec<Commit>> {
        self.simulate_latency().await;
        self.ancestry(repository, branch)
    }
}

/// Lists the branches of an [`InMemoryRepositoryStore`].
#[derive(Clone, Debug)]
pub struct BranchLister {
    store: Arc<InMemoryRepositoryStore>,
}

impl BranchLister {
    pub fn new(store: Arc<InMemoryRepositoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RefListProvider for BranchLister {
    async fn list_refs(&self, repository: &str, query: &Pagination) -> ProviderResult<ResultPage> {
        self.store.simulate_latency().await;
        self.store.page(repository, RefType::Branch, query)
    }
}

/// Lists the tags of an [`InMemoryRepositoryStore`].
#[derive(Clone, Debug)]
pub struct TagLister {
    store: Arc<InMemoryRepositoryStore>,
}

impl TagLister {
    pub fn new(store: Arc<InMemoryRepositoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RefListProvider for TagLister {
    async fn list_refs(&self, repository: &str, query: &Pagination) -> ProviderResult<ResultPage> {
        self.store.simulate_latency().await;
        self.store.page(repository, RefType::Tag, query)
    }
}
