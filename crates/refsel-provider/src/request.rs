//! Fetch requests and their outcomes.
//!
//! Every request carries the sequence number the selector assigned when it
//! issued it. The outcome echoes that number back so a response that no
//! longer matches the latest request can be recognized and dropped.

use refsel_types::{Commit, Pagination, RefType, ResultPage};

use crate::error::ProviderResult;

/// A fetch the selector wants performed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchRequest {
    /// One page of branches or tags.
    Refs {
        seq: u64,
        repository: String,
        ref_type: RefType,
        query: Pagination,
    },
    /// The commit history of a branch.
    Commits {
        seq: u64,
        repository: String,
        branch: String,
    },
}

impl FetchRequest {
    pub fn seq(&self) -> u64 {
        match self {
            FetchRequest::Refs { seq, .. } | FetchRequest::Commits { seq, .. } => *seq,
        }
    }
}

/// The completed result of a [`FetchRequest`].
#[derive(Debug)]
pub enum FetchOutcome {
    Refs {
        seq: u64,
        ref_type: RefType,
        result: ProviderResult<ResultPage>,
    },
    Commits {
        seq: u64,
        branch: String,
        result: ProviderResult<Vec<Commit>>,
    },
}

impl FetchOutcome {
    pub fn seq(&self) -> u64 {
        match self {
            FetchOutcome::Refs { seq, .. } | FetchOutcome::Commits { seq, .. } => *seq,
        }
    }

    /// Whether this is the outcome of `request`: same sequence number, same
    /// kind, and the same ref type or branch.
    pub fn answers(&self, request: &FetchRequest) -> bool {
        match (self, request) {
            (
                FetchOutcome::Refs { seq, ref_type, .. },
                FetchRequest::Refs {
                    seq: requested,
                    ref_type: requested_type,
                    ..
                },
            ) => seq == requested && ref_type == requested_type,
            (
                FetchOutcome::Commits { seq, branch, .. },
                FetchRequest::Commits {
                    seq: requested,
                    branch: requested_branch,
                    ..
                },
            ) => seq == requested && branch == requested_branch,
            _ => false,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            FetchOutcome::Refs { result, .. } => result.is_ok(),
            FetchOutcome::Commits { result, .. } => result.is_ok(),
        }
    }
}
