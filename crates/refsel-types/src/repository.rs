use serde::{Deserialize, Serialize};

/// Repository metadata supplied by the caller. Read-only to the selector.
///
/// An absent `id` means the repository is not known yet. Fetches are
/// suppressed until one is set; that is not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryContext {
    pub id: Option<String>,
    pub default_branch: String,
}

impl RepositoryContext {
    pub fn new(id: impl Into<String>, default_branch: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            default_branch: default_branch.into(),
        }
    }

    /// A context whose repository id has not been resolved yet.
    pub fn pending(default_branch: impl Into<String>) -> Self {
        Self {
            id: None,
            default_branch: default_branch.into(),
        }
    }

    /// The repository id, treating an empty string as absent.
    pub fn ready_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
