//! Error types for the selector, the dropdown, and option loading.
//!
//! Fetch failures are not errors at this level: they become
//! [`SelectionState::Error`](crate::selector::SelectionState::Error) and are
//! shown inline. The variants here report actions the current state does not
//! allow.

use refsel_types::{Ref, RefType};
use thiserror::Error;

/// Errors returned by [`RefSelector`](crate::selector::RefSelector) actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The action is not available in the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Tag mode was requested but the toggle is disabled.
    #[error("tags are disabled for this selector")]
    TagsDisabled,

    /// Commit browsing was requested but is disabled.
    #[error("commit browsing is disabled for this selector")]
    CommitsDisabled,

    /// Only branches and tags can be listed.
    #[error("{0} refs cannot be listed")]
    NotListable(RefType),

    /// Commit browsing is only offered for branches.
    #[error("commit browsing is only available for branches, not {0}s")]
    DrilldownRequiresBranch(RefType),

    /// The ref is not one of the entries currently shown.
    #[error("{0} is not among the listed entries")]
    UnknownChoice(Ref),

    /// The ref is the current selection and is not offered again.
    #[error("{0} is already selected")]
    AlreadySelected(Ref),

    /// No repository id is available yet.
    #[error("repository is not ready")]
    RepositoryNotReady,

    /// A ref was already chosen; the session accepts no more actions.
    #[error("selection session already finished")]
    SessionFinished,
}

/// Convenience type alias for selector actions.
pub type SelectorResult<T> = std::result::Result<T, SelectorError>;

/// Errors returned by [`RefDropdown`](crate::dropdown::RefDropdown).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DropdownError {
    /// The action needs an open dropdown.
    #[error("dropdown is closed")]
    Closed,

    /// Cancel needs both a current selection and a cancel callback.
    #[error("cancel is not available")]
    CancelUnavailable,

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Convenience type alias for dropdown actions.
pub type DropdownResult<T> = std::result::Result<T, DropdownError>;

/// Errors raised while loading [`SelectorOptions`](crate::config::SelectorOptions).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
