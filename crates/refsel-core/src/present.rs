//! Display adapters: turn selector state into rows a renderer can draw.
//!
//! Nothing here decides transitions. Every row carries the [`Ref`] that
//! choosing it would emit, so a renderer only has to hand that ref back to
//! [`RefDropdown::choose`](crate::dropdown::RefDropdown::choose).

use std::borrow::Cow;

use refsel_types::{Commit, Ref, RefRecord, RefType, RepositoryContext};

use crate::paginator::PaginatorControls;

/// Shown instead of an empty commit message (the root commit has none).
pub const EPOCH_MESSAGE: &str = "repository epoch";
/// Messages longer than this many characters are truncated.
pub const MAX_MESSAGE_CHARS: usize = 60;
/// Characters kept from a truncated message.
pub const TRUNCATED_MESSAGE_CHARS: usize = 40;
pub const ELLIPSIS: &str = "...";
/// Length of an abbreviated commit id.
pub const SHORT_ID_CHARS: usize = 12;
pub const NO_REFS_TEXT: &str = "No references found";

/// Display text for a commit message.
///
/// Lengths count characters, not bytes.
pub fn commit_message(message: &str) -> Cow<'_, str> {
    if message.is_empty() {
        return Cow::Borrowed(EPOCH_MESSAGE);
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        let kept: String = message.chars().take(TRUNCATED_MESSAGE_CHARS).collect();
        return Cow::Owned(kept + ELLIPSIS);
    }
    Cow::Borrowed(message)
}

/// The first [`SHORT_ID_CHARS`] characters of a commit id.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_CHARS) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

/// How a ref is named in a label: commits abbreviated, everything else verbatim.
pub fn ref_label(reference: &Ref) -> &str {
    match reference.ref_type() {
        RefType::Commit => short_id(reference.id()),
        RefType::Branch | RefType::Tag => reference.id(),
    }
}

pub fn workspace_text(branch: &str) -> String {
    format!("{branch}'s Workspace (uncommitted changes)")
}

pub fn filter_placeholder(ref_type: RefType) -> &'static str {
    match ref_type {
        RefType::Tag => "Filter tags",
        RefType::Branch | RefType::Commit => "Filter branches",
    }
}

/// One entry of a branch or tag listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefRow {
    pub target: Ref,
    /// The caller's current selection; drawn emphasized and not choosable.
    pub is_selected: bool,
    /// The repository's default branch.
    pub is_default: bool,
    /// Whether the row offers commit browsing.
    pub can_drill: bool,
    /// Abbreviated id of the commit the ref points at, if known.
    pub commit: Option<String>,
}

/// One entry of a commit drill-down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitRow {
    pub target: Ref,
    pub text: String,
    /// Abbreviated commit id; `None` for the workspace entry.
    pub short_id: Option<String>,
}

impl CommitRow {
    pub fn is_workspace(&self) -> bool {
        self.short_id.is_none()
    }
}

/// Rows for a commit drill-down, workspace entry first when enabled.
pub fn commit_rows(branch: &str, commits: &[Commit], with_workspace: bool) -> Vec<CommitRow> {
    let workspace = with_workspace.then(|| CommitRow {
        target: Ref::branch(branch),
        text: workspace_text(branch),
        short_id: None,
    });
    workspace
        .into_iter()
        .chain(commits.iter().map(|commit| CommitRow {
            target: Ref::commit(commit.id.clone()),
            text: commit_message(&commit.message).into_owned(),
            short_id: Some(short_id(&commit.id).to_string()),
        }))
        .collect()
}

/// What a renderer should draw for the current selector state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorView {
    Loading {
        ref_type: RefType,
        show_tabs: bool,
    },
    Error {
        ref_type: RefType,
        show_tabs: bool,
        message: String,
    },
    Listing {
        ref_type: RefType,
        show_tabs: bool,
        placeholder: &'static str,
        rows: Vec<RefRow>,
        controls: PaginatorControls,
    },
    Drilldown {
        branch: String,
        rows: Vec<CommitRow>,
    },
    Finished(Ref),
}

impl SelectorView {
    /// The ref that choosing the `index`-th row would emit.
    ///
    /// Rows that are not choosable (the current selection) yield `None`.
    pub fn target(&self, index: usize) -> Option<&Ref> {
        match self {
            SelectorView::Listing { rows, .. } => rows
                .get(index)
                .filter(|row| !row.is_selected)
                .map(|row| &row.target),
            SelectorView::Drilldown { rows, .. } => rows.get(index).map(|row| &row.target),
            _ => None,
        }
    }

    /// Listing with no entries: render [`NO_REFS_TEXT`].
    pub fn is_empty_listing(&self) -> bool {
        matches!(self, SelectorView::Listing { rows, .. } if rows.is_empty())
    }
}

/// Listing rows annotated with selection, default-branch, and drill state.
pub(crate) fn ref_rows(
    ref_type: RefType,
    records: &[RefRecord],
    selected: Option<&Ref>,
    repository: &RepositoryContext,
    with_commits: bool,
) -> Vec<RefRow> {
    records
        .iter()
        .map(|record| {
            let target = Ref::new(record.id.clone(), ref_type);
            RefRow {
                is_selected: selected == Some(&target),
                is_default: ref_type == RefType::Branch && record.id == repository.default_branch,
                can_drill: ref_type == RefType::Branch && with_commits,
                commit: record.commit_id.as_deref().map(|c| short_id(c).to_string()),
                target,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_message_is_epoch() {
        assert_eq!(commit_message(""), "repository epoch");
    }

    #[test]
    fn sixty_chars_shown_verbatim() {
        let msg = "x".repeat(60);
        assert_eq!(commit_message(&msg), msg.as_str());
    }

    #[test]
    fn sixty_one_chars_truncated() {
        let msg = format!("{}{}", "a".repeat(40), "b".repeat(21));
        assert_eq!(commit_message(&msg), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn truncation_counts_characters() {
        let msg = "é".repeat(61);
        let shown = commit_message(&msg);
        assert_eq!(shown.chars().count(), 43);
        assert!(shown.ends_with("..."));
    }

    #[test]
    fn short_id_prefix() {
        assert_eq!(short_id("abcdef1234567890"), "abcdef123456");
        assert_eq!(short_id("abc"), "abc");
        assert_eq!(short_id(""), "");
    }

    #[test]
    fn labels() {
        assert_eq!(ref_label(&Ref::commit("abcdef1234567890")), "abcdef123456");
        assert_eq!(ref_label(&Ref::branch("feature/a-very-long-branch-name")), "feature/a-very-long-branch-name");
        assert_eq!(ref_label(&Ref::tag("v1.0.0")), "v1.0.0");
    }

    #[test]
    fn placeholders() {
        assert_eq!(filter_placeholder(RefType::Tag), "Filter tags");
        assert_eq!(filter_placeholder(RefType::Branch), "Filter branches");
    }

    #[test]
    fn commit_rows_with_workspace() {
        let commits = vec![Commit::new("abcdef1234567890", "fix"), Commit::new("0123456789abcdef", "")];
        let rows = commit_rows("dev", &commits, true);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_workspace());
        assert_eq!(rows[0].target, Ref::branch("dev"));
        assert_eq!(rows[0].text, "dev's Workspace (uncommitted changes)");
        assert_eq!(rows[1].target, Ref::commit("abcdef1234567890"));
        assert_eq!(rows[1].short_id.as_deref(), Some("abcdef123456"));
        assert_eq!(rows[2].text, "repository epoch");
    }

    #[test]
    fn commit_rows_without_workspace() {
        let rows = commit_rows("dev", &[Commit::new("abc", "msg")], false);
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].is_workspace());
    }

    #[test]
    fn ref_rows_annotations() {
        let records = vec![RefRecord::new("dev"), RefRecord::new("main").with_commit("abcdef1234567890")];
        let repo = RepositoryContext::new("repo", "main");
        let selected = Ref::branch("dev");
        let rows = ref_rows(RefType::Branch, &records, Some(&selected), &repo, true);

        assert!(rows[0].is_selected);
        assert!(!rows[0].is_default);
        assert!(rows[1].is_default);
        assert!(rows.iter().all(|r| r.can_drill));
        assert_eq!(rows[1].commit.as_deref(), Some("abcdef123456"));
    }

    #[test]
    fn tag_rows_never_drill_or_default() {
        let records = vec![RefRecord::new("main")];
        let repo = RepositoryContext::new("repo", "main");
        let rows = ref_rows(RefType::Tag, &records, None, &repo, true);
        assert!(!rows[0].can_drill);
        assert!(!rows[0].is_default);
        assert_eq!(rows[0].target, Ref::tag("main"));
    }

    #[test]
    fn selected_row_is_not_a_target() {
        let view = SelectorView::Listing {
            ref_type: RefType::Branch,
            show_tabs: true,
            placeholder: "Filter branches",
            rows: ref_rows(
                RefType::Branch,
                &[RefRecord::new("dev"), RefRecord::new("main")],
                Some(&Ref::branch("dev")),
                &RepositoryContext::new("repo", "main"),
                true,
            ),
            controls: PaginatorControls::default(),
        };
        assert!(view.target(0).is_none());
        assert_eq!(view.target(1), Some(&Ref::branch("main")));
        assert!(view.target(2).is_none());
    }

    proptest! {
        #[test]
        fn short_messages_are_verbatim(msg in "[a-zA-Z0-9 ]{1,60}") {
            prop_assert_eq!(&*commit_message(&msg), msg.as_str());
        }

        #[test]
        fn long_messages_keep_forty_chars(msg in "[a-zA-Z0-9 ]{61,200}") {
            let expected = format!("{}...", &msg[..40]);
            prop_assert_eq!(commit_message(&msg).into_owned(), expected);
        }
    }
}
