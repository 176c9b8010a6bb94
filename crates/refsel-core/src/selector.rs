//! The ref selection state machine.
//!
//! A [`RefSelector`] is one browse session. Every user action is a method
//! that moves the machine to its next state and returns at most one
//! [`FetchRequest`] for the caller to run. Completed fetches come back
//! through [`RefSelector::apply`].
//!
//! # Transitions
//!
//! | action | allowed from | effect |
//! |---|---|---|
//! | [`start`](RefSelector::start) | any but finished | fetch the current query |
//! | [`set_repository`](RefSelector::set_repository) | any but finished | refetch if the id changed |
//! | [`set_ref_type`](RefSelector::set_ref_type) | any but finished | reset query, drop drill-down, fetch |
//! | [`set_filter`](RefSelector::set_filter) | loading, error, listing | cursor `""`, new filter, fetch |
//! | [`paginate`](RefSelector::paginate) | listing, error | new cursor, same filter, fetch |
//! | [`drill_into`](RefSelector::drill_into) | branch listing | fetch the branch's commits |
//! | [`back`](RefSelector::back) | drill-down | restore the listing it came from |
//! | [`choose`](RefSelector::choose) | listing, drill-down | finish with a ref |
//!
//! # Staleness
//!
//! Each issued request gets the next sequence number and only the outcome
//! of the latest request (same number, kind, and ref type or branch) is
//! applied. Anything older arrived after the parameters that spawned it
//! changed and is dropped. A caller running several sessions against one
//! executor continues numbering with [`RefSelector::starting_after`].

use refsel_provider::{FetchOutcome, FetchRequest};
use refsel_types::{Commit, Pagination, Ref, RefType, RepositoryContext, ResultPage};
use tracing::{debug, info, warn};

use crate::config::SelectorOptions;
use crate::error::{SelectorError, SelectorResult};
use crate::paginator::PaginatorControls;
use crate::present::{self, SelectorView};

/// A fetched page together with the query that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listing {
    pub ref_type: RefType,
    pub pagination: Pagination,
    pub page: ResultPage,
}

impl Listing {
    pub fn controls(&self) -> PaginatorControls {
        PaginatorControls::for_page(&self.page, &self.pagination.after_cursor)
    }
}

/// A branch's commit history, opened from a branch listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drilldown {
    pub branch: String,
    pub commits: Vec<Commit>,
    /// The listing to return to on [`RefSelector::back`].
    origin: Listing,
}

impl Drilldown {
    pub fn origin(&self) -> &Listing {
        &self.origin
    }

    pub fn contains_commit(&self, id: &str) -> bool {
        self.commits.iter().any(|c| c.id == id)
    }
}

/// What the selector is currently showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionState {
    Loading,
    Error(String),
    Listing(Listing),
    Drilldown(Drilldown),
    /// A ref was chosen. Terminal.
    Finished(Ref),
}

impl SelectionState {
    pub fn name(&self) -> &'static str {
        match self {
            SelectionState::Loading => "loading",
            SelectionState::Error(_) => "showing an error",
            SelectionState::Listing(_) => "listing refs",
            SelectionState::Drilldown(_) => "browsing commits",
            SelectionState::Finished(_) => "finished",
        }
    }
}

/// One browse/select session.
#[derive(Debug)]
pub struct RefSelector {
    options: SelectorOptions,
    repository: RepositoryContext,
    selected: Option<Ref>,
    ref_type: RefType,
    pagination: Pagination,
    state: SelectionState,
    /// Sequence number of the most recently issued request.
    seq: u64,
    /// The request whose outcome is still awaited.
    awaiting: Option<FetchRequest>,
}

impl RefSelector {
    /// Create a session in the `Loading` state. Call [`Self::start`] to
    /// issue the first fetch.
    ///
    /// The mode is seeded from `selected` when it is a branch or tag (a tag
    /// only if tags are enabled); otherwise the session lists branches.
    pub fn new(options: SelectorOptions, repository: RepositoryContext, selected: Option<Ref>) -> Self {
        let ref_type = match selected.as_ref().map(Ref::ref_type) {
            Some(RefType::Tag) if options.with_tags => RefType::Tag,
            _ => RefType::Branch,
        };
        let pagination = Pagination::first(options.page_size);
        Self {
            options,
            repository,
            selected,
            ref_type,
            pagination,
            state: SelectionState::Loading,
            seq: 0,
            awaiting: None,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn ref_type(&self) -> RefType {
        self.ref_type
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    pub fn repository(&self) -> &RepositoryContext {
        &self.repository
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SelectionState::Finished(_))
    }

    /// Sequence number of the request whose outcome is awaited, if any.
    pub fn awaiting(&self) -> Option<u64> {
        self.awaiting.as_ref().map(FetchRequest::seq)
    }

    /// Sequence number of the most recently issued request.
    pub fn last_seq(&self) -> u64 {
        self.seq
    }

    /// Continue numbering after `seq`, so requests of this session never
    /// reuse a number handed out by an earlier session of the same caller.
    pub fn starting_after(mut self, seq: u64) -> Self {
        self.seq = self.seq.max(seq);
        self
    }

    fn ensure_active(&self) -> SelectorResult<()> {
        if self.is_finished() {
            return Err(SelectorError::SessionFinished);
        }
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> SelectorError {
        if self.is_finished() {
            return SelectorError::SessionFinished;
        }
        SelectorError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Enter `Loading` and request the current query.
    ///
    /// Without a repository id nothing is requested and the session waits in
    /// `Loading`; any older in-flight outcome is invalidated either way.
    fn fetch_refs(&mut self) -> Option<FetchRequest> {
        let seq = self.next_seq();
        self.state = SelectionState::Loading;

        let Some(repository) = self.repository.ready_id() else {
            self.awaiting = None;
            debug!(seq, "repository not ready, fetch suppressed");
            return None;
        };

        let request = FetchRequest::Refs {
            seq,
            repository: repository.to_string(),
            ref_type: self.ref_type,
            query: self.pagination.clone(),
        };
        debug!(
            seq,
            ref_type = %self.ref_type,
            prefix = %self.pagination.prefix_filter,
            after = %self.pagination.after_cursor,
            "requesting refs"
        );
        self.awaiting = Some(request.clone());
        Some(request)
    }

    /// Issue the fetch for the current query.
    pub fn start(&mut self) -> SelectorResult<Option<FetchRequest>> {
        self.ensure_active()?;
        Ok(self.fetch_refs())
    }

    /// Replace the repository context.
    ///
    /// A changed (or newly available) repository id restarts the listing
    /// from the current query. Other changes only update the metadata.
    pub fn set_repository(&mut self, repository: RepositoryContext) -> SelectorResult<Option<FetchRequest>> {
        self.ensure_active()?;
        let id_changed = repository.ready_id() != self.repository.ready_id();
        self.repository = repository;
        if !id_changed {
            return Ok(None);
        }
        Ok(self.fetch_refs())
    }

    /// Switch between branch and tag listing.
    ///
    /// Always starts over: the cursor and filter are cleared and any
    /// drill-down is dropped.
    pub fn set_ref_type(&mut self, ref_type: RefType) -> SelectorResult<Option<FetchRequest>> {
        self.ensure_active()?;
        if !ref_type.is_listable() {
            return Err(SelectorError::NotListable(ref_type));
        }
        if ref_type == RefType::Tag && !self.options.with_tags {
            return Err(SelectorError::TagsDisabled);
        }
        debug!(from = %self.ref_type, to = %ref_type, "switching ref type");
        self.ref_type = ref_type;
        self.pagination = Pagination::first(self.options.page_size);
        Ok(self.fetch_refs())
    }

    /// Apply a new prefix filter. The listing restarts at the first page.
    pub fn set_filter(&mut self, prefix: impl Into<String>) -> SelectorResult<Option<FetchRequest>> {
        match self.state {
            SelectionState::Loading | SelectionState::Error(_) | SelectionState::Listing(_) => {}
            _ => return Err(self.invalid("filter")),
        }
        self.pagination = self.pagination.with_filter(prefix);
        Ok(self.fetch_refs())
    }

    /// Move to the page after `cursor`, keeping type and filter.
    ///
    /// An empty cursor returns to the first page.
    pub fn paginate(&mut self, cursor: impl Into<String>) -> SelectorResult<Option<FetchRequest>> {
        match self.state {
            SelectionState::Error(_) | SelectionState::Listing(_) => {}
            _ => return Err(self.invalid("paginate")),
        }
        self.pagination = self.pagination.with_cursor(cursor);
        Ok(self.fetch_refs())
    }

    /// Follow the "Next" control of the current listing.
    pub fn next_page(&mut self) -> SelectorResult<Option<FetchRequest>> {
        let next = match &self.state {
            SelectionState::Listing(listing) => listing.controls().next,
            _ => None,
        };
        match next {
            Some(cursor) => self.paginate(cursor),
            None => Err(self.invalid("go to the next page")),
        }
    }

    /// Follow the "Reset" control of the current listing.
    pub fn reset_page(&mut self) -> SelectorResult<Option<FetchRequest>> {
        let offered = matches!(&self.state, SelectionState::Listing(listing) if listing.controls().reset);
        if !offered {
            return Err(self.invalid("reset pagination"));
        }
        self.paginate("")
    }

    /// Start loading the commit history of a listed branch.
    ///
    /// The listing stays visible until the commits arrive.
    pub fn drill_into(&mut self, branch: &str) -> SelectorResult<FetchRequest> {
        let SelectionState::Listing(listing) = &self.state else {
            return Err(self.invalid("browse commits"));
        };
        if listing.ref_type != RefType::Branch {
            return Err(SelectorError::DrilldownRequiresBranch(listing.ref_type));
        }
        if !self.options.with_commits {
            return Err(SelectorError::CommitsDisabled);
        }
        if !listing.page.contains(branch) {
            return Err(SelectorError::UnknownChoice(Ref::branch(branch)));
        }
        let repository = self
            .repository
            .ready_id()
            .ok_or(SelectorError::RepositoryNotReady)?
            .to_string();

        let seq = self.next_seq();
        let request = FetchRequest::Commits {
            seq,
            repository,
            branch: branch.to_string(),
        };
        debug!(seq, branch, "requesting commits");
        self.awaiting = Some(request.clone());
        Ok(request)
    }

    /// Leave the commit history and show the listing it was opened from.
    pub fn back(&mut self) -> SelectorResult<()> {
        let SelectionState::Drilldown(drilldown) = &self.state else {
            return Err(self.invalid("go back"));
        };
        self.state = SelectionState::Listing(drilldown.origin.clone());
        Ok(())
    }

    /// Finish the session with `reference`.
    ///
    /// The ref must be one of the entries currently shown: a listed branch or
    /// tag other than the current selection, a listed commit, or the
    /// workspace entry of the open branch.
    pub fn choose(&mut self, reference: Ref) -> SelectorResult<Ref> {
        match &self.state {
            SelectionState::Listing(listing) => {
                if reference.ref_type() != listing.ref_type || !listing.page.contains(reference.id()) {
                    return Err(SelectorError::UnknownChoice(reference));
                }
                if self.selected.as_ref() == Some(&reference) {
                    return Err(SelectorError::AlreadySelected(reference));
                }
            }
            SelectionState::Drilldown(drilldown) => {
                let listed = match reference.ref_type() {
                    RefType::Commit => drilldown.contains_commit(reference.id()),
                    RefType::Branch => self.options.with_workspace && reference.id() == drilldown.branch,
                    RefType::Tag => false,
                };
                if !listed {
                    return Err(SelectorError::UnknownChoice(reference));
                }
            }
            _ => return Err(self.invalid("choose a ref")),
        }

        info!(reference = %reference, "ref selected");
        self.awaiting = None;
        self.state = SelectionState::Finished(reference.clone());
        Ok(reference)
    }

    /// Apply a completed fetch. Returns `false` if the outcome was stale and
    /// therefore ignored.
    ///
    /// Only the outcome of the awaited request is applied: same sequence
    /// number, kind, and ref type or branch. Anything else leaves the state
    /// and the awaited request untouched.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let seq = outcome.seq();
        let answers = self.awaiting.as_ref().is_some_and(|request| outcome.answers(request));
        if !answers {
            debug!(seq, latest = self.seq, "dropping stale fetch outcome");
            return false;
        }

        let next = match outcome {
            FetchOutcome::Refs { result: Ok(page), .. } => {
                debug!(seq, items = page.items.len(), has_more = page.pagination.has_more, "refs loaded");
                SelectionState::Listing(Listing {
                    ref_type: self.ref_type,
                    pagination: self.pagination.clone(),
                    page,
                })
            }
            FetchOutcome::Commits { branch, result: Ok(commits), .. } => {
                let SelectionState::Listing(origin) = &self.state else {
                    debug!(seq, state = self.state.name(), "commits arrived without a listing to return to");
                    return false;
                };
                debug!(seq, branch = %branch, commits = commits.len(), "commits loaded");
                SelectionState::Drilldown(Drilldown {
                    branch,
                    commits,
                    origin: origin.clone(),
                })
            }
            FetchOutcome::Refs { result: Err(err), .. } | FetchOutcome::Commits { result: Err(err), .. } => {
                warn!(seq, error = %err, "fetch failed");
                SelectionState::Error(err.to_string())
            }
        };
        self.awaiting = None;
        self.state = next;
        true
    }

    /// Presentation of the current state.
    pub fn view(&self) -> SelectorView {
        let show_tabs = self.options.with_tags;
        match &self.state {
            SelectionState::Loading => SelectorView::Loading {
                ref_type: self.ref_type,
                show_tabs,
            },
            SelectionState::Error(message) => SelectorView::Error {
                ref_type: self.ref_type,
                show_tabs,
                message: message.clone(),
            },
            SelectionState::Listing(listing) => SelectorView::Listing {
                ref_type: listing.ref_type,
                show_tabs,
                placeholder: present::filter_placeholder(listing.ref_type),
                rows: present::ref_rows(
                    listing.ref_type,
                    &listing.page.items,
                    self.selected.as_ref(),
                    &self.repository,
                    self.options.with_commits,
                ),
                controls: listing.controls(),
            },
            SelectionState::Drilldown(drilldown) => SelectorView::Drilldown {
                branch: drilldown.branch.clone(),
                rows: present::commit_rows(&drilldown.branch, &drilldown.commits, self.options.with_workspace),
            },
            SelectionState::Finished(reference) => SelectorView::Finished(reference.clone()),
        }
    }
}
