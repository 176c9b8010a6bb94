//! The dropdown shell around a [`RefSelector`].
//!
//! The dropdown owns visibility and the caller callbacks. Each time it opens
//! it starts a fresh selector session; closing throws the session away.
//! Only [`RefDropdown::choose`] ever reports a ref to the caller.

use refsel_provider::{FetchOutcome, FetchRequest};
use refsel_types::{Ref, RepositoryContext};
use tracing::debug;

use crate::config::SelectorOptions;
use crate::error::{DropdownError, DropdownResult};
use crate::present::{self, SelectorView};
use crate::selector::RefSelector;

type SelectCallback = Box<dyn FnMut(Ref) + Send>;
type CancelCallback = Box<dyn FnMut() + Send>;

pub struct RefDropdown {
    options: SelectorOptions,
    repository: RepositoryContext,
    selected: Option<Ref>,
    /// The live session; `Some` exactly while open.
    session: Option<RefSelector>,
    /// Last sequence number handed out by any session. Sessions continue
    /// from it so late outcomes of a closed session never match a new one.
    last_seq: u64,
    on_select: SelectCallback,
    on_cancel: Option<CancelCallback>,
}

impl RefDropdown {
    pub fn new(
        options: SelectorOptions,
        repository: RepositoryContext,
        on_select: impl FnMut(Ref) + Send + 'static,
    ) -> Self {
        Self {
            options,
            repository,
            selected: None,
            session: None,
            last_seq: 0,
            on_select: Box::new(on_select),
            on_cancel: None,
        }
    }

    pub fn with_selected(mut self, selected: Ref) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn with_on_cancel(mut self, on_cancel: impl FnMut() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(on_cancel));
        self
    }

    /// The caller's current selection. The dropdown never changes it on its
    /// own; callers update it from their `on_select` handling.
    pub fn set_selected(&mut self, selected: Option<Ref>) {
        self.selected = selected;
    }

    pub fn selected(&self) -> Option<&Ref> {
        self.selected.as_ref()
    }

    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    /// Replace the repository context, forwarding it to the open session.
    pub fn set_repository(&mut self, repository: RepositoryContext) -> DropdownResult<Option<FetchRequest>> {
        self.repository = repository.clone();
        match self.session.as_mut() {
            Some(session) => Ok(session.set_repository(repository)?),
            None => Ok(None),
        }
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Open with a fresh session and return its first fetch. Opening an
    /// already open dropdown does nothing.
    pub fn open(&mut self) -> DropdownResult<Option<FetchRequest>> {
        if self.session.is_some() {
            return Ok(None);
        }
        let mut session = RefSelector::new(self.options.clone(), self.repository.clone(), self.selected.clone())
            .starting_after(self.last_seq);
        let request = session.start()?;
        self.last_seq = session.last_seq();
        debug!(ref_type = %session.ref_type(), seq = self.last_seq, "dropdown opened");
        self.session = Some(session);
        Ok(request)
    }

    /// Close and discard the session. No ref is emitted.
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            self.last_seq = session.last_seq();
            debug!(seq = self.last_seq, "dropdown closed");
        }
    }

    pub fn toggle(&mut self) -> DropdownResult<Option<FetchRequest>> {
        if self.is_open() {
            self.close();
            Ok(None)
        } else {
            self.open()
        }
    }

    pub fn selector(&self) -> Option<&RefSelector> {
        self.session.as_ref()
    }

    /// The open session, for driving filter, paging, and drill-down actions.
    pub fn selector_mut(&mut self) -> DropdownResult<&mut RefSelector> {
        self.session.as_mut().ok_or(DropdownError::Closed)
    }

    pub fn view(&self) -> Option<SelectorView> {
        self.session.as_ref().map(RefSelector::view)
    }

    /// Forward a fetch outcome to the open session. Outcomes arriving while
    /// closed belong to a discarded session and are dropped.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        match self.session.as_mut() {
            Some(session) => session.apply(outcome),
            None => {
                debug!(seq = outcome.seq(), "dropdown closed, dropping fetch outcome");
                false
            }
        }
    }

    /// Choose `reference`, close, and report it through `on_select`.
    pub fn choose(&mut self, reference: Ref) -> DropdownResult<Ref> {
        let session = self.session.as_mut().ok_or(DropdownError::Closed)?;
        let chosen = session.choose(reference)?;
        self.close();
        (self.on_select)(chosen.clone());
        Ok(chosen)
    }

    /// Whether [`Self::cancel`] is offered.
    pub fn can_cancel(&self) -> bool {
        self.selected.is_some() && self.on_cancel.is_some()
    }

    /// Close and report cancellation through `on_cancel`.
    pub fn cancel(&mut self) -> DropdownResult<()> {
        if !self.can_cancel() {
            return Err(DropdownError::CancelUnavailable);
        }
        self.close();
        if let Some(on_cancel) = self.on_cancel.as_mut() {
            on_cancel();
        }
        Ok(())
    }

    /// The button label: `"<prefix> <type>: <id>"` for a selection, the
    /// configured empty text otherwise.
    pub fn label(&self) -> String {
        match &self.selected {
            Some(reference) => format!(
                "{} {}: {}",
                self.options.prefix,
                reference.ref_type(),
                present::ref_label(reference)
            )
            .trim_start()
            .to_string(),
            None => self.options.empty_text.clone(),
        }
    }
}

impl std::fmt::Debug for RefDropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefDropdown")
            .field("options", &self.options)
            .field("repository", &self.repository)
            .field("selected", &self.selected)
            .field("session", &self.session)
            .field("cancellable", &self.on_cancel.is_some())
            .finish()
    }
}
