//! Ref selection for refsel.
//!
//! This crate holds the browse/select logic: a [`RefSelector`] state machine
//! per session, the [`RefDropdown`] shell that owns visibility and callbacks,
//! and the presenters that turn state into rows.
//!
//! The selector never calls a provider itself. Actions return a
//! [`FetchRequest`](refsel_provider::FetchRequest); the caller runs it (for
//! example through [`FetchExecutor`](refsel_provider::FetchExecutor)) and
//! hands the outcome back with [`RefSelector::apply`]. Outcomes that were
//! overtaken by a newer request are dropped.
//!
//! # Key Types
//!
//! - [`RefSelector`]: Loading / Error / Listing / Drilldown / Finished machine
//! - [`RefDropdown`]: Open/closed shell with `on_select` and `on_cancel`
//! - [`SelectorOptions`]: Caller configuration, loadable from TOML
//! - [`SelectorView`]: What to draw for the current state
//! - [`PaginatorControls`]: "Reset" and "Next" for a listing

pub mod config;
pub mod dropdown;
pub mod error;
pub mod paginator;
pub mod present;
pub mod selector;

pub use config::SelectorOptions;
pub use dropdown::RefDropdown;
pub use error::{ConfigError, DropdownError, DropdownResult, SelectorError, SelectorResult};
pub use paginator::PaginatorControls;
pub use present::{CommitRow, RefRow, SelectorView};
pub use selector::{Drilldown, Listing, RefSelector, SelectionState};
