//! Foundation types for refsel.
//!
//! This crate provides the data model shared by the providers and the
//! selection state machine. Every other refsel crate depends on
//! `refsel-types`.
//!
//! # Key Types
//!
//! - [`Ref`]: An immutable pointer into history: branch, tag, or commit
//! - [`RefType`]: The kind of a [`Ref`]
//! - [`Commit`]: A commit record as returned by a commit listing
//! - [`RepositoryContext`]: Repository id and default branch supplied by the caller
//! - [`Pagination`]: Cursor/filter query for one page of refs
//! - [`ResultPage`]: One page of [`RefRecord`]s plus [`PageInfo`]

pub mod commit;
pub mod error;
pub mod page;
pub mod reference;
pub mod repository;

pub use commit::Commit;
pub use error::{TypeError, TypeResult};
pub use page::{PageInfo, Pagination, RefRecord, ResultPage};
pub use reference::{Ref, RefType};
pub use repository::RepositoryContext;
