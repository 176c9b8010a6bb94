//! Ref and commit listing providers for refsel.
//!
//! The selector never talks to a backend directly. It emits
//! [`FetchRequest`]s, and this crate turns them into calls on the provider
//! capabilities and hands back [`FetchOutcome`]s.
//!
//! # Modules
//!
//! - [`error`]: [`ProviderError`], the only failure kind a fetch can report
//! - [`traits`]: [`RefListProvider`] and [`CommitProvider`] capabilities
//! - [`memory`]: [`InMemoryRepositoryStore`] with branch and tag listers
//! - [`fixture`]: TOML repository fixtures loaded into the in-memory store
//! - [`request`]: Sequence-tagged fetch requests and outcomes
//! - [`executor`]: Runs requests against [`Providers`] with a timeout

pub mod error;
pub mod executor;
pub mod fixture;
pub mod memory;
pub mod request;
pub mod traits;

pub use error::{ProviderError, ProviderResult};
pub use executor::{execute, FetchExecutor};
pub use fixture::RepositoryFixture;
pub use memory::{BranchLister, InMemoryRepositoryStore, TagLister};
pub use request::{FetchOutcome, FetchRequest};
pub use traits::{CommitProvider, Providers, RefListProvider};
