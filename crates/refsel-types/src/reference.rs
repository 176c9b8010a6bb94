//! Core reference types.
//!
//! A [`Ref`] is what a selection session ultimately hands back to its caller.
//! It comes in three flavors: branches, tags, and commits.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// The kind of a [`Ref`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    /// A mutable, named pointer to a commit.
    #[default]
    Branch,
    /// An immutable, named pointer to a commit.
    Tag,
    /// A commit addressed by its hash.
    Commit,
}

impl RefType {
    /// Lowercase name used in labels and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            RefType::Branch => "branch",
            RefType::Tag => "tag",
            RefType::Commit => "commit",
        }
    }

    /// Returns `true` for the two named, listable kinds.
    pub fn is_listable(&self) -> bool {
        matches!(self, RefType::Branch | RefType::Tag)
    }
}

impl fmt::Display for RefType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RefType {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        match s {
            "branch" => Ok(RefType::Branch),
            "tag" => Ok(RefType::Tag),
            "commit" => Ok(RefType::Commit),
            other => Err(TypeError::UnknownRefType(other.to_string())),
        }
    }
}

/// A reference chosen by the user: an opaque id plus its kind.
///
/// Refs are immutable once constructed. The id is a branch or tag name, or a
/// commit hash.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
    id: String,
    #[serde(rename = "type")]
    ref_type: RefType,
}

impl Ref {
    /// Create a ref of the given kind.
    pub fn new(id: impl Into<String>, ref_type: RefType) -> Self {
        Self {
            id: id.into(),
            ref_type,
        }
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Self::new(name, RefType::Branch)
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(name, RefType::Tag)
    }

    pub fn commit(hash: impl Into<String>) -> Self {
        Self::new(hash, RefType::Commit)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ref_type(&self) -> RefType {
        self.ref_type
    }

    pub fn is_commit(&self) -> bool {
        self.ref_type == RefType::Commit
    }
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.ref_type, self.id)
    }
}

/// Parses the `<type>:<id>` form produced by [`Display`](fmt::Display).
impl FromStr for Ref {
    type Err = TypeError;

    fn from_str(s: &str) -> TypeResult<Self> {
        let (kind, id) = s.split_once(':').ok_or_else(|| TypeError::MalformedRef {
            input: s.to_string(),
        })?;
        if id.is_empty() {
            return Err(TypeError::EmptyRefId);
        }
        Ok(Self::new(id, kind.parse()?))
    }
}
