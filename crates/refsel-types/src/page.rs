//! Cursor pagination types.
//!
//! Pages are requested with a [`Pagination`] query (an opaque `after` cursor,
//! a name prefix, and a page size) and come back as a [`ResultPage`].

use serde::{Deserialize, Serialize};

/// Query for one page of refs.
///
/// An empty `after_cursor` means "start from the beginning".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub after_cursor: String,
    pub prefix_filter: String,
    pub page_size: usize,
}

impl Pagination {
    /// First page, no filter.
    pub fn first(page_size: usize) -> Self {
        Self {
            after_cursor: String::new(),
            prefix_filter: String::new(),
            page_size,
        }
    }

    /// The same query with a new filter. Always restarts at the first page.
    pub fn with_filter(&self, prefix: impl Into<String>) -> Self {
        Self {
            after_cursor: String::new(),
            prefix_filter: prefix.into(),
            page_size: self.page_size,
        }
    }

    /// The same query and filter, positioned after `cursor`.
    pub fn with_cursor(&self, cursor: impl Into<String>) -> Self {
        Self {
            after_cursor: cursor.into(),
            prefix_filter: self.prefix_filter.clone(),
            page_size: self.page_size,
        }
    }

    pub fn is_first_page(&self) -> bool {
        self.after_cursor.is_empty()
    }
}

/// Provider-side pagination info attached to a [`ResultPage`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub has_more: bool,
}

/// One listed branch or tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefRecord {
    pub id: String,
    /// The commit the ref points at, when the provider reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
}

impl RefRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            commit_id: None,
        }
    }

    pub fn with_commit(mut self, commit_id: impl Into<String>) -> Self {
        self.commit_id = Some(commit_id.into());
        self
    }
}

/// One page of listing results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    pub items: Vec<RefRecord>,
    pub pagination: PageInfo,
}

impl ResultPage {
    pub fn new(items: Vec<RefRecord>, has_more: bool) -> Self {
        Self {
            items,
            pagination: PageInfo { has_more },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn last_id(&self) -> Option<&str> {
        self.items.last().map(|r| r.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_restarts_cursor() {
        let p = Pagination::first(10).with_cursor("dev").with_filter("fe");
        assert_eq!(p.after_cursor, "");
        assert_eq!(p.prefix_filter, "fe");
        assert_eq!(p.page_size, 10);
    }

    #[test]
    fn cursor_keeps_filter() {
        let p = Pagination::first(10).with_filter("fe").with_cursor("feat-a");
        assert_eq!(p.prefix_filter, "fe");
        assert!(!p.is_first_page());
        assert!(p.with_cursor("").is_first_page());
    }

    #[test]
    fn result_page_helpers() {
        let page = ResultPage::new(vec![RefRecord::new("dev"), RefRecord::new("main")], false);
        assert_eq!(page.last_id(), Some("main"));
        assert!(page.contains("dev"));
        assert!(!page.contains("feature"));
        assert!(ResultPage::default().last_id().is_none());
    }
}
