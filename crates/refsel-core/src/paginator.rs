//! Pagination controls for a ref listing.
//!
//! "Reset" is offered once the user is past the first page and "Next" while
//! the provider reports more results. Reset only clears the cursor; the
//! active prefix filter is kept.

use refsel_types::ResultPage;

/// The pagination controls to render below a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginatorControls {
    /// Whether "Reset" (back to the first page) is offered.
    pub reset: bool,
    /// The cursor "Next" would request, when "Next" is offered.
    pub next: Option<String>,
}

impl PaginatorControls {
    /// Controls for `page`, fetched with cursor `after_cursor`.
    pub fn for_page(page: &ResultPage, after_cursor: &str) -> Self {
        Self {
            reset: !after_cursor.is_empty(),
            next: page.pagination.has_more.then(|| next_cursor(page)),
        }
    }

    /// `true` when nothing should render.
    pub fn is_empty(&self) -> bool {
        !self.reset && self.next.is_none()
    }
}

/// The cursor for the page after `page`: the id of its last item.
///
/// Falls back to `""` for an empty page, which restarts the listing.
pub fn next_cursor(page: &ResultPage) -> String {
    page.last_id().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use refsel_types::RefRecord;

    use super::*;

    fn page(ids: &[&str], has_more: bool) -> ResultPage {
        ResultPage::new(ids.iter().map(|id| RefRecord::new(*id)).collect(), has_more)
    }

    #[test]
    fn first_and_only_page_has_no_controls() {
        let controls = PaginatorControls::for_page(&page(&["main", "dev"], false), "");
        assert!(controls.is_empty());
    }

    #[test]
    fn next_uses_last_item_id() {
        let controls = PaginatorControls::for_page(&page(&["a", "b", "c"], true), "");
        assert!(!controls.reset);
        assert_eq!(controls.next.as_deref(), Some("c"));
    }

    #[test]
    fn reset_shown_past_first_page() {
        let controls = PaginatorControls::for_page(&page(&["d"], false), "c");
        assert!(controls.reset);
        assert!(controls.next.is_none());
        assert!(!controls.is_empty());
    }

    #[test]
    fn both_controls_in_the_middle() {
        let controls = PaginatorControls::for_page(&page(&["d", "e"], true), "c");
        assert!(controls.reset);
        assert_eq!(controls.next.as_deref(), Some("e"));
    }

    #[test]
    fn empty_page_falls_back_to_empty_cursor() {
        assert_eq!(next_cursor(&page(&[], true)), "");
        let controls = PaginatorControls::for_page(&page(&[], true), "");
        assert_eq!(controls.next.as_deref(), Some(""));
    }
}
