//! Pagination state for the organization repository listing.
//!
//! Only the first page is requested before the total is known; its `Link`
//! header names the last page, which sizes the fan-out for the rest.

use std::ops::RangeInclusive;

/// Position of one fetched page within the listing.
///
/// # Example
///
/// ```
/// use repo_pulse::github::pagination::PageInfo;
///
/// let info = PageInfo::new(1).with_last_page(Some(3));
/// assert_eq!(info.page_count(), 3);
/// assert_eq!(info.remaining_pages().collect::<Vec<_>>(), vec![2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    current_page: u32,
    last_page: Option<u32>,
}

impl PageInfo {
    /// Creates page info for `current_page` with no known last page.
    #[must_use]
    pub const fn new(current_page: u32) -> Self {
        Self {
            current_page,
            last_page: None,
        }
    }

    /// Sets the last page advertised by the `rel="last"` link.
    #[must_use]
    pub const fn with_last_page(mut self, last_page: Option<u32>) -> Self {
        self.last_page = last_page;
        self
    }

    /// Total pages in the listing; a response without a last link is the
    /// only page.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.last_page.unwrap_or(self.current_page).max(self.current_page)
    }

    /// Pages after the current one that still need fetching.
    #[must_use]
    pub fn remaining_pages(&self) -> RangeInclusive<u32> {
        self.current_page.saturating_add(1)..=self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::PageInfo;

    #[rstest]
    #[case::no_link(None, 1, vec![])]
    #[case::single_page(Some(1), 1, vec![])]
    #[case::three_pages(Some(3), 3, vec![2, 3])]
    fn remaining_pages_follow_last_link(
        #[case] last_page: Option<u32>,
        #[case] expected_count: u32,
        #[case] expected_remaining: Vec<u32>,
    ) {
        let info = PageInfo::new(1).with_last_page(last_page);

        assert_eq!(info.page_count(), expected_count);
        assert_eq!(info.remaining_pages().collect::<Vec<_>>(), expected_remaining);
    }

    #[rstest]
    fn last_page_before_current_is_ignored() {
        let info = PageInfo::new(4).with_last_page(Some(2));
        assert_eq!(info.page_count(), 4);
        assert_eq!(info.remaining_pages().count(), 0);
    }
}
