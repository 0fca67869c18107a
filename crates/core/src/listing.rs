//! Pure list-view derivations: text search, pagination, and the query
//! state shared by every list page.
//!
//! These hold no persisted state beyond the current page number and
//! search string; everything else is recomputed from the latest fetched
//! list on every render.

/// Items shown per page on list views.
pub const PAGE_SIZE: usize = 10;

/// Current query state of a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Case-insensitive substring filter; empty means "no filter".
    pub search: String,
    /// 1-based page number into the filtered list.
    pub page: usize,
}

impl ListQuery {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            page: 1,
        }
    }

    /// Replace the search string. Any change resets the page to 1 so a
    /// narrower result set is never viewed through a stale page offset.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.search {
            self.search = search;
            self.page = 1;
        }
    }

    /// Move to a specific page; clamped to at least 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

/// Filter `items` by a case-insensitive substring match of `search`
/// against the key produced by `key_of`. An empty search keeps everything.
pub fn filter_by_search<'a, T>(
    items: &'a [T],
    search: &str,
    key_of: impl Fn(&T) -> &str,
) -> Vec<&'a T> {
    if search.is_empty() {
        return items.iter().collect();
    }
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| key_of(item).to_lowercase().contains(&needle))
        .collect()
}

/// Slice out one page (1-based) of `items`. A page past the end yields
/// an empty slice rather than panicking.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Total number of pages for `len` items (at least 1 so empty lists
/// still render page "1 of 1").
pub fn page_count(len: usize, page_size: usize) -> usize {
    if len == 0 {
        1
    } else {
        len.div_ceil(page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_change_resets_page() {
        let mut q = ListQuery::new();
        q.set_page(4);
        q.set_search("widget");
        assert_eq!(q.page, 1);
        assert_eq!(q.search, "widget");
    }

    #[test]
    fn identical_search_keeps_page() {
        let mut q = ListQuery::new();
        q.set_search("widget");
        q.set_page(3);
        q.set_search("widget");
        assert_eq!(q.page, 3);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let names = vec!["Blue Widget".to_string(), "Gadget".to_string()];
        let hits = filter_by_search(&names, "WID", |s| s.as_str());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0], "Blue Widget");
    }

    #[test]
    fn empty_search_keeps_everything() {
        let names = vec!["a".to_string(), "b".to_string()];
        assert_eq!(filter_by_search(&names, "", |s| s.as_str()).len(), 2);
    }

    #[test]
    fn pagination_slices_and_clamps() {
        let items: Vec<i32> = (0..25).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 3, 10), &items[20..25]);
        assert!(paginate(&items, 4, 10).is_empty());
        // Page 0 is treated as page 1.
        assert_eq!(paginate(&items, 0, 10), &items[0..10]);
    }

    #[test]
    fn page_count_rounds_up_and_floors_at_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(25, 10), 3);
    }
}
