//! Pagination math and the list request/response contracts.
//!
//! Pages are 1-based throughout: the store's `listProducts` endpoint counts
//! from 1 and the client-side slicing of search results matches it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Half-open `[start, end)` slice bounds for `page` of a list of
/// `total_items`. Pages past the end yield an empty slice.
pub fn page_bounds(total_items: usize, page: usize, per_page: usize) -> (usize, usize) {
    if per_page == 0 {
        return (0, 0);
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(per_page);
    let start = start.min(total_items);
    let end = (start + per_page).min(total_items);
    (start, end)
}

pub fn total_pages(total_items: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        total_items.div_ceil(per_page)
    }
}

/// Paginated response of the store's `listProducts`. Items stay raw here;
/// the normalizer shapes them at the consumption boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default)]
    pub total: usize,
    #[serde(rename = "totalPages", default)]
    pub total_pages: usize,
}

fn default_page() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_a_partial_last_page() {
        // 23 items, 10 per page: page 3 is exactly items 20..23.
        assert_eq!(page_bounds(23, 3, 10), (20, 23));
        assert_eq!(page_bounds(23, 1, 10), (0, 10));
        assert_eq!(page_bounds(23, 2, 10), (10, 20));
    }

    #[test]
    fn page_past_the_end_is_empty() {
        assert_eq!(page_bounds(23, 4, 10), (23, 23));
        assert_eq!(page_bounds(0, 1, 10), (0, 0));
    }

    #[test]
    fn page_zero_clamps_to_first() {
        assert_eq!(page_bounds(23, 0, 10), (0, 10));
    }

    #[test]
    fn zero_per_page_is_degenerate() {
        assert_eq!(page_bounds(23, 1, 0), (0, 0));
        assert_eq!(total_pages(23, 0), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(23, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn direction_toggles() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
        assert_eq!(SortDirection::Desc.as_str(), "desc");
    }

    #[test]
    fn list_response_tolerates_missing_fields() {
        let r: ListResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(r.page, 1);
        assert!(r.items.is_empty());
        assert_eq!(r.total_pages, 0);
    }
}
