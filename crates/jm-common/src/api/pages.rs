use serde::Serialize;

/// One page of a recommendation result list. `total` is the size of the
/// filtered list before slicing; `has_more` tells the caller whether another
/// page exists at `offset + limit`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub total: usize,
    pub results: Vec<T>,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Slice an already-ordered result list into a page.
pub fn paginate<T>(items: Vec<T>, limit: usize, offset: usize) -> Page<T> {
    let total = items.len();
    let results: Vec<T> = items.into_iter().skip(offset).take(limit).collect();

    Page {
        total,
        results,
        limit,
        offset,
        has_more: offset + limit < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_and_reports_remaining_pages() {
        let page = paginate((0..12).collect::<Vec<_>>(), 5, 0);
        assert_eq!(page.total, 12);
        assert_eq!(page.results, vec![0, 1, 2, 3, 4]);
        assert!(page.has_more);

        let last = paginate((0..12).collect::<Vec<_>>(), 5, 10);
        assert_eq!(last.results, vec![10, 11]);
        assert!(!last.has_more);
    }

    #[test]
    fn offset_past_the_end_yields_an_empty_page() {
        let page = paginate(vec![1, 2, 3], 5, 10);
        assert_eq!(page.total, 3);
        assert!(page.results.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn exact_boundary_has_no_more_pages() {
        let page = paginate((0..10).collect::<Vec<_>>(), 5, 5);
        assert_eq!(page.results.len(), 5);
        assert!(!page.has_more);
    }
}
