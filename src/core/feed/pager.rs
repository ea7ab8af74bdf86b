// Pure page window over an ordered sequence.
//
// Policy
// - Pages are 1-based. Page n covers [(n - 1) * per_page, n * per_page).
// - A missing page, or a page <= 0, selects the whole sequence.
// - A window past the end is empty; a window crossing the end is truncated.

pub fn page<T>(items: &[T], page: Option<i64>, per_page: usize) -> &[T] {
    let page = match page {
        Some(page) if page > 0 => page as usize,
        _ => return items,
    };
    let start = (page - 1).saturating_mul(per_page).min(items.len());
    let end = page.saturating_mul(per_page).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod pager_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn items() -> Vec<u32> {
        (1..=10).collect()
    }

    #[rstest]
    #[case(Some(1), 3, vec![1, 2, 3])]
    #[case(Some(2), 3, vec![4, 5, 6])]
    #[case(Some(4), 3, vec![10])]
    #[case(Some(5), 3, vec![])]
    #[case(Some(1), 20, (1..=10).collect())]
    #[case(Some(3), 0, vec![])]
    fn it_should_select_the_requested_window(
        items: Vec<u32>,
        #[case] requested: Option<i64>,
        #[case] per_page: usize,
        #[case] expected: Vec<u32>,
    ) {
        assert_eq!(page(&items, requested, per_page), expected.as_slice());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(0))]
    #[case(Some(-3))]
    fn it_should_return_everything_without_a_positive_page(
        items: Vec<u32>,
        #[case] requested: Option<i64>,
    ) {
        assert_eq!(page(&items, requested, 3), items.as_slice());
    }

    #[rstest]
    fn it_should_not_overflow_on_huge_pages(items: Vec<u32>) {
        assert!(page(&items, Some(i64::MAX), usize::MAX).is_empty());
    }
}
