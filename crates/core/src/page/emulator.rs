use futures_util::{Stream, StreamExt};

use super::{Page, PageRequest};

/// Reads one page from a forward-only stream of results.
///
/// Iteration runs in three phases:
///
/// 1. Skip: discard items until the requested offset is reached. If the
///    stream ends first, the offset lies beyond the results and an empty
///    page is returned whose total is the exact count seen.
/// 2. Collect: gather up to one page of items.
/// 3. Look-ahead: discard up to one further page of items to learn
///    whether more results exist. The look-ahead count also improves the
///    total estimate; an unbounded drain would defeat the lazy,
///    network-backed iteration, so the probe stops at `page_size`.
///
/// At most `offset + 2 * page_size` items are consumed. Errors from the
/// stream propagate unchanged from any phase; a partial page is never
/// returned after a mid-stream failure.
pub async fn read_page<T, E, S>(results: S, request: &PageRequest) -> Result<Page<T>, E>
where
    S: Stream<Item = Result<T, E>>,
{
    futures_util::pin_mut!(results);

    // Skip phase.
    let mut skipped: u64 = 0;
    while skipped < request.offset() {
        match results.next().await {
            Some(Ok(_)) => skipped += 1,
            Some(Err(err)) => return Err(err),
            None => return Ok(Page::new(Vec::new(), request.offset(), false, skipped)),
        }
    }

    // Collect phase.
    let mut items = Vec::with_capacity(request.page_size());
    while items.len() < request.page_size() {
        match results.next().await {
            Some(Ok(item)) => items.push(item),
            Some(Err(err)) => return Err(err),
            None => {
                // Exhausted inside the page: the total is exact.
                let total = request.offset() + items.len() as u64;
                return Ok(Page::new(items, request.offset(), false, total));
            }
        }
    }

    // Look-ahead phase.
    let mut lookahead: u64 = 0;
    while lookahead < request.page_size() as u64 {
        match results.next().await {
            Some(Ok(_)) => lookahead += 1,
            Some(Err(err)) => return Err(err),
            None => break,
        }
    }

    let estimated_total = request.offset() + items.len() as u64 + lookahead;
    Ok(Page::new(
        items,
        request.offset(),
        lookahead > 0,
        estimated_total,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Boom;

    fn letters(n: usize) -> Vec<Result<char, Boom>> {
        ('a'..).take(n).map(Ok).collect()
    }

    async fn page_of(n: usize, offset: u64, page_size: usize) -> Page<char> {
        let request = PageRequest::new(offset, page_size).unwrap();
        read_page(stream::iter(letters(n)), &request).await.unwrap()
    }

    #[tokio::test]
    async fn test_middle_page_with_look_ahead() {
        // [a,b,c,d,e], offset 2, page size 2 -> [c,d], one item behind it.
        let page = page_of(5, 2, 2).await;

        assert_eq!(page.items(), &['c', 'd']);
        assert!(page.has_next());
        assert!(page.has_previous());
        assert_eq!(page.estimated_total(), 5);
    }

    #[tokio::test]
    async fn test_final_partial_page() {
        let page = page_of(5, 4, 2).await;

        assert_eq!(page.items(), &['e']);
        assert!(!page.has_next());
        assert_eq!(page.estimated_total(), 5);
    }

    #[tokio::test]
    async fn test_offset_beyond_the_results() {
        let page = page_of(5, 10, 2).await;

        assert!(page.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.estimated_total(), 5);
    }

    #[tokio::test]
    async fn test_zero_offset_skips_nothing() {
        let page = page_of(5, 0, 3).await;

        assert_eq!(page.items(), &['a', 'b', 'c']);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[tokio::test]
    async fn test_exact_boundary_has_no_next_page() {
        // Four items, second page of two: the look-ahead finds nothing.
        let page = page_of(4, 2, 2).await;

        assert_eq!(page.items(), &['c', 'd']);
        assert!(!page.has_next());
        assert_eq!(page.estimated_total(), 4);
    }

    #[tokio::test]
    async fn test_empty_results() {
        let page = page_of(0, 0, 10).await;

        assert!(page.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.estimated_total(), 0);
    }

    #[tokio::test]
    async fn test_page_shape_over_many_lengths_and_requests() {
        for n in 0..=7usize {
            for offset in 0..=9u64 {
                for page_size in 1..=4usize {
                    let page = page_of(n, offset, page_size).await;

                    let expected_len = n.saturating_sub(offset as usize).min(page_size);
                    assert_eq!(page.len(), expected_len, "n={n} offset={offset}");

                    let expected_has_next = offset as usize + expected_len < n;
                    assert_eq!(page.has_next(), expected_has_next, "n={n} offset={offset}");

                    if page.has_next() {
                        assert!(page.estimated_total() <= n as u64);
                        assert!(page.estimated_total() >= offset + page.len() as u64);
                    } else {
                        assert_eq!(page.estimated_total(), n as u64);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_estimates_grow_monotonically_across_pages() {
        let mut request = PageRequest::first(3).unwrap();
        let mut previous_estimate = 0;

        loop {
            let page = read_page(stream::iter(letters(10)), &request).await.unwrap();
            assert!(page.estimated_total() >= previous_estimate);
            previous_estimate = page.estimated_total();

            if !page.has_next() {
                assert_eq!(page.estimated_total(), 10);
                break;
            }
            request = request.next();
        }
    }

    #[tokio::test]
    async fn test_identical_requests_yield_identical_pages() {
        let request = PageRequest::new(2, 2).unwrap();

        let first = read_page(stream::iter(letters(6)), &request).await.unwrap();
        let second = read_page(stream::iter(letters(6)), &request).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_error_during_skip_propagates() {
        let results = stream::iter(vec![Ok('a'), Err(Boom), Ok('c')]);
        let request = PageRequest::new(2, 1).unwrap();

        assert_eq!(read_page(results, &request).await, Err(Boom));
    }

    #[tokio::test]
    async fn test_error_during_collect_discards_the_partial_page() {
        let results = stream::iter(vec![Ok('a'), Ok('b'), Err(Boom)]);
        let request = PageRequest::new(0, 3).unwrap();

        assert_eq!(read_page(results, &request).await, Err(Boom));
    }

    #[tokio::test]
    async fn test_error_during_look_ahead_propagates() {
        let results = stream::iter(vec![Ok('a'), Ok('b'), Err(Boom)]);
        let request = PageRequest::new(0, 2).unwrap();

        assert_eq!(read_page(results, &request).await, Err(Boom));
    }

    #[tokio::test]
    async fn test_consumes_no_more_than_offset_plus_two_pages() {
        // An error placed just past the look-ahead bound must never be hit.
        let mut results: Vec<Result<char, Boom>> = letters(6);
        results.push(Err(Boom));

        let request = PageRequest::new(2, 2).unwrap();
        let page = read_page(stream::iter(results), &request).await.unwrap();

        assert_eq!(page.items(), &['c', 'd']);
        assert!(page.has_next());
    }
}
