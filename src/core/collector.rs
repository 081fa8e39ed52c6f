//! Full video history retrieval

use crate::core::source::{FetchError, GeekSource};
use crate::entities::Video;

/// Videos requested per page
pub const PAGE_SIZE: u32 = 50;

/// Fetch every review video of a user, page by page
///
/// Stops at the first empty page. Pages are concatenated in fetch order,
/// so the result stays most-recent-first. Any page failure aborts the
/// whole collection.
pub fn collect_all<S: GeekSource + ?Sized>(
    source: &S,
    user_id: u64,
) -> Result<Vec<Video>, FetchError> {
    let mut videos = Vec::new();
    let mut page = 1;

    loop {
        let batch = source.videos_page(user_id, page, PAGE_SIZE)?;
        if batch.is_empty() {
            break;
        }
        tracing::debug!(page, count = batch.len(), "Fetched video page");
        videos.extend(batch);
        page += 1;
    }

    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fake::{video, FakeSource};

    #[test]
    fn test_collects_until_first_empty_page() {
        let source = FakeSource {
            pages: vec![
                vec![
                    video("3", "2024-03-01", "1", "A"),
                    video("2", "2023-02-01", "2", "B"),
                ],
                vec![video("1", "2019-06-01", "3", "C")],
                vec![],
                vec![video("0", "2010-01-01", "4", "D")],
            ],
            ..Default::default()
        };

        let videos = collect_all(&source, 42).unwrap();

        let ids: Vec<_> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(*source.page_calls.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_history() {
        let source = FakeSource::default();
        assert!(collect_all(&source, 42).unwrap().is_empty());
        assert_eq!(*source.page_calls.borrow(), vec![1]);
    }

    #[test]
    fn test_page_failure_is_fatal() {
        let source = FakeSource {
            pages: vec![vec![video("1", "2019-06-01", "3", "C")]],
            fail_page: Some(2),
            ..Default::default()
        };

        assert!(matches!(
            collect_all(&source, 42),
            Err(FetchError::Status { status: 500, .. })
        ));
    }
}
