//! Paginated vacancy retrieval.
//!
//! Page 0 is requested first and supplies the found count. After that the
//! board's pagination style decides whether to continue: a page-count board
//! stops once `page == total_pages` from page 0, a flag board stops when a
//! page reports no more results.
//!
//! A page that keeps failing after all attempts ends pagination early and
//! keeps everything accumulated so far. The found count is still the one
//! page 0 reported, so `found` may exceed `postings.len()`; the result
//! records `interrupted` so callers can tell.

use crate::boards::{JobBoard, LocationId, Pagination};
use crate::error::FetchError;
use crate::posting::Posting;
use crate::retry::{run_with_retry, RetryOutcome, RetryPolicy};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct FetchedVacancies {
    pub postings: Vec<Posting>,
    /// Total reported by the board on page 0
    pub found: u64,
    pub pages_fetched: u32,
    /// Pagination stopped because a page exhausted its attempts
    pub interrupted: bool,
}

/// Fetch every page of vacancies for `query` in `location`.
///
/// Returns `Err` only for a response that could not be decoded; transient
/// failures are retried and, once exhausted, cut pagination short.
pub async fn fetch_vacancies(
    board: &dyn JobBoard,
    query: &str,
    location: &LocationId,
    policy: &RetryPolicy,
) -> Result<FetchedVacancies, FetchError> {
    let mut fetched = FetchedVacancies::default();
    let mut total_pages: Option<u32> = None;
    let mut page = 0;

    loop {
        let label = format!("{} page {} for '{}'", board.name(), page, query);
        let outcome = run_with_retry(policy, &label, move |_| {
            board.fetch_page(query, location, page)
        })
        .await;

        let result = match outcome {
            RetryOutcome::Succeeded(result) => result,
            RetryOutcome::Exhausted { attempts, .. } => {
                warn!(
                    "Stopping pagination for '{}' on {}: page {} failed {} times, keeping {} vacancies",
                    query,
                    board.name(),
                    page,
                    attempts,
                    fetched.postings.len()
                );
                fetched.interrupted = true;
                break;
            }
            RetryOutcome::Aborted(e) => return Err(e),
        };

        if page == 0 {
            fetched.found = result.found.unwrap_or(0);
        }
        fetched.postings.extend(result.postings);
        fetched.pages_fetched += 1;

        let has_next = match result.pagination {
            Pagination::TotalPages(pages) => page + 1 < *total_pages.get_or_insert(pages),
            Pagination::HasMore(more) => more,
        };

        if !has_next {
            break;
        }
        page += 1;
    }

    debug!(
        "{}: '{}' fetched {} vacancies over {} pages (found {})",
        board.name(),
        query,
        fetched.postings.len(),
        fetched.pages_fetched,
        fetched.found
    );

    Ok(fetched)
}
