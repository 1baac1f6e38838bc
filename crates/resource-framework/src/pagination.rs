//! # Paginated Fetching
//!
//! Remote collections arrive one page at a time together with a declared total.
//! [`fetch_all`] walks them into a single [`PaginatedCollection`]:
//!
//! - pages are requested strictly one after another, starting at page 1
//! - the page size is fixed for the whole walk
//! - the walk stops once the accumulated length reaches the declared total
//! - every call gets its own timeout from the [`FetchPolicy`]
//! - cancellation is observed between pages, never in the middle of one
//!
//! Any failed page aborts the walk and its partial results are dropped.
//!
//! ## Termination
//!
//! A remote that misreports its total must not keep the loop alive. The walk is
//! bounded by `ceil(largest_total_seen / limit) + 1` pages and by the policy's
//! absolute `max_pages`, whichever is smaller. An empty page before the total is
//! reached ends the walk early for the same reason.

use crate::error::FetchError;
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// One page as reported by the remote source.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items the remote claims the whole collection has.
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }
}

/// A fully aggregated collection. `items.len() == total` always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedCollection<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> PaginatedCollection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Applies `f` to every item, keeping order and total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedCollection<U> {
        PaginatedCollection {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

/// Limits applied to every remote call of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Page size requested from the remote. Zero is treated as one.
    pub page_limit: u32,
    /// Upper bound for a single remote call.
    pub call_timeout: Duration,
    /// Absolute cap on the number of pages one walk may request.
    pub max_pages: u32,
}

impl FetchPolicy {
    pub const DEFAULT_PAGE_LIMIT: u32 = 20;
    pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_MAX_PAGES: u32 = 1000;
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            page_limit: Self::DEFAULT_PAGE_LIMIT,
            call_timeout: Self::DEFAULT_CALL_TIMEOUT,
            max_pages: Self::DEFAULT_MAX_PAGES,
        }
    }
}

/// Aggregates every page of a remote collection.
///
/// `fetch_page(page, limit)` is invoked with `page = 1, 2, ...` and the policy's
/// page limit. Errors carry `endpoint` and the failing page; a cancellation
/// reports the page that was not fetched.
pub async fn fetch_all<T, F, Fut>(
    endpoint: &str,
    policy: &FetchPolicy,
    cancel: &CancellationToken,
    mut fetch_page: F,
) -> Result<PaginatedCollection<T>, FetchError>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, FetchError>>,
{
    let limit = policy.page_limit.max(1);
    let mut items: Vec<T> = Vec::new();
    let mut largest_total = 0usize;
    let mut page = 1u32;

    loop {
        if cancel.is_cancelled() {
            warn!(endpoint, page, accumulated = items.len(), "Pagination cancelled");
            return Err(FetchError::Cancelled {
                endpoint: endpoint.to_string(),
                page: Some(page),
            });
        }

        debug!(endpoint, page, limit, "Fetching page");
        let fetched = with_timeout(endpoint, policy.call_timeout, fetch_page(page, limit))
            .await
            .map_err(|e| e.at_page(page))?;

        let received = fetched.items.len();
        items.extend(fetched.items);
        largest_total = largest_total.max(fetched.total);
        debug!(endpoint, page, received, accumulated = items.len(), total = fetched.total, "Page received");

        if items.len() == fetched.total {
            info!(endpoint, pages = page, total = fetched.total, "Collection aggregated");
            return Ok(PaginatedCollection {
                items,
                total: fetched.total,
            });
        }

        let bound = pages_for(largest_total, limit)
            .saturating_add(1)
            .min(policy.max_pages.max(1));
        let overshot = items.len() > fetched.total;
        if overshot || received == 0 || page >= bound {
            warn!(endpoint, pages = page, accumulated = items.len(), total = fetched.total, "Pagination did not converge");
            return Err(FetchError::PaginationDidNotConverge {
                endpoint: endpoint.to_string(),
                pages: page,
                accumulated: items.len(),
                total: fetched.total,
            });
        }

        page += 1;
    }
}

/// Runs one single-entity remote call under the policy's timeout.
pub async fn fetch_one<T, Fut>(
    endpoint: &str,
    policy: &FetchPolicy,
    cancel: &CancellationToken,
    call: Fut,
) -> Result<T, FetchError>
where
    Fut: Future<Output = Result<T, FetchError>>,
{
    if cancel.is_cancelled() {
        return Err(FetchError::Cancelled {
            endpoint: endpoint.to_string(),
            page: None,
        });
    }
    debug!(endpoint, "Fetching entity");
    with_timeout(endpoint, policy.call_timeout, call).await
}

async fn with_timeout<T, Fut>(endpoint: &str, after: Duration, call: Fut) -> Result<T, FetchError>
where
    Fut: Future<Output = Result<T, FetchError>>,
{
    match tokio::time::timeout(after, call).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            endpoint: endpoint.to_string(),
            page: None,
            after,
        }),
    }
}

fn pages_for(total: usize, limit: u32) -> u32 {
    let limit = limit.max(1) as usize;
    u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_for_rounds_up() {
        assert_eq!(pages_for(0, 20), 0);
        assert_eq!(pages_for(1, 20), 1);
        assert_eq!(pages_for(20, 20), 1);
        assert_eq!(pages_for(21, 20), 2);
        assert_eq!(pages_for(5, 0), 5);
    }

    #[tokio::test]
    async fn empty_collection_needs_one_page() {
        let mut calls = Vec::new();
        let collection = fetch_all::<u32, _, _>(
            "/empty",
            &FetchPolicy::default(),
            &CancellationToken::new(),
            |page, limit| {
                calls.push((page, limit));
                async { Ok(Page::new(vec![], 0)) }
            },
        )
        .await
        .unwrap();

        assert!(collection.is_empty());
        assert_eq!(calls, [(1, 20)]);
    }

    #[tokio::test]
    async fn zero_limit_is_treated_as_one() {
        let policy = FetchPolicy {
            page_limit: 0,
            ..FetchPolicy::default()
        };
        let collection = fetch_all("/one", &policy, &CancellationToken::new(), |page, limit| async move {
            assert_eq!(limit, 1);
            Ok(Page::new(vec![page], 2))
        })
        .await
        .unwrap();
        assert_eq!(collection.items, [1, 2]);
    }

    #[tokio::test]
    async fn overshooting_the_total_is_reported() {
        let err = fetch_all("/grow", &FetchPolicy::default(), &CancellationToken::new(), |_, _| async {
            Ok(Page::new(vec![1, 2, 3], 2))
        })
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            FetchError::PaginationDidNotConverge { accumulated: 3, total: 2, .. }
        ));
    }

    #[tokio::test]
    async fn fetch_one_honours_cancellation() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = fetch_one("/agent", &FetchPolicy::default(), &cancel, async { Ok(1) })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Cancelled {
                endpoint: "/agent".into(),
                page: None
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_one_times_out() {
        let policy = FetchPolicy {
            call_timeout: Duration::from_secs(2),
            ..FetchPolicy::default()
        };
        let err = fetch_one("/slow", &policy, &CancellationToken::new(), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, FetchError::Timeout { page: None, .. }));
    }
}
