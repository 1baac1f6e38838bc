//! # Mock Page Sources & Testing Guide
//!
//! `MockPages<T>` stands in for a remote collection endpoint. It answers
//! `fetch(page, limit)` calls from a queue of expectations, records every call,
//! and can verify that all expectations were consumed. This lets you test
//! pagination behaviour deterministically without any network.
//!
//! ## When to use which helper
//!
//! | Helper | Use Case |
//! |--------|----------|
//! | [`MockPages::new`] + `expect_page` | Exact control over every page, error injection |
//! | [`MockPages::paged`] | A well-behaved remote serving a fixed item list |
//! | [`MockPages::repeating`] | A remote that never converges (misreported total) |
//! | [`page_of`] | Slicing fixture data inside your own fake API |
//!
//! ## Pattern 1: Exact expectations
//!
//! ```rust
//! use resource_framework::mock::MockPages;
//! use resource_framework::{fetch_all, FetchPolicy};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockPages::<u32>::new();
//!     mock.expect_page(1).return_ok(vec![1, 2], 3);
//!     mock.expect_page(2).return_ok(vec![3], 3);
//!
//!     let collection = fetch_all("/numbers", &FetchPolicy::default(), &CancellationToken::new(), |page, limit| {
//!         mock.fetch(page, limit)
//!     })
//!     .await
//!     .unwrap();
//!
//!     assert_eq!(collection.items, [1, 2, 3]);
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 2: Failure injection
//!
//! ```rust
//! use resource_framework::mock::MockPages;
//! use resource_framework::{fetch_all, FetchError, FetchPolicy};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockPages::<u32>::new();
//!     mock.expect_page(1).return_ok(vec![1, 2], 4);
//!     mock.expect_page(2).return_err(FetchError::RemoteStatus {
//!         endpoint: "/numbers".into(),
//!         page: None,
//!         status: 502,
//!         message: "bad gateway".into(),
//!     });
//!
//!     let err = fetch_all("/numbers", &FetchPolicy::default(), &CancellationToken::new(), |page, limit| {
//!         mock.fetch(page, limit)
//!     })
//!     .await
//!     .unwrap_err();
//!
//!     assert_eq!(err.page(), Some(2));
//! }
//! ```

use crate::error::FetchError;
use crate::pagination::Page;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct Expectation<T> {
    page: u32,
    delay: Option<Duration>,
    response: Result<Page<T>, FetchError>,
}

/// A scripted remote collection endpoint.
pub struct MockPages<T> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    calls: Arc<Mutex<Vec<(u32, u32)>>>,
    repeat: Option<Page<T>>,
}

impl<T: Clone + Send> Default for MockPages<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> MockPages<T> {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self {
            expectations: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            repeat: None,
        }
    }

    /// A well-behaved source: `items` split into pages of `limit`, each reporting
    /// `items.len()` as total. An empty list still answers page 1.
    pub fn paged(items: Vec<T>, limit: u32) -> Self {
        let mut mock = Self::new();
        let total = items.len();
        let pages = total.div_ceil(limit.max(1) as usize).max(1);
        for page in 1..=pages as u32 {
            mock.expect_page(page).return_ok(page_of(&items, page, limit).items, total);
        }
        mock
    }

    /// Answers every call with the same page, whatever was requested.
    pub fn repeating(page: Page<T>) -> Self {
        Self {
            repeat: Some(page),
            ..Self::new()
        }
    }

    /// Expects the next call to request `page`.
    pub fn expect_page(&mut self, page: u32) -> PageExpectationBuilder<T> {
        PageExpectationBuilder {
            page,
            delay: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Serves the next expectation. Panics on an unexpected call.
    pub async fn fetch(&self, page: u32, limit: u32) -> Result<Page<T>, FetchError> {
        self.calls.lock().unwrap().push((page, limit));

        if let Some(repeat) = &self.repeat {
            return Ok(repeat.clone());
        }

        let expectation = self.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(expectation) => {
                assert_eq!(
                    expectation.page, page,
                    "expected a request for page {}, got page {}",
                    expectation.page, page
                );
                if let Some(delay) = expectation.delay {
                    tokio::time::sleep(delay).await;
                }
                expectation.response
            }
            None => panic!("Unexpected request for page {page}"),
        }
    }

    /// Every `(page, limit)` requested so far, in order.
    pub fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for one page expectation.
pub struct PageExpectationBuilder<T> {
    page: u32,
    delay: Option<Duration>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T> PageExpectationBuilder<T> {
    /// Delays the response, e.g. to exercise timeouts under a paused clock.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn return_ok(self, items: Vec<T>, total: usize) {
        self.push(Ok(Page::new(items, total)));
    }

    pub fn return_err(self, error: FetchError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Page<T>, FetchError>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            page: self.page,
            delay: self.delay,
            response,
        });
    }
}

/// Slices `items` the way a remote would serve `page` with `limit`, reporting
/// the full length as total. Pages past the end are empty.
pub fn page_of<T: Clone>(items: &[T], page: u32, limit: u32) -> Page<T> {
    let limit = limit.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(limit);
    let slice = items.iter().skip(start).take(limit).cloned().collect();
    Page::new(slice, items.len())
}
