//! # Framework Errors
//!
//! This module defines the error taxonomy shared by every layer of the framework.
//! Each layer owns one enum so callers can pattern match on exactly the failures
//! that layer can produce:
//!
//! - [`ParseError`] - the identifier did not fit a template (always recoverable)
//! - [`FetchError`] - a remote call failed, carrying endpoint and page context
//! - [`DispatchError`] - what [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) returns
//! - [`TemplateError`] - a route table could not be built at startup

use std::time::Duration;

/// Errors produced while matching an identifier against an [`AddressTemplate`](crate::AddressTemplate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("identifier must start with `{expected}`: {identifier}")]
    InvalidScheme {
        expected: &'static str,
        identifier: String,
    },
    #[error("expected {expected} segments, found {found}")]
    SegmentCountMismatch { expected: String, found: usize },
    #[error("segment {index} is `{found}`, expected `{expected}`")]
    LiteralMismatch {
        index: usize,
        expected: String,
        found: String,
    },
    #[error("parameter `{name}` is empty")]
    EmptyParameter { name: String },
    #[error("parameter `{name}` is not valid percent-encoding: {value}")]
    InvalidEncoding { name: String, value: String },
}

impl ParseError {
    /// True when the template simply does not describe this identifier's shape,
    /// so the next template may still apply.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            ParseError::SegmentCountMismatch { .. } | ParseError::LiteralMismatch { .. }
        )
    }
}

/// Errors produced by remote fetches, single-entity or paginated.
///
/// `page` is `None` for single-entity endpoints.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("{endpoint}{}: remote returned status {status}: {message}", page_suffix(.page))]
    RemoteStatus {
        endpoint: String,
        page: Option<u32>,
        status: u16,
        message: String,
    },
    #[error("{endpoint}{}: could not decode response: {message}", page_suffix(.page))]
    DecodeFailure {
        endpoint: String,
        page: Option<u32>,
        message: String,
    },
    #[error("{endpoint}{}: transport error: {message}", page_suffix(.page))]
    Transport {
        endpoint: String,
        page: Option<u32>,
        message: String,
    },
    #[error(
        "{endpoint}: pagination did not converge after {pages} pages ({accumulated} items, declared total {total})"
    )]
    PaginationDidNotConverge {
        endpoint: String,
        pages: u32,
        accumulated: usize,
        total: usize,
    },
    #[error("{endpoint}{}: timed out after {after:?}", page_suffix(.page))]
    Timeout {
        endpoint: String,
        page: Option<u32>,
        after: Duration,
    },
    #[error("{endpoint}{}: cancelled", page_suffix(.page))]
    Cancelled { endpoint: String, page: Option<u32> },
}

fn page_suffix(page: &Option<u32>) -> String {
    page.map(|p| format!(" (page {p})")).unwrap_or_default()
}

impl FetchError {
    /// Attaches page context, keeping any page already recorded by the remote layer.
    pub fn at_page(mut self, at: u32) -> Self {
        match &mut self {
            FetchError::RemoteStatus { page, .. }
            | FetchError::DecodeFailure { page, .. }
            | FetchError::Transport { page, .. }
            | FetchError::Timeout { page, .. }
            | FetchError::Cancelled { page, .. } => {
                page.get_or_insert(at);
            }
            FetchError::PaginationDidNotConverge { .. } => {}
        }
        self
    }

    /// The page the failure happened on, if it happened inside a paginated walk.
    pub fn page(&self) -> Option<u32> {
        match self {
            FetchError::RemoteStatus { page, .. }
            | FetchError::DecodeFailure { page, .. }
            | FetchError::Transport { page, .. }
            | FetchError::Timeout { page, .. }
            | FetchError::Cancelled { page, .. } => *page,
            FetchError::PaginationDidNotConverge { .. } => None,
        }
    }
}

/// Everything [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid resource identifier: {0}")]
    InvalidIdentifier(#[from] ParseError),
    #[error("resource not found: {0}")]
    UnknownResource(String),
    #[error("route `{route}` has no parameter `{name}`")]
    MissingParameter { route: String, name: String },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Errors raised while building templates or route tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template `{template}` must start with `{expected}`")]
    InvalidScheme {
        template: String,
        expected: &'static str,
    },
    #[error("template `{template}` has an empty segment at {index}")]
    EmptySegment { template: String, index: usize },
    #[error("template `{template}` has a malformed placeholder `{segment}`")]
    MalformedPlaceholder { template: String, segment: String },
    #[error("template `{template}` declares placeholder `{name}` twice")]
    DuplicatePlaceholder { template: String, name: String },
    #[error("template `{template}` has a list placeholder before its last segment")]
    MisplacedList { template: String },
    #[error("template `{template}` is registered twice")]
    DuplicateRoute { template: String },
}
