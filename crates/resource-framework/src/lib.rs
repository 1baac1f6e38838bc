//! # Resource Framework
//!
//! This crate provides the building blocks for exposing a remote, paginated REST API
//! through an **addressable resource model**: clients name a piece of remote state with
//! a URI-shaped identifier, and the framework turns that identifier into remote fetches
//! and a single typed result.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Addressing** ([`AddressTemplate`], [`ResourceIdentifier`]) - identifiers are split
//!    once into segments and matched against declarative templates
//! 2. **Aggregation** ([`fetch_all`], [`FetchPolicy`]) - multi-page collections become one
//!    ordered [`PaginatedCollection`], with a bounded page walk, per-call timeouts and
//!    cancellation between pages
//! 3. **Handlers** ([`ResourceHandler`]) - your orchestration code, one per route
//! 4. **Dispatch** ([`RouteTable`], [`Dispatcher`]) - an immutable, ordered table that picks
//!    the handler for an identifier
//!
//! ## Example
//!
//! ```rust
//! use resource_framework::{
//!     fetch_all, DispatchError, Dispatcher, ExtractedParameters, FetchPolicy, Page,
//!     PaginatedCollection, ResourceHandler, RouteTable,
//! };
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Numbers;
//!
//! #[async_trait]
//! impl ResourceHandler<FetchPolicy, PaginatedCollection<u32>> for Numbers {
//!     async fn handle(
//!         &self,
//!         _params: &ExtractedParameters,
//!         policy: &FetchPolicy,
//!     ) -> Result<PaginatedCollection<u32>, DispatchError> {
//!         let cancel = CancellationToken::new();
//!         let all = fetch_all("/numbers", policy, &cancel, |page, _limit| async move {
//!             Ok(Page::new(vec![page], 3))
//!         })
//!         .await?;
//!         Ok(all)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let table = RouteTable::builder("demo://")
//!         .route("demo://numbers", "numbers", "Every number", Numbers)
//!         .unwrap()
//!         .build();
//!     let dispatcher = Dispatcher::new(table);
//!
//!     let policy = FetchPolicy { page_limit: 1, ..FetchPolicy::default() };
//!     let numbers = dispatcher.dispatch("demo://numbers", &policy).await.unwrap();
//!     assert_eq!(numbers.items, [1, 2, 3]);
//!
//!     let missing = dispatcher.dispatch("demo://letters", &policy).await;
//!     assert!(matches!(missing, Err(DispatchError::UnknownResource(_))));
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - The route table is read-only after [`RouteTableBuilder::build`] and shared via `Arc`
//! - Each dispatch owns its own accumulator; nothing mutable is shared between requests
//! - Pages are fetched one at a time, never in parallel
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockPages<T>`, a scripted page source with a fluent
//! expectation API, plus helpers for slicing fixture data into pages.

pub mod dispatcher;
pub mod error;
pub mod handler;
pub mod identifier;
pub mod mock;
pub mod pagination;
pub mod route;
pub mod template;
pub mod tracing;

// Re-export core types for convenience
pub use dispatcher::Dispatcher;
pub use error::{DispatchError, FetchError, ParseError, TemplateError};
pub use handler::ResourceHandler;
pub use identifier::ResourceIdentifier;
pub use pagination::{fetch_all, fetch_one, FetchPolicy, Page, PaginatedCollection};
pub use route::{Resolved, Route, RouteDescriptor, RouteTable, RouteTableBuilder};
pub use template::{AddressTemplate, ExtractedParameters, Segment};
