//! # ResourceHandler Trait
//!
//! The `ResourceHandler` trait is the contract every route target implements. A handler
//! receives the parameters the parser already extracted plus a caller-supplied context
//! (the remote client, the fetch policy, a cancellation token, ...) and produces the
//! typed result for its resource.
//!
//! # Context Injection
//! The context type `C` is chosen by the application and handed to
//! [`Dispatcher::dispatch`](crate::Dispatcher::dispatch) on every call, not at
//! construction time. The route table therefore stays free of remote clients and can
//! be built once and shared between any number of concurrent dispatches.
//!
//! # Rules for Implementors
//! - Read identifier values only through [`ExtractedParameters`]; never look at the
//!   raw identifier string.
//! - Orchestrate, don't parse: call [`fetch_all`](crate::fetch_all) /
//!   [`fetch_one`](crate::fetch_one) and shape the result.

use crate::error::DispatchError;
use crate::template::ExtractedParameters;
use async_trait::async_trait;

/// A route target producing `R` from extracted parameters and a context `C`.
///
/// # Example
///
/// ```rust
/// use resource_framework::{DispatchError, ExtractedParameters, ResourceHandler};
/// use async_trait::async_trait;
///
/// struct Echo;
///
/// #[async_trait]
/// impl ResourceHandler<(), String> for Echo {
///     async fn handle(&self, params: &ExtractedParameters, _ctx: &()) -> Result<String, DispatchError> {
///         Ok(params.require("name")?.to_uppercase())
///     }
/// }
/// ```
#[async_trait]
pub trait ResourceHandler<C, R>: Send + Sync {
    async fn handle(&self, params: &ExtractedParameters, ctx: &C) -> Result<R, DispatchError>;
}
