//! # Dispatcher
//!
//! Routes an identifier to its handler: resolve through the shared [`RouteTable`],
//! then invoke the bound [`ResourceHandler`](crate::ResourceHandler) with the
//! extracted parameters and the caller's context.

use crate::error::DispatchError;
use crate::route::{RouteDescriptor, RouteTable};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A cheap-to-clone handle over an immutable route table.
///
/// Dispatches share nothing but the table, so any number of them may run at once.
pub struct Dispatcher<C, R> {
    table: Arc<RouteTable<C, R>>,
}

impl<C, R> Clone for Dispatcher<C, R> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

impl<C, R> Dispatcher<C, R>
where
    C: Send + Sync,
{
    pub fn new(table: RouteTable<C, R>) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &RouteTable<C, R> {
        &self.table
    }

    pub fn catalogue(&self) -> Vec<RouteDescriptor> {
        self.table.catalogue()
    }

    /// Resolves `identifier` and runs its handler with `ctx`.
    #[instrument(skip(self, ctx))]
    pub async fn dispatch(&self, identifier: &str, ctx: &C) -> Result<R, DispatchError> {
        let resolved = self.table.resolve(identifier).inspect_err(|e| {
            warn!(error = %e, "Dispatch rejected");
        })?;

        let route = resolved.route.name();
        let result = resolved.route.handler().handle(&resolved.params, ctx).await;
        match &result {
            Ok(_) => info!(route, "Dispatch ok"),
            Err(e) => warn!(route, error = %e, "Dispatch failed"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ResourceHandler;
    use crate::template::ExtractedParameters;
    use async_trait::async_trait;

    struct Named(&'static str);

    #[async_trait]
    impl ResourceHandler<(), String> for Named {
        async fn handle(&self, params: &ExtractedParameters, _ctx: &()) -> Result<String, DispatchError> {
            let args: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            Ok(format!("{}({})", self.0, args.join(",")))
        }
    }

    fn dispatcher() -> Dispatcher<(), String> {
        let table = RouteTable::builder("test://")
            .route("test://items", "items", "All items", Named("list"))
            .and_then(|b| b.route("test://items/{id}", "item", "One item", Named("one")))
            .and_then(|b| b.route("test://items/{id}/parts", "parts", "Parts", Named("parts")))
            .unwrap()
            .build();
        Dispatcher::new(table)
    }

    #[tokio::test]
    async fn routes_by_shape() {
        let d = dispatcher();
        assert_eq!(d.dispatch("test://items", &()).await.unwrap(), "list()");
        assert_eq!(d.dispatch("test://items/7", &()).await.unwrap(), "one(id=7)");
        assert_eq!(d.dispatch("test://items/7/parts", &()).await.unwrap(), "parts(id=7)");
    }

    #[tokio::test]
    async fn unknown_shapes_are_not_found() {
        let d = dispatcher();
        for id in ["test://things", "test://items/7/other", "test://items/7/parts/x"] {
            assert!(matches!(
                d.dispatch(id, &()).await,
                Err(DispatchError::UnknownResource(_))
            ));
        }
    }

    #[tokio::test]
    async fn clones_share_the_table() {
        let d = dispatcher();
        let other = d.clone();
        assert!(std::ptr::eq(d.table(), other.table()));
        assert_eq!(other.catalogue().len(), 3);
    }
}
