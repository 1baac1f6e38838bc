use crate::api::{HttpApi, SpaceTradersApi};
use crate::handlers::{route_table, ApiContext, ResourcePayload};
use crate::lifecycle::config::{Config, ConfigError};
use resource_framework::{DispatchError, Dispatcher, FetchPolicy, RouteDescriptor};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("route table is invalid: {0}")]
    Routes(#[from] resource_framework::TemplateError),
}

/// The wired-up resource layer: one remote client, one shared route table, one
/// shutdown token.
///
/// Every [`read`](Self::read) gets its own context with a child cancellation token,
/// so requests never share mutable state and [`shutdown`](Self::shutdown) stops all
/// of them at their next page boundary.
#[derive(Clone)]
pub struct ResourceSystem {
    api: Arc<dyn SpaceTradersApi>,
    policy: FetchPolicy,
    dispatcher: Dispatcher<ApiContext, ResourcePayload>,
    shutdown: CancellationToken,
}

impl ResourceSystem {
    pub fn new(api: Arc<dyn SpaceTradersApi>, policy: FetchPolicy) -> Result<Self, StartupError> {
        let dispatcher = Dispatcher::new(route_table()?);
        info!(routes = dispatcher.table().len(), "Resource system ready");
        Ok(Self {
            api,
            policy,
            dispatcher,
            shutdown: CancellationToken::new(),
        })
    }

    /// Connects to the live API described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, StartupError> {
        let api = HttpApi::new(&config.base_url, config.token.clone(), config.call_timeout)?;
        info!(base_url = %config.base_url, authenticated = config.token.is_some(), "HTTP client configured");
        Self::new(Arc::new(api), config.fetch_policy())
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    pub fn catalogue(&self) -> Vec<RouteDescriptor> {
        self.dispatcher.catalogue()
    }

    /// A fresh per-request context, cancelled by `shutdown` as well.
    pub fn context(&self) -> ApiContext {
        ApiContext::new(Arc::clone(&self.api), self.policy.clone()).with_cancel(self.shutdown.child_token())
    }

    #[instrument(skip(self))]
    pub async fn read(&self, uri: &str) -> Result<ResourcePayload, DispatchError> {
        self.dispatcher.dispatch(uri, &self.context()).await
    }

    /// Reads `uri` with a caller-supplied context (own clock or cancellation).
    pub async fn read_with(&self, uri: &str, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        self.dispatcher.dispatch(uri, ctx).await
    }

    /// Cancels every in-flight read. Reads started afterwards fail immediately.
    pub fn shutdown(&self) {
        info!("Shutting down resource system");
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
