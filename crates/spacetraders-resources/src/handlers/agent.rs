use crate::api::endpoints;
use crate::handlers::{ApiContext, ResourcePayload};
use async_trait::async_trait;
use resource_framework::{fetch_one, DispatchError, ExtractedParameters, ResourceHandler};
use tracing::instrument;

/// `spacetraders://agent/info`
pub struct AgentInfo;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for AgentInfo {
    #[instrument(skip_all)]
    async fn handle(&self, _params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let agent = fetch_one(endpoints::AGENT, &ctx.policy, &ctx.cancel, ctx.api.agent()).await?;
        Ok(ResourcePayload::Agent(agent))
    }
}
