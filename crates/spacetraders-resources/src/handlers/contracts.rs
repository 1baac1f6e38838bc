use crate::analysis::ContractDeadlineView;
use crate::api::endpoints;
use crate::handlers::{ApiContext, ResourcePayload};
use async_trait::async_trait;
use resource_framework::{fetch_all, DispatchError, ExtractedParameters, ResourceHandler};
use tracing::instrument;

/// `spacetraders://contracts/list`
///
/// Deadlines are evaluated against the context's clock, once per dispatch.
pub struct ContractList;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for ContractList {
    #[instrument(skip_all)]
    async fn handle(&self, _params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let api = ctx.api.as_ref();
        let contracts = fetch_all(endpoints::CONTRACTS, &ctx.policy, &ctx.cancel, move |page, limit| {
            api.contracts_page(page, limit)
        })
        .await?;

        let now = ctx.now;
        Ok(ResourcePayload::Contracts(
            contracts.map(|contract| ContractDeadlineView::analyze(contract, now)),
        ))
    }
}
