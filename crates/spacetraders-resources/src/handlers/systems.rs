//! Handlers for public navigation data: systems, waypoints and the facilities at them.

use crate::api::endpoints;
use crate::handlers::{ApiContext, ResourcePayload};
use async_trait::async_trait;
use resource_framework::{fetch_all, fetch_one, DispatchError, ExtractedParameters, ResourceHandler};
use tracing::instrument;

/// `spacetraders://systems`
pub struct SystemList;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for SystemList {
    #[instrument(skip_all)]
    async fn handle(&self, _params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let api = ctx.api.as_ref();
        let systems = fetch_all(endpoints::SYSTEMS, &ctx.policy, &ctx.cancel, move |page, limit| {
            api.systems_page(page, limit)
        })
        .await?;
        Ok(ResourcePayload::Systems(systems))
    }
}

/// `spacetraders://systems/{systemSymbol}`
pub struct SystemDetail;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for SystemDetail {
    #[instrument(skip_all, fields(system = params.get("systemSymbol")))]
    async fn handle(&self, params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let system = params.require("systemSymbol")?;
        let found = fetch_one(&endpoints::system(system), &ctx.policy, &ctx.cancel, ctx.api.system(system)).await?;
        Ok(ResourcePayload::System(found))
    }
}

/// `spacetraders://systems/{systemSymbol}/waypoints`
pub struct WaypointList;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for WaypointList {
    #[instrument(skip_all, fields(system = params.get("systemSymbol")))]
    async fn handle(&self, params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let system = params.require("systemSymbol")?;
        let api = ctx.api.as_ref();
        let waypoints = fetch_all(&endpoints::waypoints(system), &ctx.policy, &ctx.cancel, move |page, limit| {
            api.waypoints_page(system, page, limit)
        })
        .await?;
        Ok(ResourcePayload::Waypoints(waypoints))
    }
}

/// `spacetraders://systems/{systemSymbol}/waypoints/{waypointSymbol}/market`
pub struct MarketDetail;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for MarketDetail {
    #[instrument(skip_all, fields(waypoint = params.get("waypointSymbol")))]
    async fn handle(&self, params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let system = params.require("systemSymbol")?;
        let waypoint = params.require("waypointSymbol")?;
        let market = fetch_one(
            &endpoints::market(system, waypoint),
            &ctx.policy,
            &ctx.cancel,
            ctx.api.market(system, waypoint),
        )
        .await?;
        Ok(ResourcePayload::Market(market))
    }
}

/// `spacetraders://systems/{systemSymbol}/waypoints/{waypointSymbol}/shipyard`
pub struct ShipyardDetail;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for ShipyardDetail {
    #[instrument(skip_all, fields(waypoint = params.get("waypointSymbol")))]
    async fn handle(&self, params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let system = params.require("systemSymbol")?;
        let waypoint = params.require("waypointSymbol")?;
        let shipyard = fetch_one(
            &endpoints::shipyard(system, waypoint),
            &ctx.policy,
            &ctx.cancel,
            ctx.api.shipyard(system, waypoint),
        )
        .await?;
        Ok(ResourcePayload::Shipyard(shipyard))
    }
}
