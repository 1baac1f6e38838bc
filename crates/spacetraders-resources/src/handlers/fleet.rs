//! Handlers for the agent's ships.

use crate::analysis::{CooldownView, FleetSummary, ShipStatusView};
use crate::api::endpoints;
use crate::handlers::{ApiContext, ResourcePayload};
use async_trait::async_trait;
use resource_framework::{fetch_all, fetch_one, DispatchError, ExtractedParameters, ResourceHandler};
use tracing::{debug, instrument};

/// `spacetraders://ships/list`
pub struct ShipList;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for ShipList {
    #[instrument(skip_all)]
    async fn handle(&self, _params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let api = ctx.api.as_ref();
        let ships = fetch_all(endpoints::SHIPS, &ctx.policy, &ctx.cancel, move |page, limit| {
            api.ships_page(page, limit)
        })
        .await?;

        let summary = FleetSummary::from_ships(ships.iter());
        debug!(ships = summary.ship_count, on_cooldown = summary.on_cooldown, "Fleet summarised");
        Ok(ResourcePayload::Fleet { ships, summary })
    }
}

/// `spacetraders://ships/{shipSymbol}`
pub struct ShipDetail;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for ShipDetail {
    #[instrument(skip_all, fields(ship = params.get("shipSymbol")))]
    async fn handle(&self, params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let symbol = params.require("shipSymbol")?;
        let ship = fetch_one(&endpoints::ship(symbol), &ctx.policy, &ctx.cancel, ctx.api.ship(symbol)).await?;
        Ok(ResourcePayload::Ship(Box::new(ShipStatusView::from_ship(ship))))
    }
}

/// `spacetraders://ships/{shipSymbol}/cooldown`
///
/// Always reflects the remote's answer at request time; nothing is cached between
/// requests.
pub struct ShipCooldown;

#[async_trait]
impl ResourceHandler<ApiContext, ResourcePayload> for ShipCooldown {
    #[instrument(skip_all, fields(ship = params.get("shipSymbol")))]
    async fn handle(&self, params: &ExtractedParameters, ctx: &ApiContext) -> Result<ResourcePayload, DispatchError> {
        let symbol = params.require("shipSymbol")?;
        let record = fetch_one(
            &endpoints::ship_cooldown(symbol),
            &ctx.policy,
            &ctx.cancel,
            ctx.api.ship_cooldown(symbol),
        )
        .await?;

        let view = match record {
            Some(record) => CooldownView::from_record(&record),
            None => CooldownView::idle(symbol),
        };
        Ok(ResourcePayload::Cooldown(view))
    }
}
