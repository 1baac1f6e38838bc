mod common;

use common::{now, system_with, universe};
use resource_framework::{DispatchError, FetchError, ParseError};
use spacetraders_resources::analysis::{ContractState, CooldownPriority};
use spacetraders_resources::api::MockApi;
use spacetraders_resources::handlers::ResourcePayload;
use spacetraders_resources::model::NavStatus;
use std::sync::Arc;

#[tokio::test]
async fn test_agent_info() {
    let system = system_with(universe(), 20);
    match system.read("spacetraders://agent/info").await.unwrap() {
        ResourcePayload::Agent(agent) => {
            assert_eq!(agent.symbol, "NOVA");
            assert_eq!(agent.credits, 175000);
        }
        other => panic!("Expected agent, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fleet_is_aggregated_across_pages() {
    let api = universe();
    let system = system_with(api.clone(), 2);

    match system.read("spacetraders://ships/list").await.unwrap() {
        ResourcePayload::Fleet { ships, summary } => {
            let symbols: Vec<&str> = ships.iter().map(|s| s.symbol.as_str()).collect();
            assert_eq!(symbols, ["NOVA-1", "NOVA-2", "NOVA-3"]);
            assert_eq!(ships.total, 3);
            assert_eq!(summary.ship_count, 3);
            assert_eq!(summary.by_nav_status[&NavStatus::Docked], 1);
            assert_eq!(summary.by_nav_status[&NavStatus::InOrbit], 1);
            assert_eq!(summary.by_nav_status[&NavStatus::InTransit], 1);
            assert_eq!(summary.on_cooldown, 1);
        }
        other => panic!("Expected fleet, got {other:?}"),
    }
    assert_eq!(api.calls(), ["/my/ships?page=1", "/my/ships?page=2"]);
}

#[tokio::test]
async fn test_ship_detail_derives_status() {
    let system = system_with(universe(), 20);
    match system.read("spacetraders://ships/NOVA-2").await.unwrap() {
        ResourcePayload::Ship(view) => {
            assert_eq!(view.ship.symbol, "NOVA-2");
            assert_eq!(view.fuel_percent, Some(75.0));
            assert_eq!(view.cargo_utilization, Some(25.0));
            assert_eq!(view.cooldown.status.priority, CooldownPriority::Short);
            assert!(!view.can_act);
        }
        other => panic!("Expected ship, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ship_cooldown_is_classified() {
    let system = system_with(universe(), 20);

    match system.read("spacetraders://ships/NOVA-2/cooldown").await.unwrap() {
        ResourcePayload::Cooldown(view) => {
            assert_eq!(view.remaining_seconds, 90);
            assert_eq!(view.status.priority, CooldownPriority::Short);
            assert_eq!(view.status.human_time_display, "1m 30s");
            assert!(view.status.is_blocked("extract"));
            assert!(view.status.permitted_operations.contains("navigate"));
        }
        other => panic!("Expected cooldown, got {other:?}"),
    }

    // No active cooldown on the remote means ready.
    match system.read("spacetraders://ships/NOVA-1/cooldown").await.unwrap() {
        ResourcePayload::Cooldown(view) => {
            assert_eq!(view.ship_symbol, "NOVA-1");
            assert_eq!(view.status.priority, CooldownPriority::Ready);
            assert_eq!(view.status.human_time_display, "Ready now");
            assert!(view.status.blocked_operations.is_empty());
        }
        other => panic!("Expected cooldown, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_ship_surfaces_remote_status() {
    let system = system_with(universe(), 20);
    let err = system.read("spacetraders://ships/GHOST/cooldown").await.unwrap_err();
    assert_eq!(
        err,
        DispatchError::Fetch(FetchError::RemoteStatus {
            endpoint: "/my/ships/GHOST/cooldown".into(),
            page: None,
            status: 404,
            message: "not found".into(),
        })
    );
}

#[tokio::test]
async fn test_contract_deadlines_use_the_context_clock() {
    let system = system_with(universe(), 1);
    let ctx = system.context().at(now());

    match system.read_with("spacetraders://contracts/list", &ctx).await.unwrap() {
        ResourcePayload::Contracts(contracts) => {
            assert_eq!(contracts.len(), 2);
            let open = &contracts.items[0];
            assert_eq!(open.contract.id, "c-open");
            assert_eq!(open.state, ContractState::Open);
            assert_eq!(open.seconds_to_deadline, 3725);
            assert_eq!(open.deadline_display, "1h 2m 5s");
            assert_eq!((open.units_required, open.units_fulfilled), (50, 20));

            let late = &contracts.items[1];
            assert_eq!(late.state, ContractState::Expired);
            assert_eq!(late.seconds_to_deadline, 0);
        }
        other => panic!("Expected contracts, got {other:?}"),
    }
}

#[tokio::test]
async fn test_systems_root_entity_and_trailing_slash() {
    let system = system_with(universe(), 2);

    match system.read("spacetraders://systems").await.unwrap() {
        ResourcePayload::Systems(all) => {
            assert_eq!(all.total, 5);
            assert_eq!(all.items[4].symbol, "X1-IJ");
        }
        other => panic!("Expected systems, got {other:?}"),
    }

    match system.read("spacetraders://systems/X1-AB").await.unwrap() {
        ResourcePayload::System(one) => assert_eq!(one.symbol, "X1-AB"),
        other => panic!("Expected system, got {other:?}"),
    }

    assert_eq!(
        system.read("spacetraders://systems/").await.unwrap_err(),
        DispatchError::InvalidIdentifier(ParseError::EmptyParameter {
            name: "systemSymbol".into()
        })
    );
}

#[tokio::test]
async fn test_percent_encoded_symbols_are_decoded() {
    let system = system_with(universe(), 20);
    match system.read("spacetraders://systems/X1%2DAB").await.unwrap() {
        ResourcePayload::System(one) => assert_eq!(one.symbol, "X1-AB"),
        other => panic!("Expected system, got {other:?}"),
    }
}

#[tokio::test]
async fn test_waypoints_market_and_shipyard() {
    let api = universe();
    let system = system_with(api.clone(), 3);

    match system.read("spacetraders://systems/X1-AB/waypoints").await.unwrap() {
        ResourcePayload::Waypoints(all) => {
            assert_eq!(all.len(), 7);
            assert_eq!(all.items[0].symbol, "X1-AB-B1");
            assert_eq!(all.items[6].symbol, "X1-AB-B7");
        }
        other => panic!("Expected waypoints, got {other:?}"),
    }
    assert_eq!(
        api.calls(),
        [
            "/systems/X1-AB/waypoints?page=1",
            "/systems/X1-AB/waypoints?page=2",
            "/systems/X1-AB/waypoints?page=3"
        ]
    );

    match system
        .read("spacetraders://systems/X1-AB/waypoints/X1-AB-B1/market")
        .await
        .unwrap()
    {
        ResourcePayload::Market(market) => {
            assert_eq!(market.symbol, "X1-AB-B1");
            assert_eq!(market.trade_goods.map(|g| g.len()), Some(1));
        }
        other => panic!("Expected market, got {other:?}"),
    }

    match system
        .read("spacetraders://systems/X1-AB/waypoints/X1-AB-B2/shipyard")
        .await
        .unwrap()
    {
        ResourcePayload::Shipyard(yard) => assert_eq!(yard.ship_types.len(), 2),
        other => panic!("Expected shipyard, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_and_malformed_identifiers() {
    let system = system_with(universe(), 20);

    assert_eq!(
        system.read("spacetraders://bogus/thing").await.unwrap_err(),
        DispatchError::UnknownResource("spacetraders://bogus/thing".into())
    );
    assert!(matches!(
        system.read("spacetraders://systems/X1-AB/waypoints/X1-AB-B1/jumpgate").await,
        Err(DispatchError::UnknownResource(_))
    ));
    assert!(matches!(
        system.read("https://api.spacetraders.io/v2/systems").await,
        Err(DispatchError::InvalidIdentifier(ParseError::InvalidScheme { .. }))
    ));
}

#[tokio::test]
async fn test_page_failure_fails_the_whole_read() {
    let api = universe().fail_on(
        "/systems",
        Some(2),
        FetchError::RemoteStatus {
            endpoint: "/systems".into(),
            page: None,
            status: 429,
            message: "rate limited".into(),
        },
    );
    let system = system_with(api, 2);

    let err = system.read("spacetraders://systems").await.unwrap_err();
    match err {
        DispatchError::Fetch(fetch) => {
            assert_eq!(fetch.page(), Some(2));
            assert!(fetch.to_string().contains("/systems (page 2)"));
        }
        other => panic!("Expected fetch error, got {other:?}"),
    }

    // The failure does not leak into unrelated requests.
    assert!(system.read("spacetraders://systems/X1-CD").await.is_ok());
}

#[tokio::test]
async fn test_shutdown_cancels_reads() {
    let system = system_with(universe(), 2);
    system.shutdown();
    assert!(system.is_shut_down());

    assert_eq!(
        system.read("spacetraders://systems").await.unwrap_err(),
        DispatchError::Fetch(FetchError::Cancelled {
            endpoint: "/systems".into(),
            page: Some(1),
        })
    );
    assert!(matches!(
        system.read("spacetraders://agent/info").await,
        Err(DispatchError::Fetch(FetchError::Cancelled { page: None, .. }))
    ));
}

#[tokio::test]
async fn test_concurrent_reads_share_one_system() {
    let system = system_with(universe(), 2);
    let (fleet, systems, agent) = tokio::join!(
        system.read("spacetraders://ships/list"),
        system.read("spacetraders://systems"),
        system.read("spacetraders://agent/info"),
    );
    assert!(matches!(fleet, Ok(ResourcePayload::Fleet { .. })));
    assert!(matches!(systems, Ok(ResourcePayload::Systems(_))));
    assert!(matches!(agent, Ok(ResourcePayload::Agent(_))));
}

#[tokio::test]
async fn test_catalogue_lists_every_template() {
    let system = system_with(MockApi::new(), 20);
    let catalogue = system.catalogue();
    assert_eq!(catalogue.len(), 10);
    assert_eq!(catalogue[0].uri_template, "spacetraders://agent/info");
    assert!(catalogue.iter().all(|d| d.mime_type == "application/json"));
    assert!(catalogue
        .iter()
        .any(|d| d.uri_template == "spacetraders://systems/{systemSymbol}/waypoints/{waypointSymbol}/shipyard"));
}

#[tokio::test]
async fn test_mock_api_can_back_a_system_directly() {
    let api = Arc::new(universe());
    let system = spacetraders_resources::lifecycle::ResourceSystem::new(api.clone(), common::policy(20)).unwrap();
    system.read("spacetraders://agent/info").await.unwrap();
    assert_eq!(api.calls(), ["/my/agent"]);
}
