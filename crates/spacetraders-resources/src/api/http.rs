//! # HTTP Client
//!
//! `HttpApi` implements [`SpaceTradersApi`] over `reqwest`.
//!
//! Every successful response is wrapped in an envelope:
//!
//! ```json
//! { "data": ..., "meta": { "total": 42, "page": 1, "limit": 20 } }
//! ```
//!
//! `meta` is only present on collection endpoints. Failed responses carry
//! `{ "error": { "message": "...", "code": 4000 } }`, whose message ends up in
//! [`FetchError::RemoteStatus`].

use crate::api::{endpoints, SpaceTradersApi};
use crate::lifecycle::ConfigError;
use crate::model::{Agent, Contract, Cooldown, Market, Ship, Shipyard, System, Waypoint};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode, Url};
use resource_framework::{FetchError, Page};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Deserialize)]
struct Meta {
    total: usize,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: RemoteError,
}

#[derive(Deserialize)]
struct RemoteError {
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

/// Client for the live SpaceTraders API.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpApi {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                message: "not a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues `GET {base}{endpoint}` and returns the raw status and body.
    async fn get(&self, endpoint: &str, paging: Option<(u32, u32)>) -> Result<(StatusCode, String), FetchError> {
        let page = paging.map(|(page, _)| page);
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, endpoint))
            .header(ACCEPT, "application/json");
        if let Some((page, limit)) = paging {
            request = request.query(&[("page", page), ("limit", limit)]);
        }
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| self.transport_error(endpoint, page, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(endpoint, page, e))?;
        debug!(endpoint, ?page, status = status.as_u16(), bytes = body.len(), "Response received");
        Ok((status, body))
    }

    fn transport_error(&self, endpoint: &str, page: Option<u32>, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                endpoint: endpoint.to_string(),
                page,
                after: self.timeout,
            }
        } else {
            FetchError::Transport {
                endpoint: endpoint.to_string(),
                page,
                message: e.to_string(),
            }
        }
    }

    async fn entity<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let (status, body) = self.get(endpoint, None).await?;
        decode_entity(endpoint, status, &body)
    }

    async fn page<T: DeserializeOwned>(&self, endpoint: &str, page: u32, limit: u32) -> Result<Page<T>, FetchError> {
        let (status, body) = self.get(endpoint, Some((page, limit))).await?;
        decode_page(endpoint, page, status, &body)
    }
}

/// Decodes a single-entity response.
pub(crate) fn decode_entity<T: DeserializeOwned>(endpoint: &str, status: StatusCode, body: &str) -> Result<T, FetchError> {
    check_status(endpoint, None, status, body)?;
    let envelope: Envelope<T> = decode(endpoint, None, body)?;
    Ok(envelope.data)
}

/// Decodes one page of a collection response. A page without `meta` is a decode failure.
pub(crate) fn decode_page<T: DeserializeOwned>(
    endpoint: &str,
    page: u32,
    status: StatusCode,
    body: &str,
) -> Result<Page<T>, FetchError> {
    check_status(endpoint, Some(page), status, body)?;
    let envelope: Envelope<Vec<T>> = decode(endpoint, Some(page), body)?;
    let meta = envelope.meta.ok_or_else(|| FetchError::DecodeFailure {
        endpoint: endpoint.to_string(),
        page: Some(page),
        message: "missing pagination meta".to_string(),
    })?;
    Ok(Page::new(envelope.data, meta.total))
}

fn decode<T: DeserializeOwned>(endpoint: &str, page: Option<u32>, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::DecodeFailure {
        endpoint: endpoint.to_string(),
        page,
        message: e.to_string(),
    })
}

fn check_status(endpoint: &str, page: Option<u32>, status: StatusCode, body: &str) -> Result<(), FetchError> {
    if status.is_success() {
        return Ok(());
    }
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => match error.code {
            Some(code) => format!("{} (code {code})", error.message),
            None => error.message,
        },
        Err(_) if body.trim().is_empty() => status.canonical_reason().unwrap_or("no reason").to_string(),
        Err(_) => body.trim().to_string(),
    };
    warn!(endpoint, ?page, status = status.as_u16(), %message, "Remote returned an error");
    Err(FetchError::RemoteStatus {
        endpoint: endpoint.to_string(),
        page,
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SpaceTradersApi for HttpApi {
    #[instrument(skip(self))]
    async fn agent(&self) -> Result<Agent, FetchError> {
        self.entity(endpoints::AGENT).await
    }

    #[instrument(skip(self))]
    async fn ships_page(&self, page: u32, limit: u32) -> Result<Page<Ship>, FetchError> {
        self.page(endpoints::SHIPS, page, limit).await
    }

    #[instrument(skip(self))]
    async fn ship(&self, ship_symbol: &str) -> Result<Ship, FetchError> {
        self.entity(&endpoints::ship(ship_symbol)).await
    }

    #[instrument(skip(self))]
    async fn ship_cooldown(&self, ship_symbol: &str) -> Result<Option<Cooldown>, FetchError> {
        let endpoint = endpoints::ship_cooldown(ship_symbol);
        let (status, body) = self.get(&endpoint, None).await?;
        if status == StatusCode::NO_CONTENT {
            debug!(ship_symbol, "No active cooldown");
            return Ok(None);
        }
        decode_entity(&endpoint, status, &body).map(Some)
    }

    #[instrument(skip(self))]
    async fn contracts_page(&self, page: u32, limit: u32) -> Result<Page<Contract>, FetchError> {
        self.page(endpoints::CONTRACTS, page, limit).await
    }

    #[instrument(skip(self))]
    async fn systems_page(&self, page: u32, limit: u32) -> Result<Page<System>, FetchError> {
        self.page(endpoints::SYSTEMS, page, limit).await
    }

    #[instrument(skip(self))]
    async fn system(&self, system_symbol: &str) -> Result<System, FetchError> {
        self.entity(&endpoints::system(system_symbol)).await
    }

    #[instrument(skip(self))]
    async fn waypoints_page(&self, system_symbol: &str, page: u32, limit: u32) -> Result<Page<Waypoint>, FetchError> {
        self.page(&endpoints::waypoints(system_symbol), page, limit).await
    }

    #[instrument(skip(self))]
    async fn market(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Market, FetchError> {
        self.entity(&endpoints::market(system_symbol, waypoint_symbol)).await
    }

    #[instrument(skip(self))]
    async fn shipyard(&self, system_symbol: &str, waypoint_symbol: &str) -> Result<Shipyard, FetchError> {
        self.entity(&endpoints::shipyard(system_symbol, waypoint_symbol)).await
    }
}
