use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::error::GatewayError;
use super::GameDataSource;

/// Loopback endpoint of the game client's live data API
pub const DEFAULT_BASE_URL: &str = "https://127.0.0.1:2999/liveclientdata";

/// Resources exposed under `/liveclientdata`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    AllGameData,
    ActivePlayer,
    ActivePlayerName,
    PlayerList,
    PlayerScores(String),
    PlayerItems(String),
    EventData,
    GameStats,
}

impl Resource {
    /// Path relative to the base URL
    pub fn path(&self) -> String {
        match self {
            Resource::AllGameData => "/allgamedata".to_string(),
            Resource::ActivePlayer => "/activeplayer".to_string(),
            Resource::ActivePlayerName => "/activeplayername".to_string(),
            Resource::PlayerList => "/playerlist".to_string(),
            Resource::PlayerScores(name) => {
                format!("/playerscores?summonerName={}", urlencoding::encode(name))
            }
            Resource::PlayerItems(name) => {
                format!("/playeritems?summonerName={}", urlencoding::encode(name))
            }
            Resource::EventData => "/eventdata".to_string(),
            Resource::GameStats => "/gamestats".to_string(),
        }
    }

    /// Parse a resource from its endpoint name, with an optional summoner
    /// name for per-player resources
    pub fn from_name(name: &str, summoner: Option<&str>) -> Option<Self> {
        let resource = match name.trim_start_matches('/').to_lowercase().as_str() {
            "allgamedata" => Resource::AllGameData,
            "activeplayer" => Resource::ActivePlayer,
            "activeplayername" => Resource::ActivePlayerName,
            "playerlist" => Resource::PlayerList,
            "playerscores" => Resource::PlayerScores(summoner?.to_string()),
            "playeritems" => Resource::PlayerItems(summoner?.to_string()),
            "eventdata" => Resource::EventData,
            "gamestats" => Resource::GameStats,
            _ => return None,
        };
        Some(resource)
    }
}

/// Client for the game client's local live data API.
///
/// The client serves a self-signed certificate on loopback, so certificate
/// validation is disabled. Every call is a single attempt: no retry, no
/// backoff, no caching.
pub struct LiveClientGateway {
    client: Client,
    base_url: String,
}

impl LiveClientGateway {
    /// Create a new gateway
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .no_proxy()
            .timeout(request_timeout)
            .build()
            .context("Failed to build live client HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base_url}{path}` and parse the body as JSON
    pub async fn fetch_resource(&self, path: &str) -> Result<Value, GatewayError> {
        let url = format!("{}{}", self.base_url, path);

        debug!("Fetching live client resource: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GatewayError::Network {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(GatewayError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| GatewayError::Network {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| GatewayError::Parse {
            url,
            reason: e.to_string(),
        })
    }

    /// Fetch a typed resource
    pub async fn fetch(&self, resource: &Resource) -> Result<Value, GatewayError> {
        self.fetch_resource(&resource.path()).await
    }

    pub async fn fetch_all_game_data(&self) -> Result<Value, GatewayError> {
        self.fetch(&Resource::AllGameData).await
    }

    pub async fn fetch_active_player(&self) -> Result<Value, GatewayError> {
        self.fetch(&Resource::ActivePlayer).await
    }

    pub async fn fetch_event_data(&self) -> Result<Value, GatewayError> {
        self.fetch(&Resource::EventData).await
    }

    pub async fn fetch_game_stats(&self) -> Result<Value, GatewayError> {
        self.fetch(&Resource::GameStats).await
    }

    /// Cheap liveness probe: true when `/gamestats` answers with JSON
    pub async fn is_game_in_progress(&self) -> bool {
        match self.fetch_game_stats().await {
            Ok(_) => true,
            Err(e) => {
                debug!("No game in progress: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl GameDataSource for LiveClientGateway {
    async fn fetch_snapshot(&self) -> Result<Value, GatewayError> {
        self.fetch_all_game_data().await
    }
}
