pub mod error;
pub mod live_client;

use async_trait::async_trait;
use serde_json::Value;

pub use error::GatewayError;
pub use live_client::{LiveClientGateway, Resource, DEFAULT_BASE_URL};

/// Anything that can produce a raw `/allgamedata` payload
#[async_trait]
pub trait GameDataSource: Send + Sync + 'static {
    async fn fetch_snapshot(&self) -> Result<Value, GatewayError>;
}
