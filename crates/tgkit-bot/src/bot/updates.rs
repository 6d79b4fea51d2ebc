use serde::Serialize;
use serde_json::Value;
use tgkit_core::error::TgError;
use tgkit_core::update::Update;

use super::Bot;

/// Parameters of a `getUpdates` long poll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GetUpdates {
    /// First update to return. Acknowledges everything below it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// 1-100.
    pub limit: u32,
    /// Seconds the server may hold the request open. 0 = short poll.
    pub timeout: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<String>,
}

impl Bot {
    /// One `getUpdates` call. Any failure, including a single update
    /// without `update_id`, fails the whole call.
    pub async fn get_updates(&self, params: &GetUpdates) -> Result<Vec<Update>, TgError> {
        let body = serde_json::to_value(params)?;
        let raw: Vec<Value> = self.call("getUpdates", body).await?;
        raw.into_iter().map(Update::from_value).collect()
    }
}
