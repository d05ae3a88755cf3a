use async_trait::async_trait;
use derive_more::Constructor;
use reqwest::{Client, Url};
use serde_json::Value;
use crate::domain::{CatalogItem, GiveawayEntry};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> anyhow::Result<Vec<GiveawayEntry>>;
}

/// Client of the GamerPower giveaways API.
#[derive(Clone, Constructor)]
pub struct GamerPowerClient {
    http: Client,
    url: Url,
}

#[async_trait]
impl CatalogSource for GamerPowerClient {
    async fn fetch(&self) -> anyhow::Result<Vec<GiveawayEntry>> {
        log::debug!("fetching giveaways from {}", self.url);
        let body: Value = self.http.get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(parse_catalog(body))
    }
}

/// GamerPower responds with an array of giveaways, or with a status object
/// like `{"status": 0, "status_message": "..."}` when there are no active ones.
pub fn parse_catalog(body: Value) -> Vec<GiveawayEntry> {
    match body {
        Value::Array(items) => items.into_iter()
            .filter_map(|item| serde_json::from_value::<CatalogItem>(item)
                .inspect_err(|e| log::warn!("skipping a malformed giveaway: {e}"))
                .ok())
            .map(GiveawayEntry::from)
            .collect(),
        Value::Object(ref obj) if obj.get("status").and_then(Value::as_i64) == Some(0) => {
            log::info!("GamerPower returned zero active giveaways");
            Vec::new()
        }
        other => {
            log::warn!("unexpected GamerPower response: {other}");
            Vec::new()
        }
    }
}
