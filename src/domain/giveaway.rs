use serde::{Deserialize, Serialize};

const UNKNOWN_TITLE: &str = "Unknown Game";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display, derive_more::From)]
#[serde(transparent)]
pub struct GiveawayId(pub i64);

/// One free game listing as it's announced to the room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiveawayEntry {
    pub id: GiveawayId,
    pub title: String,
    pub worth: String,
    /// Comma-delimited, e.g. "PC, Steam".
    pub platforms: String,
    pub url: String,
    pub end_date: String,
}

/// Raw shape of a catalog item. Only `id` is mandatory, everything else falls back to placeholders.
#[derive(Debug, Deserialize)]
pub struct CatalogItem {
    id: GiveawayId,
    title: Option<String>,
    worth: Option<String>,
    platforms: Option<String>,
    open_giveaway_url: Option<String>,
    open_giveaway: Option<String>,
    gamerpower_url: Option<String>,
    end_date: Option<String>,
}

impl GiveawayEntry {
    pub fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.platforms
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

impl From<CatalogItem> for GiveawayEntry {
    fn from(item: CatalogItem) -> Self {
        let url = [item.open_giveaway_url, item.open_giveaway, item.gamerpower_url]
            .into_iter()
            .flatten()
            .find(|link| !link.is_empty())
            .unwrap_or_default();
        Self {
            id: item.id,
            title: item.title.unwrap_or_else(|| UNKNOWN_TITLE.to_owned()),
            worth: item.worth.unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            platforms: item.platforms.unwrap_or_default(),
            url,
            end_date: item.end_date.unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        }
    }
}
