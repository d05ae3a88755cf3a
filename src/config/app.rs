use std::fmt::{Debug, Formatter};
use std::path::PathBuf;
use std::time::Duration;
use reqwest::Url;
use crate::config::env::*;
use crate::domain::AllowList;

pub const DEFAULT_CATALOG_URL: &str = "https://www.gamerpower.com/api/giveaways?type=game&platform=pc";
pub const DEFAULT_ALLOWED_PLATFORMS: &str = "Epic Games Store,Steam,GOG";
const DEFAULT_STATE_FILE: &str = "state.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub allowed_platforms: AllowList,
    pub state_file: PathBuf,
    pub catalog_url: Url,
    pub http_timeout: Duration,
    /// `None` means a single run, after which the process exits.
    pub run_interval: Option<Duration>,
}

#[derive(Clone)]
pub struct MatrixConfig {
    pub homeserver: Url,
    pub user: String,
    pub access_token: String,
    pub room_id: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let allowed_platforms = get_env_value_or_default("ALLOWED_PLATFORMS", DEFAULT_ALLOWED_PLATFORMS.parse::<AllowList>()?);
        if allowed_platforms.is_empty() {
            log::warn!("ALLOWED_PLATFORMS is empty, no giveaway will ever be announced");
        }
        let state_file: String = get_env_value_or_default("STATE_FILE", DEFAULT_STATE_FILE.to_owned());
        let catalog_url = get_env_value_or_default("GAMERPOWER_API", DEFAULT_CATALOG_URL.parse()?);
        let http_timeout = match get_env_value_or_default("HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS) {
            0 => {
                log::warn!("HTTP_TIMEOUT_SECS must be positive, using the default value {DEFAULT_HTTP_TIMEOUT_SECS}");
                DEFAULT_HTTP_TIMEOUT_SECS
            }
            secs => secs
        };
        let run_interval = get_env_value_or_default("RUN_INTERVAL_SECS", 0u64);
        Ok(Self {
            allowed_platforms,
            state_file: PathBuf::from(state_file),
            catalog_url,
            http_timeout: Duration::from_secs(http_timeout),
            run_interval: (run_interval > 0).then(|| Duration::from_secs(run_interval)),
        })
    }
}

impl MatrixConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            homeserver: get_env_mandatory_value("MATRIX_HOMESERVER")?,
            user: get_env_mandatory_value("MATRIX_USER")?,
            access_token: get_env_mandatory_value("MATRIX_ACCESS_TOKEN")?,
            room_id: get_env_mandatory_value("MATRIX_ROOM_ID")?,
        })
    }
}

// the access token must never end up in the logs
impl Debug for MatrixConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixConfig")
            .field("homeserver", &self.homeserver.as_str())
            .field("user", &self.user)
            .field("access_token", &"<redacted>")
            .field("room_id", &self.room_id)
            .finish()
    }
}
