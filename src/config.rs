//! Client settings, overridable through a JSON blob in localStorage.

use serde::{Deserialize, Serialize};

use crate::util::storage_get;

pub const CONFIG_KEY: &str = "eg_config";
pub const SESSION_KEY: &str = "eg_session";
pub const NAME_KEY: &str = "eg_name";
pub const SEED_KEY: &str = "eg_seed";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Engine base URL. The page origin when unset.
    pub endpoint: Option<String>,
    pub log_level: String,
    /// Chart canvas height in pixels; width follows the container.
    pub chart_height: f64,
    pub default_seed: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            log_level: "info".to_string(),
            chart_height: 260.0,
            default_seed: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn load() -> Self {
        storage_get(CONFIG_KEY)
            .map(|raw| Self::from_json(&raw))
            .unwrap_or_default()
    }

    pub fn endpoint(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
}
