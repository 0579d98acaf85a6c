use serde::{Deserialize, Serialize};

use crate::config::defaults::{default_max_delay_ms, default_min_delay_ms};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CannedConfig {
    #[serde(default)]
    pub chart_dir: Option<String>,
    #[serde(default)]
    pub simulate_latency: Option<bool>,
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for CannedConfig {
    fn default() -> Self {
        Self {
            chart_dir: None,
            simulate_latency: None,
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}
