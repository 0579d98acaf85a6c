//! Offline stand-in for the chat API, driven by a fixed table of exact inputs.

pub mod catalog;

use crate::config::DelayRange;
use crate::models::ChatTurn;
use anyhow::{Context, Result};
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use catalog::{ReplyBuilder, ENTRIES, FALLBACK_TEXT};

pub const TEMP_CHART_FILE: &str = "temp_chart.json";
pub const RH_CHART_FILE: &str = "rh_chart.json";

/// Chart documents embedded in two of the canned replies.
#[derive(Debug, Clone)]
pub struct ChartFixtures {
    pub temperature: Value,
    pub humidity: Value,
}

impl ChartFixtures {
    pub fn load(chart_dir: &Path) -> Result<Self> {
        Ok(Self {
            temperature: read_chart(&chart_dir.join(TEMP_CHART_FILE))?,
            humidity: read_chart(&chart_dir.join(RH_CHART_FILE))?,
        })
    }
}

fn read_chart(path: &Path) -> Result<Value> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart document: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse chart document: {}", path.display()))
}

pub struct CannedResponder {
    table: HashMap<&'static str, ReplyBuilder>,
    charts: ChartFixtures,
    delay: Option<DelayRange>,
}

impl CannedResponder {
    /// Load the chart fixtures from `chart_dir`; a missing file fails here,
    /// not when the matching entry is first requested.
    pub fn new(chart_dir: &Path, delay: Option<DelayRange>) -> Result<Self> {
        let charts = ChartFixtures::load(chart_dir)?;
        log::debug!("Loaded canned chart documents from {}", chart_dir.display());
        Ok(Self::with_charts(charts, delay))
    }

    pub fn with_charts(charts: ChartFixtures, delay: Option<DelayRange>) -> Self {
        Self {
            table: ENTRIES.iter().copied().collect(),
            charts,
            delay,
        }
    }

    pub fn normalize(input: &str) -> String {
        input.trim().to_lowercase()
    }

    /// Answer immediately, without simulated latency.
    pub fn lookup(&self, input: &str) -> ChatTurn {
        match self.table.get(Self::normalize(input).as_str()) {
            Some(build) => build(&self.charts),
            None => ChatTurn::ai(FALLBACK_TEXT),
        }
    }

    pub fn knows(&self, input: &str) -> bool {
        self.table.contains_key(Self::normalize(input).as_str())
    }

    /// Answer after a random delay drawn from the configured range.
    pub async fn respond(&self, input: &str) -> ChatTurn {
        if let Some(delay) = self.pick_delay() {
            log::debug!("Simulating {}ms of latency", delay.as_millis());
            tokio::time::sleep(delay).await;
        }
        self.lookup(input)
    }

    fn pick_delay(&self) -> Option<Duration> {
        let range = self.delay?;
        let (min, max) = (range.min.as_millis() as u64, range.max.as_millis() as u64);
        if max == 0 {
            return None;
        }
        let millis = rand::thread_rng().gen_range(min..=max);
        Some(Duration::from_millis(millis))
    }
}
