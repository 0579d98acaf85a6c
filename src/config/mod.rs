mod api;
mod canned;
mod defaults;
mod validation;

use crate::api::DEFAULT_CHAT_ENDPOINT;
use crate::cli::Args;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use api::ApiConfig;
pub use canned::CannedConfig;
pub use defaults::{DEFAULT_CHART_DIR, DEFAULT_LOG_FILE};
pub use validation::{expand_env_var_in_string, validate_delay_range, validate_endpoint};

/// Where replies come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReplySourceKind {
    /// The remote Abot chat API.
    #[default]
    Remote,
    /// The offline demo table.
    Canned,
}

impl ReplySourceKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "remote" | "api" => Some(ReplySourceKind::Remote),
            "canned" | "offline" | "demo" => Some(ReplySourceKind::Canned),
            _ => None,
        }
    }
}

/// Artificial latency for canned replies, uniform in `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub reply_source: Option<ReplySourceKind>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            verbose: None,
            reply_source: None,
            worker_threads: None,
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub canned: CannedConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_endpoint: String,
    pub request_timeout: Option<Duration>,
    pub reply_source: ReplySourceKind,
    pub chart_dir: PathBuf,
    pub canned_delay: Option<DelayRange>,
    pub worker_threads: usize,
    pub verbose: bool,
    pub log_file: PathBuf,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = FileConfig::load()?;
        Self::resolve(args, |key| env::var(key).ok(), file_config)
    }

    /// Resolve every setting with precedence CLI args > env vars > config
    /// file > defaults.
    pub fn resolve<F>(args: &Args, env_lookup: F, file_config: FileConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_endpoint = args
            .endpoint
            .clone()
            .or_else(|| env_lookup("ABOT_API_ENDPOINT"))
            .or(file_config.api.endpoint.clone())
            .map(|endpoint| expand_env_var_in_string(&endpoint, &env_lookup))
            .unwrap_or_else(|| DEFAULT_CHAT_ENDPOINT.to_string());
        validate_endpoint(&api_endpoint).map_err(|e| anyhow!(e))?;

        let env_timeout = match env_lookup("ABOT_REQUEST_TIMEOUT").filter(|_| args.timeout.is_none()) {
            Some(value) => Some(value.trim().parse::<u64>().map_err(|_| {
                anyhow!("ABOT_REQUEST_TIMEOUT must be a number of seconds, got '{}'", value)
            })?),
            None => None,
        };
        let request_timeout = args
            .timeout
            .or(env_timeout)
            .or(file_config.api.timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let reply_source = match args.source {
            Some(source) => source,
            None => match env_lookup("ABOT_REPLY_SOURCE") {
                Some(value) => ReplySourceKind::parse(&value).ok_or_else(|| {
                    anyhow!("ABOT_REPLY_SOURCE must be 'remote' or 'canned', got '{}'", value)
                })?,
                None => file_config.session.reply_source.unwrap_or_default(),
            },
        };

        let chart_dir = args
            .chart_dir
            .clone()
            .or_else(|| env_lookup("ABOT_CHART_DIR").map(PathBuf::from))
            .or_else(|| {
                file_config
                    .canned
                    .chart_dir
                    .as_deref()
                    .map(|dir| PathBuf::from(expand_env_var_in_string(dir, &env_lookup)))
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CHART_DIR));

        let env_delay = match env_lookup("ABOT_CANNED_DELAY").filter(|_| !args.no_delay) {
            Some(value) => Some(parse_flag(&value).ok_or_else(|| {
                anyhow!("ABOT_CANNED_DELAY must be a boolean flag, got '{}'", value)
            })?),
            None => None,
        };
        let simulate_latency = !args.no_delay
            && env_delay
                .or(file_config.canned.simulate_latency)
                .unwrap_or(true);
        let canned_delay = if simulate_latency {
            let (min_ms, max_ms) = (file_config.canned.min_delay_ms, file_config.canned.max_delay_ms);
            validate_delay_range(min_ms, max_ms).map_err(|e| anyhow!(e))?;
            Some(DelayRange {
                min: Duration::from_millis(min_ms),
                max: Duration::from_millis(max_ms),
            })
        } else {
            None
        };

        let worker_threads = args
            .worker_threads
            .or(file_config.session.worker_threads)
            .unwrap_or_else(defaults::default_worker_threads);
        if worker_threads == 0 {
            return Err(anyhow!("Worker pool needs at least one thread"));
        }

        let verbose = args.verbose
            || env_lookup("ABOT_VERBOSE")
                .and_then(|v| parse_flag(&v))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        let log_file = args
            .log_file
            .clone()
            .or_else(|| file_config.session.log_file.as_deref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(Config {
            api_endpoint,
            request_timeout,
            reply_source,
            chart_dir,
            canned_delay,
            worker_threads,
            verbose,
            log_file,
        })
    }
}

const EXAMPLE_CONFIG: &str = r#"# Abot chat configuration
api:
  endpoint: "https://api.abot.phaidelta.com/chat"
  # timeout_secs: 30

session:
  reply_source: remote   # remote | canned
  worker_threads: 2
  verbose: false
  # log_file: abot.log

canned:
  chart_dir: charts
  simulate_latency: true
  min_delay_ms: 500
  max_delay_ms: 2000
"#;

impl FileConfig {
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        if extension == Some("json") {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))
        } else {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))
        }
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".abot.yaml"),
            PathBuf::from(".abot.yml"),
            PathBuf::from(".abot.json"),
        ];

        if let Some(config_dir) = Self::user_config_dir() {
            paths.push(config_dir.join("abot.yaml"));
            paths.push(config_dir.join("abot.yml"));
            paths.push(config_dir.join("abot.json"));
        }

        paths
    }

    fn user_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("abot"))
    }

    /// Write the example config to `path`, refusing to overwrite.
    pub fn write_example(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow!("Config file already exists: {}", path.display()));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory: {}", parent.display())
                })?;
            }
        }
        fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Default location used by `--config-init`.
    pub fn default_user_path() -> Result<PathBuf> {
        Self::user_config_dir()
            .map(|dir| dir.join("abot.yaml"))
            .ok_or_else(|| anyhow!("Could not determine home directory"))
    }
}
