pub const DEFAULT_CHART_DIR: &str = "charts";
pub const DEFAULT_LOG_FILE: &str = "abot.log";

pub fn default_min_delay_ms() -> u64 {
    500
}

pub fn default_max_delay_ms() -> u64 {
    2000
}

pub fn default_worker_threads() -> usize {
    2
}
