use crate::config::ReplySourceKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "abot")]
#[command(about = "Terminal chat window for the Abot warehouse-monitoring assistant", long_about = None)]
pub struct Args {
    #[arg(
        long = "source",
        value_enum,
        help = "Where replies come from (remote API or offline canned demo)"
    )]
    pub source: Option<ReplySourceKind>,

    #[arg(long = "endpoint", help = "Chat API endpoint URL")]
    pub endpoint: Option<String>,

    #[arg(long = "chart-dir", help = "Directory holding the canned chart documents")]
    pub chart_dir: Option<PathBuf>,

    #[arg(long = "no-delay", help = "Disable the simulated latency of canned replies")]
    pub no_delay: bool,

    #[arg(long = "timeout", help = "Request timeout in seconds (default: wait forever)")]
    pub timeout: Option<u64>,

    #[arg(long = "workers", help = "Number of worker threads in the session pool")]
    pub worker_threads: Option<usize>,

    #[arg(short = 'v', long = "verbose", help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(long = "log-file", help = "Log file used while the chat window is open")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "config-init",
        help = "Write an example config file to ~/.config/abot/abot.yaml"
    )]
    pub config_init: bool,
}
