use abot_chat::app::ChatApp;
use abot_chat::cli::Args;
use abot_chat::config::{Config, FileConfig};
use abot_chat::dispatcher::Dispatcher;
use abot_chat::ui;
use clap::Parser;
use colored::*;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::process;

fn init_logging(config: &Config) {
    let level = if config.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // The chat window redraws the whole screen, so logs go to a file.
    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(log_file) => {
            env_logger::Builder::new()
                .filter_level(level)
                .parse_env("ABOT_LOG")
                .target(env_logger::Target::Pipe(Box::new(log_file)))
                .init();
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!(
                    "Warning: cannot open log file {} ({}), logging errors to stderr",
                    config.log_file.display(),
                    e
                )
                .yellow()
            );
            env_logger::Builder::new()
                .filter_level(LevelFilter::Error)
                .init();
        }
    }
}

fn main() {
    let args = Args::parse();

    if args.config_init {
        let result = FileConfig::default_user_path()
            .and_then(|path| FileConfig::write_example(&path).map(|_| path));
        match result {
            Ok(path) => {
                println!("{}", format!("Wrote example config to {}", path.display()).green());
                return;
            }
            Err(e) => {
                ui::display_error(&format!("{:#}", e));
                process::exit(1);
            }
        }
    }

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            process::exit(1);
        }
    };

    init_logging(&config);
    log::debug!("Resolved configuration: {:?}", config);

    let dispatcher = match Dispatcher::from_config(&config) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            process::exit(1);
        }
    };

    let mut app = ChatApp::new(dispatcher, config.worker_threads);
    if let Err(e) = app.run() {
        ui::display_error(&format!("{:#}", e));
        process::exit(1);
    }
}
