pub mod api;
pub mod app;
pub mod canned;
pub mod chart;
pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod render;
pub mod session;
pub mod ui;
