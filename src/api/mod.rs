pub mod client;
pub mod models;
pub mod response;

pub use client::{ApiClient, DEFAULT_CHAT_ENDPOINT};
pub use models::{ChatRequest, RemoteReply};
pub use response::{parse_error_detail, parse_reply};
