//! Multi-Chain Crypto Gateway Library

pub mod api;
pub mod chain;
pub mod config;
pub mod http;
pub mod observability;
pub mod oracle;
pub mod status;
pub mod swap;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use status::{PollPolicy, StatusPoller, TxOutcome};
