//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Price oracle settings.
    pub oracle: OracleConfig,

    /// Transaction-status poller settings.
    pub poller: PollerConfig,

    /// Swap simulation settings.
    pub swap: SwapConfig,

    /// Default RPC endpoints per chain, used by operations that do not
    /// receive an RPC URL in the request.
    pub chains: Vec<ChainRpcConfig>,
}

impl GatewayConfig {
    /// Look up the configured default RPC URL for a chain ticker.
    pub fn default_rpc_url(&self, chain: &str) -> Option<&str> {
        self.chains
            .iter()
            .find(|c| c.chain.eq_ignore_ascii_case(chain))
            .map(|c| c.rpc_url.as_str())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,

    /// Per-call chain RPC timeout in seconds.
    pub rpc_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            rpc_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Price oracle configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL of the oracle HTTP API.
    pub base_url: String,

    /// Quote currency for the /price endpoint.
    pub vs_currency: String,

    /// HTTP timeout for oracle calls in seconds.
    pub timeout_secs: u64,

    /// How long a fetched price stays fresh, in seconds.
    pub cache_ttl_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com/api/v3".to_string(),
            vs_currency: "idr".to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 30,
        }
    }
}

/// Transaction-status poller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Maximum number of poll attempts before reporting pending.
    pub max_attempts: u32,

    /// Delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl PollerConfig {
    /// Delay between attempts as a [`Duration`].
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay_ms: 2000,
        }
    }
}

/// Swap simulation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SwapConfig {
    /// Simulation fee rate (0.01 = 1%).
    pub fee_rate: f64,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self { fee_rate: 0.01 }
    }
}

/// Default RPC endpoint for a chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainRpcConfig {
    /// Chain ticker (eth, bnb, polygon, base, sol, trx).
    pub chain: String,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
}
