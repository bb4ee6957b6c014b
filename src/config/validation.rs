//! Semantic validation of a parsed configuration.

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Run all semantic checks on a config, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".to_string(),
            message: format!("'{}' is not a valid socket address", config.listener.bind_address),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address".to_string(),
            message: format!(
                "'{}' is not a valid socket address",
                config.observability.metrics_address
            ),
        });
    }

    if config.poller.max_attempts == 0 {
        errors.push(ValidationError {
            field: "poller.max_attempts".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    if !(0.0..1.0).contains(&config.swap.fee_rate) {
        errors.push(ValidationError {
            field: "swap.fee_rate".to_string(),
            message: format!("{} is outside [0, 1)", config.swap.fee_rate),
        });
    }

    for (i, entry) in config.chains.iter().enumerate() {
        if url::Url::parse(&entry.rpc_url).is_err() {
            errors.push(ValidationError {
                field: format!("chains[{}].rpc_url", i),
                message: format!("'{}' is not a valid URL", entry.rpc_url),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
