//! Swap simulation request and quote types.

use serde::{Deserialize, Serialize};

/// Parameters for a simulated swap.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapRequest {
    /// Token symbol to swap from, e.g. SOL, ETH, USDT.
    pub from_token: String,

    /// Token symbol to swap to.
    pub to_token: String,

    /// Amount of `from_token` to swap.
    pub amount: f64,
}

/// Result of a simulated swap. No transaction is executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapQuote {
    pub from_token: String,
    pub to_token: String,

    /// Amount of `to_token` received after the simulation fee,
    /// rounded to 6 decimals.
    pub swapped_amount: f64,

    pub price_from_usd: f64,
    pub price_to_usd: f64,
}
