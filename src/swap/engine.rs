//! Core logic for pricing simulated swaps.

use crate::oracle::client::Result as OracleResult;
use crate::oracle::PriceOracle;
use crate::swap::types::{SwapQuote, SwapRequest};

/// Engine that prices a swap from two USD oracle legs.
#[derive(Clone)]
pub struct SwapEngine {
    oracle: PriceOracle,
    fee_rate: f64,
}

impl SwapEngine {
    /// Create a new swap engine.
    pub fn new(oracle: PriceOracle, fee_rate: f64) -> Self {
        Self { oracle, fee_rate }
    }

    /// Simulate swapping `amount` of one token into another at current
    /// oracle prices, minus the simulation fee.
    ///
    /// Amount validation happens at the HTTP edge; the engine assumes a
    /// positive finite amount.
    pub async fn simulate(&self, request: SwapRequest) -> OracleResult<SwapQuote> {
        let price_from = self.oracle.usd_price(&request.from_token).await?;
        let price_to = self.oracle.usd_price(&request.to_token).await?;

        let swapped = self.apply_fee(request.amount * price_from / price_to);

        tracing::info!(
            from = %request.from_token,
            to = %request.to_token,
            amount = request.amount,
            swapped_amount = swapped,
            "Simulated swap"
        );

        Ok(SwapQuote {
            from_token: request.from_token,
            to_token: request.to_token,
            swapped_amount: swapped,
            price_from_usd: price_from,
            price_to_usd: price_to,
        })
    }

    /// Apply the simulation fee and round to 6 decimals.
    fn apply_fee(&self, amount: f64) -> f64 {
        let after_fee = amount * (1.0 - self.fee_rate);
        (after_fee * 1e6).round() / 1e6
    }
}
