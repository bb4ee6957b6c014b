//! Gas fee estimation.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::chain::evm::EvmClient;
use crate::chain::solana::SolanaRpc;
use crate::chain::{Chain, ChainError, FeeEstimate};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct EstimateGasParams {
    /// Blockchain chain: eth, bnb, polygon, base, sol.
    pub chain: String,
    /// Token symbol to send, e.g. ETH, SOL.
    pub token: String,
    /// Destination wallet address.
    pub destination_wallet: String,
    /// Amount of token to send.
    pub amount: f64,
    /// RPC URL; falls back to the configured default for the chain.
    pub rpc_url: Option<String>,
}

#[derive(Serialize)]
pub struct EstimateGasResponse {
    pub status: &'static str,
    pub chain: &'static str,
    pub gas_fee: FeeEstimate,
}

pub async fn estimate_gas(
    State(state): State<AppState>,
    Query(params): Query<EstimateGasParams>,
) -> Result<Json<EstimateGasResponse>, ApiError> {
    let chain: Chain = params.chain.parse()?;

    tracing::info!(
        chain = %chain,
        token = %params.token,
        destination = %params.destination_wallet,
        amount = params.amount,
        "Estimating gas fee"
    );

    let gas_fee = match chain {
        Chain::Eth | Chain::Bnb | Chain::Polygon | Chain::Base => {
            let rpc_url = params
                .rpc_url
                .as_deref()
                .or_else(|| state.config.default_rpc_url(&params.chain))
                .ok_or_else(|| {
                    ApiError::BadRequest(format!(
                        "no RPC URL given and none configured for chain {}",
                        chain
                    ))
                })?;

            let rpc_timeout = Duration::from_secs(state.config.timeouts.rpc_secs);
            let client = EvmClient::connect(rpc_url, rpc_timeout)?;
            client.estimate_transfer_fee().await?
        }
        // A plain SOL transfer costs one signature regardless of the node.
        Chain::Sol => SolanaRpc::signature_fee(),
        Chain::Trx => {
            return Err(ChainError::Unsupported("trx (estimate-gas)".to_string()).into());
        }
    };

    Ok(Json(EstimateGasResponse {
        status: "success",
        chain: chain.ticker(),
        gas_fee,
    }))
}
