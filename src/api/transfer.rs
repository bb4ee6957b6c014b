//! Native token transfer.
//!
//! The caller supplies the RPC endpoint and the signing key in the
//! request body; neither is stored or logged.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::chain::evm::EvmClient;
use crate::chain::solana::SolanaRpc;
use crate::chain::{Chain, ChainError};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct TransferRequest {
    /// Blockchain chain: eth, bnb, polygon, base, sol.
    pub chain: String,
    /// Destination wallet address.
    pub destination: String,
    /// Amount to send in native units.
    pub amount: f64,
    /// RPC URL for the chain node.
    pub rpc_url: String,
    /// Sender private key (hex for EVM, base58 for Solana).
    pub private_key: String,
}

#[derive(Serialize)]
pub struct TransferResponse {
    pub status: &'static str,
    pub chain: &'static str,
    pub tx_hash: String,
    pub destination: String,
    pub amount: f64,
}

pub async fn transfer_native(
    State(state): State<AppState>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    let chain: Chain = request.chain.parse()?;
    let rpc_timeout = Duration::from_secs(state.config.timeouts.rpc_secs);

    tracing::info!(
        chain = %chain,
        destination = %request.destination,
        amount = request.amount,
        "Native transfer requested"
    );

    let tx_hash = match chain {
        Chain::Eth | Chain::Bnb | Chain::Polygon | Chain::Base => {
            let client = EvmClient::connect(&request.rpc_url, rpc_timeout)?;
            client
                .send_native(&request.private_key, &request.destination, request.amount)
                .await?
                .to_string()
        }
        Chain::Sol => {
            let rpc = SolanaRpc::connect(&request.rpc_url, rpc_timeout)?;
            rpc.send_native(&request.private_key, &request.destination, request.amount)
                .await?
                .to_string()
        }
        Chain::Trx => {
            return Err(ChainError::Unsupported("trx (transfer)".to_string()).into());
        }
    };

    Ok(Json(TransferResponse {
        status: "success",
        chain: chain.ticker(),
        tx_hash,
        destination: request.destination,
        amount: request.amount,
    }))
}
