//! Wallet balance lookup.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use solana_sdk::native_token::lamports_to_sol;
use std::time::Duration;

use crate::chain::evm::{wei_to_native, EvmClient};
use crate::chain::solana::SolanaRpc;
use crate::chain::{Chain, ChainError};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct BalanceParams {
    /// Blockchain chain: eth, bnb, polygon, base, sol, trx.
    pub chain: String,
    /// Wallet address to check.
    pub wallet: String,
    /// RPC URL for mainnet or testnet.
    pub rpc_url: String,
}

#[derive(Serialize)]
pub struct BalanceResponse {
    pub status: &'static str,
    pub chain: &'static str,
    pub wallet: String,
    /// Balance in native units (ether, SOL).
    pub balance: f64,
}

pub async fn wallet_balance(
    State(state): State<AppState>,
    Query(params): Query<BalanceParams>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let chain: Chain = params.chain.parse()?;
    let rpc_timeout = Duration::from_secs(state.config.timeouts.rpc_secs);

    tracing::info!(chain = %chain, wallet = %params.wallet, "Checking wallet balance");

    let balance = match chain {
        Chain::Eth | Chain::Bnb | Chain::Polygon | Chain::Base => {
            let client = EvmClient::connect(&params.rpc_url, rpc_timeout)?;
            wei_to_native(client.balance(&params.wallet).await?)
        }
        Chain::Sol => {
            let rpc = SolanaRpc::connect(&params.rpc_url, rpc_timeout)?;
            lamports_to_sol(rpc.balance(&params.wallet).await?)
        }
        Chain::Trx => {
            return Err(ChainError::Unsupported("trx (balance)".to_string()).into());
        }
    };

    Ok(Json(BalanceResponse {
        status: "success",
        chain: chain.ticker(),
        wallet: params.wallet,
        balance,
    }))
}
