//! Transaction status lookup.
//!
//! Solana hashes go through the bounded-retry status poller; EVM hashes
//! are a single receipt fetch; TRX stays a placeholder.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::chain::evm::EvmClient;
use crate::chain::solana::SolanaRpc;
use crate::chain::Chain;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::status::{PollPolicy, StatusPoller, TxOutcome};

#[derive(Deserialize)]
pub struct TxStatusParams {
    /// Blockchain chain: eth, bnb, polygon, base, sol, trx.
    pub chain: String,
    /// Transaction hash to query the status of.
    pub tx_hash: String,
    /// RPC URL for the blockchain node.
    pub rpc_url: String,
}

/// Poller outcome plus the queried hash.
#[derive(Serialize)]
struct PolledStatusResponse {
    pub tx_hash: String,
    #[serde(flatten)]
    pub outcome: TxOutcome,
}

pub async fn tx_status(
    State(state): State<AppState>,
    Query(params): Query<TxStatusParams>,
) -> Result<Response, ApiError> {
    let chain: Chain = params.chain.parse()?;
    let rpc_timeout = Duration::from_secs(state.config.timeouts.rpc_secs);

    match chain {
        Chain::Sol => {
            tracing::info!(tx_hash = %params.tx_hash, "Checking Solana tx status");

            // The RPC connection lives exactly as long as this poll.
            let source = SolanaRpc::connect(&params.rpc_url, rpc_timeout)?;
            let poller = StatusPoller::new(source, PollPolicy::from(&state.config.poller));
            let outcome = poller.poll(&params.tx_hash).await?;

            Ok(Json(PolledStatusResponse {
                tx_hash: params.tx_hash,
                outcome,
            })
            .into_response())
        }
        Chain::Eth | Chain::Bnb | Chain::Polygon | Chain::Base => {
            tracing::info!(chain = %chain, tx_hash = %params.tx_hash, "Checking EVM tx status");

            let client = EvmClient::connect(&params.rpc_url, rpc_timeout)?;
            let body = match client.transaction_receipt(&params.tx_hash).await? {
                None => json!({
                    "status": "pending",
                    "tx_hash": params.tx_hash,
                }),
                Some(receipt) => json!({
                    "status": if receipt.status() { "success" } else { "failed" },
                    "tx_hash": params.tx_hash,
                    "blockNumber": receipt.block_number,
                    "gasUsed": receipt.gas_used,
                    "logs": receipt.inner.logs(),
                }),
            };

            Ok(Json(body).into_response())
        }
        Chain::Trx => {
            tracing::info!(tx_hash = %params.tx_hash, "Checking TRX tx status (placeholder)");

            Ok(Json(json!({
                "status": "pending",
                "tx_hash": params.tx_hash,
                "note": "TRX async not yet implemented",
            }))
            .into_response())
        }
    }
}
