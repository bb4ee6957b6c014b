//! Gateway API surface.
//!
//! One handler module per endpoint, assembled into a single router.
//! Handlers translate a request into at most one chain or oracle call;
//! the only endpoint with real control flow is `tx_status`, which hands
//! off to the status poller.

pub mod balance;
pub mod gas;
pub mod ping;
pub mod price;
pub mod swap;
pub mod token_info;
pub mod tokens;
pub mod transfer;
pub mod tx_status;

use axum::routing::{get, post};
use axum::Router;

use crate::http::server::AppState;

/// Assemble the API router over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping::ping))
        .route("/tokens", get(tokens::supported_tokens))
        .route("/balance", get(balance::wallet_balance))
        .route("/price", get(price::token_price))
        .route("/token_info", get(token_info::token_info))
        .route("/swap/simulate", post(swap::simulate_swap))
        .route("/estimate-gas", get(gas::estimate_gas))
        .route("/transfer", post(transfer::transfer_native))
        .route("/tx_status", get(tx_status::tx_status))
        .with_state(state)
}
