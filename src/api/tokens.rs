//! Supported token listing.

use axum::Json;
use serde::Serialize;

/// Tickers usable across swap, transfer, and status operations.
const SUPPORTED_TOKENS: [&str; 5] = ["BASE", "SOL", "ETH", "BNB", "TRX"];

#[derive(Serialize)]
pub struct TokensResponse {
    pub status: &'static str,
    pub tokens: Vec<&'static str>,
}

pub async fn supported_tokens() -> Json<TokensResponse> {
    tracing::info!("Request for supported tokens list");

    Json(TokensResponse {
        status: "success",
        tokens: SUPPORTED_TOKENS.to_vec(),
    })
}
