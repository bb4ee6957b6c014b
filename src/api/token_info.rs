//! Token metadata lookup.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::oracle::TokenMetadata;

#[derive(Deserialize)]
pub struct TokenInfoParams {
    /// Token symbol or alias to fetch metadata for.
    pub token: String,
}

#[derive(Serialize)]
pub struct TokenInfoResponse {
    pub status: &'static str,
    pub token: String,
    pub metadata: TokenMetadata,
}

pub async fn token_info(
    State(state): State<AppState>,
    Query(params): Query<TokenInfoParams>,
) -> Result<Json<TokenInfoResponse>, ApiError> {
    let metadata = state.oracle.coin_metadata(&params.token).await?;

    tracing::info!(
        token = %params.token,
        coingecko_id = ?metadata.coingecko_id,
        "Token metadata fetched"
    );

    Ok(Json(TokenInfoResponse {
        status: "success",
        token: params.token.to_lowercase(),
        metadata,
    }))
}
