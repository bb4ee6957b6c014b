//! Swap simulation endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::swap::types::{SwapQuote, SwapRequest};

#[derive(Serialize)]
pub struct SwapResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub quote: SwapQuote,
}

/// Simulate swapping one token into another at live oracle prices.
/// No transaction is executed.
pub async fn simulate_swap(
    State(state): State<AppState>,
    Query(request): Query<SwapRequest>,
) -> Result<Json<SwapResponse>, ApiError> {
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ApiError::BadRequest(format!(
            "amount must be positive, got {}",
            request.amount
        )));
    }

    let quote = state.swap_engine.simulate(request).await?;

    Ok(Json(SwapResponse {
        status: "success",
        quote,
    }))
}
