//! Token price lookup.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Deserialize)]
pub struct PriceParams {
    /// Token symbol to fetch the current price for, e.g. BTC, ETH, SOL.
    pub token: String,
}

pub async fn token_price(
    State(state): State<AppState>,
    Query(params): Query<PriceParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let price = state.oracle.price(&params.token).await?;

    // The price key carries the quote currency, e.g. `price_idr`.
    let mut body = json!({
        "status": "success",
        "token": params.token.to_uppercase(),
    });
    if let Some(object) = body.as_object_mut() {
        object.insert(
            format!("price_{}", state.oracle.vs_currency()),
            json!(price),
        );
    }

    Ok(Json(body))
}
