//! Shared utilities for integration testing.

// Each test binary uses its own subset of these helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use chain_gateway::{GatewayConfig, HttpServer};

/// A gateway instance bound to an ephemeral port, stopped on drop.
pub struct TestGateway {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestGateway {
    pub async fn spawn(config: GatewayConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        let server = HttpServer::new(config);
        tokio::spawn(async move {
            let _ = server
                .run_until(listener, async {
                    let _ = rx.await;
                })
                .await;
        });

        Self {
            addr,
            shutdown: Some(tx),
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Start a JSON-RPC 2.0 mock node. The handler maps (method, params)
/// to the `result` value of the response envelope.
pub async fn start_json_rpc_node<F>(handler: F) -> SocketAddr
where
    F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    let app = Router::new().route(
        "/",
        post(move |Json(request): Json<Value>| {
            let handler = handler.clone();
            async move {
                let method = request["method"].as_str().unwrap_or_default();
                let params = request["params"].clone();
                let result = handler(method, &params);
                Json(json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "result": result,
                }))
            }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// Start a CoinGecko-shaped mock oracle.
///
/// `prices` maps an oracle id to its per-currency quotes; `coins` maps
/// an oracle id to a full `/coins/{id}` body. Unknown coins get a 404.
pub async fn start_mock_oracle(
    prices: HashMap<String, HashMap<String, f64>>,
    coins: HashMap<String, Value>,
) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let prices = Arc::new(prices);
    let coins = Arc::new(coins);

    let app = Router::new()
        .route(
            "/simple/price",
            get(move |Query(query): Query<HashMap<String, String>>| {
                let prices = prices.clone();
                async move {
                    let ids = query.get("ids").cloned().unwrap_or_default();
                    let currencies = query.get("vs_currencies").cloned().unwrap_or_default();

                    let mut body = serde_json::Map::new();
                    for id in ids.split(',') {
                        if let Some(quotes) = prices.get(id) {
                            let mut per_currency = serde_json::Map::new();
                            for currency in currencies.split(',') {
                                if let Some(price) = quotes.get(currency) {
                                    per_currency.insert(currency.to_string(), json!(price));
                                }
                            }
                            body.insert(id.to_string(), Value::Object(per_currency));
                        }
                    }
                    Json(Value::Object(body))
                }
            }),
        )
        .route(
            "/coins/{id}",
            get(move |Path(id): Path<String>| {
                let coins = coins.clone();
                async move {
                    match coins.get(&id) {
                        Some(body) => (StatusCode::OK, Json(body.clone())),
                        None => (
                            StatusCode::NOT_FOUND,
                            Json(json!({"error": "coin not found"})),
                        ),
                    }
                }
            }),
        );

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// A syntactically complete EVM receipt the alloy types accept.
pub fn evm_receipt(status: &str) -> Value {
    json!({
        "type": "0x0",
        "status": status,
        "cumulativeGasUsed": "0x5208",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": format!("0x{}", "11".repeat(32)),
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": "0x10",
        "gasUsed": "0x5208",
        "effectiveGasPrice": "0x3b9aca00",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
        "contractAddress": null,
    })
}

/// A finalized Solana transaction record with the given meta fields.
pub fn solana_tx_record(err: Value, fee: u64, pre: Vec<u64>, post: Vec<u64>) -> Value {
    let status = if err.is_null() {
        json!({"Ok": null})
    } else {
        json!({"Err": err})
    };
    json!({
        "slot": 123,
        "transaction": "unparsed",
        "meta": {
            "err": err,
            "status": status,
            "fee": fee,
            "preBalances": pre,
            "postBalances": post,
        },
        "blockTime": null,
    })
}
