//! Price oracle HTTP client.
//!
//! Talks to a CoinGecko-compatible API for spot prices and coin
//! metadata. Symbols go through an alias table first; metadata lookups
//! fall back to treating the input as a raw oracle id.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::schema::OracleConfig;
use crate::oracle::cache::PriceCache;

/// Errors from oracle operations.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Token {0} is not supported")]
    UnknownToken(String),
    #[error("Price for {0} is not available")]
    PriceUnavailable(String),
    #[error("Token {0} not found")]
    NotFound(String),
    #[error("oracle API error: status {0}")]
    Api(u16),
}

/// Result alias for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Metadata describing a listed coin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    pub contract_address: Option<String>,
    pub coingecko_id: Option<String>,
}

/// Client for a CoinGecko-compatible price API.
#[derive(Clone)]
pub struct PriceOracle {
    client: Client,
    base_url: String,
    vs_currency: String,
    timeout: Duration,
    cache: PriceCache,
}

impl PriceOracle {
    /// Create an oracle client from config.
    pub fn new(config: &OracleConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vs_currency: config.vs_currency.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            cache: PriceCache::new(Duration::from_secs(config.cache_ttl_secs)),
        }
    }

    /// The quote currency for [`PriceOracle::price`].
    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    /// Spot price of a token in the configured quote currency.
    pub async fn price(&self, token: &str) -> Result<f64> {
        let id = alias_to_id(token).ok_or_else(|| OracleError::UnknownToken(token.to_uppercase()))?;
        let currency = self.vs_currency.clone();
        self.simple_price(token, id, &currency).await
    }

    /// Spot price of a token in USD, used for swap legs.
    pub async fn usd_price(&self, token: &str) -> Result<f64> {
        let id = alias_to_id(token).ok_or_else(|| OracleError::UnknownToken(token.to_uppercase()))?;
        self.simple_price(token, id, "usd").await
    }

    async fn simple_price(&self, token: &str, id: &str, currency: &str) -> Result<f64> {
        if let Some(hit) = self.cache.get(id, currency) {
            return Ok(hit);
        }

        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.base_url, id, currency
        );
        let resp = self.client.get(&url).timeout(self.timeout).send().await?;
        if !resp.status().is_success() {
            return Err(OracleError::Api(resp.status().as_u16()));
        }

        let data: HashMap<String, HashMap<String, f64>> = resp.json().await?;
        let price = data.get(id).and_then(|prices| prices.get(currency)).copied();

        match price {
            Some(p) if p > 0.0 => {
                self.cache.put(id, currency, p);
                Ok(p)
            }
            _ => Err(OracleError::PriceUnavailable(token.to_uppercase())),
        }
    }

    /// Metadata for a token. Aliases are applied when known; anything
    /// else is passed through verbatim as an oracle id.
    pub async fn coin_metadata(&self, token: &str) -> Result<TokenMetadata> {
        let id = alias_to_id(token).unwrap_or(token).to_lowercase();

        let url = format!("{}/coins/{}", self.base_url, id);
        let resp = self.client.get(&url).timeout(self.timeout).send().await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(OracleError::NotFound(token.to_string()));
        }
        if !status.is_success() {
            return Err(OracleError::Api(status.as_u16()));
        }

        let coin: CoinResponse = resp.json().await?;
        let ethereum = coin.detail_platforms.get("ethereum");

        Ok(TokenMetadata {
            name: coin.name,
            symbol: coin.symbol.map(|s| s.to_uppercase()),
            decimals: ethereum.and_then(|p| p.decimal_place),
            contract_address: ethereum.and_then(|p| p.contract_address.clone()),
            coingecko_id: coin.id,
        })
    }
}

impl std::fmt::Debug for PriceOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceOracle")
            .field("base_url", &self.base_url)
            .field("vs_currency", &self.vs_currency)
            .finish()
    }
}

/// Partial shape of the oracle's `/coins/{id}` response.
#[derive(Debug, Deserialize)]
struct CoinResponse {
    id: Option<String>,
    name: Option<String>,
    symbol: Option<String>,
    #[serde(default)]
    detail_platforms: HashMap<String, DetailPlatform>,
}

#[derive(Debug, Deserialize)]
struct DetailPlatform {
    decimal_place: Option<u8>,
    contract_address: Option<String>,
}

/// Popular symbol → oracle id aliases.
pub fn alias_to_id(token: &str) -> Option<&'static str> {
    let id = match token.to_ascii_lowercase().as_str() {
        "eth" | "weth" => "ethereum",
        "sol" => "solana",
        "bnb" => "binancecoin",
        "busd" => "binance-usd",
        "usdt" => "tether",
        "usdc" => "usd-coin",
        "trx" => "tron",
        "ton" => "the-open-network",
        "ada" => "cardano",
        "dot" => "polkadot",
        "matic" => "matic-network",
        "avax" => "avalanche-2",
        "doge" => "dogecoin",
        "shib" => "shiba-inu",
        "ltc" => "litecoin",
        "btc" => "bitcoin",
        "atom" => "cosmos",
        "dai" => "dai",
        "ftm" => "fantom",
        "cake" => "pancakeswap-token",
        _ => return None,
    };
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_table() {
        assert_eq!(alias_to_id("sol"), Some("solana"));
        assert_eq!(alias_to_id("SOL"), Some("solana"));
        assert_eq!(alias_to_id("weth"), Some("ethereum"));
        assert_eq!(alias_to_id("ton"), Some("the-open-network"));
        assert_eq!(alias_to_id("unknown-token"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let oracle = PriceOracle::new(&OracleConfig {
            base_url: "https://api.coingecko.com/api/v3/".to_string(),
            ..OracleConfig::default()
        });
        assert_eq!(oracle.base_url, "https://api.coingecko.com/api/v3");
    }

    #[tokio::test]
    async fn test_unknown_token_fails_before_http() {
        // No server behind this URL; an unknown symbol must not get
        // that far.
        let oracle = PriceOracle::new(&OracleConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..OracleConfig::default()
        });

        let err = oracle.price("not-a-token").await.unwrap_err();
        assert!(matches!(err, OracleError::UnknownToken(_)));
    }

    #[test]
    fn test_coin_response_parsing() {
        let json = r#"{
            "id": "tether",
            "name": "Tether",
            "symbol": "usdt",
            "detail_platforms": {
                "ethereum": {
                    "decimal_place": 6,
                    "contract_address": "0xdac17f958d2ee523a2206206994597c13d831ec7"
                }
            }
        }"#;

        let coin: CoinResponse = serde_json::from_str(json).unwrap();
        let ethereum = coin.detail_platforms.get("ethereum").unwrap();
        assert_eq!(ethereum.decimal_place, Some(6));
        assert!(ethereum.contract_address.as_deref().unwrap().starts_with("0xdac1"));
    }
}
