//! EVM JSON-RPC adapter.
//!
//! # Responsibilities
//! - Connect to a user-supplied JSON-RPC endpoint for one request
//! - Query chain state (balances, gas price, receipts)
//! - Build, sign, and broadcast plain native transfers
//! - Handle timeouts and network errors gracefully

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::{ChainError, ChainResult, FeeEstimate};

/// Gas consumed by a plain native transfer with no calldata.
const TRANSFER_GAS: u64 = 21_000;

/// Scoped EVM RPC client for a single gateway request.
#[derive(Clone)]
pub struct EvmClient {
    provider: Arc<dyn Provider + Send + Sync>,
    url: url::Url,
    timeout_duration: Duration,
}

impl EvmClient {
    /// Connect to an RPC endpoint.
    ///
    /// A URL that does not parse is a connection-setup failure surfaced
    /// before any chain query runs.
    pub fn connect(rpc_url: &str, rpc_timeout: Duration) -> ChainResult<Self> {
        let url: url::Url = rpc_url.parse().map_err(|e: url::ParseError| ChainError::Connection {
            url: rpc_url.to_string(),
            reason: e.to_string(),
        })?;

        let provider = Arc::new(ProviderBuilder::new().connect_http(url.clone()))
            as Arc<dyn Provider + Send + Sync>;

        Ok(Self {
            provider,
            url,
            timeout_duration: rpc_timeout,
        })
    }

    /// Get the native balance of an address, in wei.
    pub async fn balance(&self, wallet: &str) -> ChainResult<U256> {
        let address = parse_address(wallet)?;
        let fut = self.provider.get_balance(address);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(balance)) => Ok(balance),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Get the current gas price, in wei.
    pub async fn gas_price(&self) -> ChainResult<u128> {
        let fut = self.provider.get_gas_price();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(price)) => Ok(price),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Fetch a transaction receipt by hash. A single non-retrying fetch;
    /// `None` means the transaction is still pending.
    pub async fn transaction_receipt(
        &self,
        tx_hash: &str,
    ) -> ChainResult<Option<TransactionReceipt>> {
        let hash: TxHash = tx_hash
            .parse()
            .map_err(|_| ChainError::InvalidTxHash(tx_hash.to_string()))?;

        let fut = self.provider.get_transaction_receipt(hash);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    /// Estimate the fee for a plain native transfer at the current gas price.
    pub async fn estimate_transfer_fee(&self) -> ChainResult<FeeEstimate> {
        let gas_price = self.gas_price().await?;
        let fee_wei = gas_price.saturating_mul(TRANSFER_GAS as u128);

        Ok(FeeEstimate {
            gas_limit: TRANSFER_GAS,
            gas_price,
            fee_native: fee_wei as f64 / 1e18,
        })
    }

    /// Send native tokens to a destination wallet.
    ///
    /// Mirrors the usual pre-flight guards: the destination must differ
    /// from the sender, and the sender balance must cover the amount.
    /// Nonce, chain id, and gas price come from the RPC.
    pub async fn send_native(
        &self,
        private_key: &str,
        destination: &str,
        amount_native: f64,
    ) -> ChainResult<TxHash> {
        let signer = parse_private_key(private_key)?;
        let sender = signer.address();
        let to = parse_address(destination)?;

        if to == sender {
            return Err(ChainError::SelfTransfer(destination.to_string()));
        }

        let value = native_to_wei(amount_native)?;
        let balance = self.balance_of(sender).await?;
        if balance < value {
            return Err(ChainError::InsufficientFunds {
                have: format!("{} wei", balance),
                need: format!("{} wei", value),
            });
        }

        let nonce = self.transaction_count(sender).await?;
        let chain_id = self.chain_id().await?;
        let gas_price = self.gas_price().await?;

        let tx = TransactionRequest::default()
            .with_from(sender)
            .with_to(to)
            .with_value(value)
            .with_nonce(nonce)
            .with_chain_id(chain_id)
            .with_gas_limit(TRANSFER_GAS)
            .with_gas_price(gas_price);

        // A fresh provider carrying the signer; the read-only provider
        // stays key-free.
        let wallet_provider = ProviderBuilder::new()
            .wallet(signer)
            .connect_http(self.url.clone());

        let fut = wallet_provider.send_transaction(tx);
        let pending = match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => return Err(ChainError::Rpc(e.to_string())),
            Err(_) => return Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        };

        let tx_hash = *pending.tx_hash();
        tracing::info!(
            tx_hash = %tx_hash,
            destination = %to,
            amount = amount_native,
            "Native transfer broadcast"
        );
        Ok(tx_hash)
    }

    async fn balance_of(&self, address: Address) -> ChainResult<U256> {
        let fut = self.provider.get_balance(address);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(balance)) => Ok(balance),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    async fn transaction_count(&self, address: Address) -> ChainResult<u64> {
        let fut = self.provider.get_transaction_count(address);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(count)) => Ok(count),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }

    async fn chain_id(&self) -> ChainResult<u64> {
        let fut = self.provider.get_chain_id();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(id)) => Ok(id),
            Ok(Err(e)) => Err(ChainError::Rpc(e.to_string())),
            Err(_) => Err(ChainError::Timeout(self.timeout_duration.as_secs())),
        }
    }
}

impl std::fmt::Debug for EvmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvmClient")
            .field("rpc_url", &self.url.as_str())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

fn parse_address(address: &str) -> ChainResult<Address> {
    address
        .parse()
        .map_err(|_| ChainError::InvalidAddress(address.to_string()))
}

/// Parse a hex private key, with or without a `0x` prefix. The key is
/// never logged.
fn parse_private_key(private_key: &str) -> ChainResult<PrivateKeySigner> {
    let key_hex = private_key.strip_prefix("0x").unwrap_or(private_key);
    key_hex
        .parse()
        .map_err(|_| ChainError::InvalidKey("not a valid secp256k1 key".to_string()))
}

/// Convert a native-unit amount to wei.
fn native_to_wei(amount: f64) -> ChainResult<U256> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ChainError::InvalidAmount(amount.to_string()));
    }
    Ok(U256::from((amount * 1e18) as u128))
}

/// Convert wei to native units without string round-trips.
pub fn wei_to_native(wei: U256) -> f64 {
    let raw = wei
        .as_limbs()
        .iter()
        .rev()
        .fold(0.0f64, |acc, &limb| acc * 2f64.powi(64) + limb as f64);
    raw / 1e18
}
