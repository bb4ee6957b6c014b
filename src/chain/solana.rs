//! Solana RPC adapter.
//!
//! Wraps the nonblocking RPC client for one gateway request: balance
//! queries, native SOL transfers, and the finalized-transaction fetch
//! the status poller drives through [`TransactionSource`].

use std::str::FromStr;
use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcTransactionConfig;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::message::Message;
use solana_sdk::native_token::{lamports_to_sol, sol_to_lamports};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::system_instruction;
use solana_sdk::transaction::Transaction;
use solana_transaction_status::{EncodedConfirmedTransactionWithStatusMeta, UiTransactionEncoding};

use crate::chain::{ChainError, ChainResult, FeeEstimate};
use crate::status::{ExecutionMeta, TransactionRecord, TransactionSource, TransientFetchError};

/// Base fee charged per transaction signature, in lamports.
const LAMPORTS_PER_SIGNATURE: u64 = 5_000;

/// Scoped Solana RPC client for a single gateway request.
pub struct SolanaRpc {
    client: RpcClient,
    rpc_url: String,
}

impl SolanaRpc {
    /// Connect to an RPC endpoint at "finalized" commitment.
    ///
    /// A URL that does not parse is a connection-setup failure surfaced
    /// before any poll attempt is consumed.
    pub fn connect(rpc_url: &str, rpc_timeout: Duration) -> ChainResult<Self> {
        url::Url::parse(rpc_url).map_err(|e| ChainError::Connection {
            url: rpc_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = RpcClient::new_with_timeout_and_commitment(
            rpc_url.to_string(),
            rpc_timeout,
            CommitmentConfig::finalized(),
        );

        Ok(Self {
            client,
            rpc_url: rpc_url.to_string(),
        })
    }

    /// Get the SOL balance of a wallet, in lamports.
    pub async fn balance(&self, wallet: &str) -> ChainResult<u64> {
        let pubkey = parse_pubkey(wallet)?;
        self.client
            .get_balance(&pubkey)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Fixed fee estimate for a single-signature transfer.
    pub fn signature_fee() -> FeeEstimate {
        FeeEstimate {
            gas_limit: 1,
            gas_price: LAMPORTS_PER_SIGNATURE as u128,
            fee_native: lamports_to_sol(LAMPORTS_PER_SIGNATURE),
        }
    }

    /// Send SOL to a destination wallet and return the signature.
    pub async fn send_native(
        &self,
        private_key: &str,
        destination: &str,
        amount_sol: f64,
    ) -> ChainResult<Signature> {
        if !amount_sol.is_finite() || amount_sol <= 0.0 {
            return Err(ChainError::InvalidAmount(amount_sol.to_string()));
        }

        let keypair = parse_keypair(private_key)?;
        let from = keypair.pubkey();
        let to = parse_pubkey(destination)?;

        if to == from {
            return Err(ChainError::SelfTransfer(destination.to_string()));
        }

        let lamports = sol_to_lamports(amount_sol);
        let balance = self
            .client
            .get_balance(&from)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        if balance < lamports {
            return Err(ChainError::InsufficientFunds {
                have: format!("{} lamports", balance),
                need: format!("{} lamports", lamports),
            });
        }

        let ix = system_instruction::transfer(&from, &to, lamports);
        let message = Message::new(&[ix], Some(&from));
        let mut tx = Transaction::new_unsigned(message);

        let blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;
        tx.try_sign(&[&keypair], blockhash)
            .map_err(|e| ChainError::InvalidKey(e.to_string()))?;

        let signature = self
            .client
            .send_transaction(&tx)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        tracing::info!(
            signature = %signature,
            destination = %to,
            amount = amount_sol,
            "SOL transfer broadcast"
        );
        Ok(signature)
    }
}

impl std::fmt::Debug for SolanaRpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolanaRpc")
            .field("rpc_url", &self.rpc_url)
            .finish()
    }
}

#[async_trait::async_trait]
impl TransactionSource for SolanaRpc {
    async fn fetch_finalized(
        &self,
        signature: &Signature,
    ) -> Result<Option<TransactionRecord>, TransientFetchError> {
        let config = RpcTransactionConfig {
            encoding: Some(UiTransactionEncoding::Json),
            commitment: Some(CommitmentConfig::finalized()),
            max_supported_transaction_version: Some(0),
        };

        // The RPC reports a not-yet-known signature as an error; the
        // poller treats both the same way, so every failure is transient.
        match self.client.get_transaction_with_config(signature, config).await {
            Ok(confirmed) => Ok(Some(convert_record(confirmed))),
            Err(e) => Err(TransientFetchError(e.to_string())),
        }
    }
}

/// Reduce the RPC record to the fields the poller cares about.
fn convert_record(confirmed: EncodedConfirmedTransactionWithStatusMeta) -> TransactionRecord {
    let meta = confirmed.transaction.meta.map(|m| ExecutionMeta {
        err: m.err.as_ref().and_then(|e| serde_json::to_value(e).ok()),
        fee: Some(m.fee),
        pre_balances: Some(m.pre_balances),
        post_balances: Some(m.post_balances),
    });

    TransactionRecord { meta }
}

fn parse_pubkey(wallet: &str) -> ChainResult<Pubkey> {
    Pubkey::from_str(wallet).map_err(|_| ChainError::InvalidAddress(wallet.to_string()))
}

/// Import a keypair from base58: either the 64-byte Solana keypair
/// format or a bare 32-byte seed. The key is never logged.
fn parse_keypair(private_key: &str) -> ChainResult<Keypair> {
    let bytes = bs58::decode(private_key)
        .into_vec()
        .map_err(|e| ChainError::InvalidKey(e.to_string()))?;

    match bytes.len() {
        64 => Keypair::from_bytes(&bytes)
            .map_err(|e| ChainError::InvalidKey(e.to_string())),
        32 => solana_sdk::signer::keypair::keypair_from_seed(&bytes)
            .map_err(|e| ChainError::InvalidKey(e.to_string())),
        n => Err(ChainError::InvalidKey(format!(
            "expected 32 or 64 bytes, got {}",
            n
        ))),
    }
}
