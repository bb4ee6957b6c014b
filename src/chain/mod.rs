//! Chain families and adapter types.
//!
//! Each request names a chain and carries its own RPC endpoint; adapters
//! are scoped to a single call and dropped when it finishes. Branching
//! between families stays simple: EVM, Solana, or the TRX placeholder.

pub mod evm;
pub mod solana;

use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

/// Supported chain identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Eth,
    Bnb,
    Polygon,
    Base,
    Sol,
    Trx,
}

impl Chain {
    /// Whether this chain speaks the EVM JSON-RPC dialect.
    pub fn is_evm(&self) -> bool {
        matches!(self, Chain::Eth | Chain::Bnb | Chain::Polygon | Chain::Base)
    }

    /// Upper-case ticker used in response envelopes.
    pub fn ticker(&self) -> &'static str {
        match self {
            Chain::Eth => "ETH",
            Chain::Bnb => "BNB",
            Chain::Polygon => "POLYGON",
            Chain::Base => "BASE",
            Chain::Sol => "SOL",
            Chain::Trx => "TRX",
        }
    }
}

impl FromStr for Chain {
    type Err = ChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eth" => Ok(Chain::Eth),
            "bnb" | "bsc" => Ok(Chain::Bnb),
            "polygon" => Ok(Chain::Polygon),
            "base" => Ok(Chain::Base),
            "sol" => Ok(Chain::Sol),
            "trx" => Ok(Chain::Trx),
            other => Err(ChainError::Unsupported(other.to_string())),
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.ticker())
    }
}

/// Errors that can occur during chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// Chain is not supported by the gateway.
    #[error("Chain {0} is not supported")]
    Unsupported(String),

    /// The scoped RPC connection could not be established at all.
    #[error("cannot connect to RPC endpoint '{url}': {reason}")]
    Connection { url: String, reason: String },

    /// Malformed wallet or destination address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed transaction hash.
    #[error("invalid transaction hash: {0}")]
    InvalidTxHash(String),

    /// Malformed or unusable private key.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// Malformed amount (negative, NaN, out of range).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transfer destination is the sending wallet itself.
    #[error("destination equals sender wallet {0}, transfer cancelled")]
    SelfTransfer(String),

    /// Sender balance cannot cover the transfer.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientFunds { have: String, need: String },
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

/// Fee estimate for a plain native transfer.
///
/// `gas_limit` and `gas_price` are in the chain's own units: gas and wei
/// on EVM chains, signatures and lamports-per-signature on Solana.
#[derive(Debug, Clone, Serialize)]
pub struct FeeEstimate {
    pub gas_limit: u64,
    pub gas_price: u128,
    pub fee_native: f64,
}
