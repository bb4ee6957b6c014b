//! Transaction-status resolution subsystem.
//!
//! # Data Flow
//! ```text
//! transaction hash (opaque string)
//!     → poller.rs (parse signature, bounded retry loop)
//!     → TransactionSource (chain RPC fetch at "finalized" commitment)
//!     → TxOutcome (success / failed / pending)
//! ```
//!
//! # Design Decisions
//! - The RPC fetch sits behind a trait so the loop is testable with a mock
//!   source and zero delay
//! - Per-attempt failures are an explicit Result branch, never an escaping
//!   error; only signature parsing fails fast
//! - Exhausted attempts are a normal Pending outcome, not an error

pub mod poller;

use serde::{Deserialize, Serialize};
use solana_sdk::signature::Signature;
use thiserror::Error;

pub use poller::{PollPolicy, StatusPoller};

/// Matched pre/post balance snapshots from execution metadata.
///
/// Modeled as one struct so a record can never carry one snapshot
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    /// Account balances before execution, in lamports.
    pub pre_balances: Vec<u64>,
    /// Account balances after execution, in lamports.
    pub post_balances: Vec<u64>,
}

/// Terminal-or-pending status of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TxOutcome {
    /// Finalized without an execution error.
    Success {
        fee: Option<u64>,
        #[serde(flatten)]
        balances: Option<BalanceSnapshot>,
    },
    /// Finalized with an execution error attached.
    Failed {
        fee: Option<u64>,
        #[serde(flatten)]
        balances: Option<BalanceSnapshot>,
        err: serde_json::Value,
    },
    /// Not finalized within the attempt budget.
    Pending { note: String },
}

/// Execution metadata attached to a finalized transaction record.
#[derive(Debug, Clone, Default)]
pub struct ExecutionMeta {
    /// Error payload; `None` means the transaction succeeded.
    pub err: Option<serde_json::Value>,
    /// Fee charged in lamports.
    pub fee: Option<u64>,
    /// Balances before execution.
    pub pre_balances: Option<Vec<u64>>,
    /// Balances after execution.
    pub post_balances: Option<Vec<u64>>,
}

/// A transaction record as returned by the chain RPC.
#[derive(Debug, Clone, Default)]
pub struct TransactionRecord {
    /// Execution metadata; absent while the node has not finalized it.
    pub meta: Option<ExecutionMeta>,
}

/// A single poll attempt's failure. Always recovered by retrying.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransientFetchError(pub String);

/// Fatal errors that escape the poller.
#[derive(Debug, Error)]
pub enum StatusError {
    /// The transaction hash is not a valid signature. Never retried.
    #[error("invalid transaction signature: {0}")]
    InvalidSignature(String),
}

/// The external collaborator the poller depends on: an asynchronous
/// client that can fetch a transaction record at "finalized" commitment.
#[async_trait::async_trait]
pub trait TransactionSource {
    async fn fetch_finalized(
        &self,
        signature: &Signature,
    ) -> Result<Option<TransactionRecord>, TransientFetchError>;
}

impl ExecutionMeta {
    /// Fold metadata into a terminal outcome.
    ///
    /// An absent error field means success. Balance snapshots are only
    /// carried when both sides are present.
    pub fn into_outcome(self) -> TxOutcome {
        let balances = match (self.pre_balances, self.post_balances) {
            (Some(pre), Some(post)) => Some(BalanceSnapshot {
                pre_balances: pre,
                post_balances: post,
            }),
            _ => None,
        };

        match self.err {
            None => TxOutcome::Success {
                fee: self.fee,
                balances,
            },
            Some(err) => TxOutcome::Failed {
                fee: self.fee,
                balances,
                err,
            },
        }
    }
}
