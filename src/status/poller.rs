//! Bounded-retry polling loop for transaction finality.
//!
//! # Responsibilities
//! - Parse the opaque transaction hash into a signature up front
//! - Probe the RPC source at "finalized" commitment up to N times
//! - Classify each probe: terminal record, not ready, or transient failure
//! - Sleep a constant delay between probes (cooperative, never blocking)
//! - Collapse exhausted attempts into a normal Pending outcome

use std::str::FromStr;
use std::time::Duration;

use solana_sdk::signature::Signature;

use crate::config::schema::PollerConfig;
use crate::observability::metrics;
use crate::status::{
    StatusError, TransactionRecord, TransactionSource, TransientFetchError, TxOutcome,
};

/// Retry policy for one poll call.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Maximum number of probes before reporting pending.
    pub max_attempts: u32,

    /// Constant delay between probes.
    pub delay: Duration,

    /// Optional overall bound on the poll. Expiry yields a Pending
    /// outcome rather than an error. Off by default so the standard
    /// path keeps its 5 x 2s worst case.
    pub deadline: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
            deadline: None,
        }
    }
}

impl From<&PollerConfig> for PollPolicy {
    fn from(config: &PollerConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: config.delay(),
            deadline: None,
        }
    }
}

/// Polls a [`TransactionSource`] until a transaction resolves or the
/// attempt budget runs out.
pub struct StatusPoller<S> {
    source: S,
    policy: PollPolicy,
}

impl<S: TransactionSource> StatusPoller<S> {
    /// Create a poller over a source with the given policy.
    pub fn new(source: S, policy: PollPolicy) -> Self {
        Self { source, policy }
    }

    /// Resolve a transaction hash to a terminal-or-pending outcome.
    ///
    /// Only a malformed hash escapes as an error; every failure inside
    /// the loop is retried and, if attempts run out, reported as
    /// [`TxOutcome::Pending`].
    pub async fn poll(&self, tx_hash: &str) -> Result<TxOutcome, StatusError> {
        let signature = Signature::from_str(tx_hash)
            .map_err(|e| StatusError::InvalidSignature(e.to_string()))?;

        let outcome = match self.policy.deadline {
            None => self.run(&signature).await,
            Some(limit) => match tokio::time::timeout(limit, self.run(&signature)).await {
                Ok(outcome) => outcome,
                Err(_) => TxOutcome::Pending {
                    note: format!("poll deadline of {}ms exceeded", limit.as_millis()),
                },
            },
        };

        Ok(outcome)
    }

    async fn run(&self, signature: &Signature) -> TxOutcome {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            let probe = self.source.fetch_finalized(signature).await;
            if let Some(outcome) = classify_probe(probe, attempt) {
                metrics::record_poll(attempt, true);
                return outcome;
            }

            tokio::time::sleep(self.policy.delay).await;
        }

        metrics::record_poll(max_attempts, false);
        TxOutcome::Pending {
            note: format!("not confirmed after {} attempts", max_attempts),
        }
    }
}

/// Classify one probe result.
///
/// Returns the terminal outcome when the record carries execution
/// metadata. A missing record, a record without metadata, and a
/// transient fetch failure all mean the same thing: try again.
fn classify_probe(
    probe: Result<Option<TransactionRecord>, TransientFetchError>,
    attempt: u32,
) -> Option<TxOutcome> {
    match probe {
        Ok(Some(record)) => match record.meta {
            Some(meta) => Some(meta.into_outcome()),
            None => {
                tracing::debug!(attempt, "record present but metadata not yet available");
                None
            }
        },
        Ok(None) => {
            tracing::debug!(attempt, "transaction not yet finalized");
            None
        }
        Err(e) => {
            tracing::warn!(attempt, error = %e, "status probe failed, will retry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ExecutionMeta;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    type Probe = Result<Option<TransactionRecord>, TransientFetchError>;

    /// Source that replays a fixed script of probe results and counts calls.
    struct ScriptedSource {
        calls: AtomicU32,
        script: Mutex<VecDeque<Probe>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Probe>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                script: Mutex::new(script.into()),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl TransactionSource for &ScriptedSource {
        async fn fetch_finalized(
            &self,
            _signature: &Signature,
        ) -> Result<Option<TransactionRecord>, TransientFetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    fn finalized_record() -> TransactionRecord {
        TransactionRecord {
            meta: Some(ExecutionMeta {
                err: None,
                fee: Some(5000),
                pre_balances: Some(vec![100, 100]),
                post_balances: Some(vec![95, 105]),
            }),
        }
    }

    fn test_hash() -> String {
        Signature::default().to_string()
    }

    fn fast_policy(max_attempts: u32) -> PollPolicy {
        PollPolicy {
            max_attempts,
            delay: Duration::ZERO,
            deadline: None,
        }
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let source = ScriptedSource::new(vec![Ok(Some(finalized_record()))]);
        let poller = StatusPoller::new(&source, fast_policy(5));

        let outcome = poller.poll(&test_hash()).await.unwrap();

        match outcome {
            TxOutcome::Success { fee, balances } => {
                assert_eq!(fee, Some(5000));
                assert!(balances.is_some());
            }
            other => panic!("expected success, got {:?}", other),
        }
        // Terminal on attempt 1; no further probes.
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_yield_pending() {
        let source = ScriptedSource::new(vec![Ok(None), Ok(None), Ok(None)]);
        let poller = StatusPoller::new(&source, fast_policy(3));

        let outcome = poller.poll(&test_hash()).await.unwrap();

        match outcome {
            TxOutcome::Pending { note } => assert!(note.contains("3")),
            other => panic!("expected pending, got {:?}", other),
        }
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_record_on_third_attempt() {
        let source = ScriptedSource::new(vec![
            Ok(None),
            Err(TransientFetchError("connection reset".into())),
            Ok(Some(finalized_record())),
        ]);
        let poller = StatusPoller::new(&source, fast_policy(3));

        let outcome = poller.poll(&test_hash()).await.unwrap();

        match outcome {
            TxOutcome::Success { fee, balances } => {
                assert_eq!(fee, Some(5000));
                let balances = balances.unwrap();
                assert_eq!(balances.pre_balances, vec![100, 100]);
                assert_eq!(balances.post_balances, vec![95, 105]);
            }
            other => panic!("expected success, got {:?}", other),
        }
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_between_attempts() {
        let source = ScriptedSource::new(vec![Ok(None), Ok(None), Ok(Some(finalized_record()))]);
        let poller = StatusPoller::new(
            &source,
            PollPolicy {
                max_attempts: 5,
                delay: Duration::from_secs(2),
                deadline: None,
            },
        );

        let start = Instant::now();
        let outcome = poller.poll(&test_hash()).await.unwrap();

        assert!(matches!(outcome, TxOutcome::Success { .. }));
        // Two failed attempts before success: two sleeps elapsed.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(4), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(5), "elapsed {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_transient_errors_never_escape() {
        let source = ScriptedSource::new(vec![
            Err(TransientFetchError("rpc 500".into())),
            Err(TransientFetchError("timeout".into())),
        ]);
        let poller = StatusPoller::new(&source, fast_policy(2));

        let outcome = poller.poll(&test_hash()).await.unwrap();
        assert!(matches!(outcome, TxOutcome::Pending { .. }));
    }

    #[tokio::test]
    async fn test_meta_less_record_keeps_retrying() {
        // A record with no metadata is the same as no record at all.
        let source = ScriptedSource::new(vec![
            Ok(Some(TransactionRecord { meta: None })),
            Ok(Some(TransactionRecord { meta: None })),
        ]);
        let poller = StatusPoller::new(&source, fast_policy(2));

        let outcome = poller.poll(&test_hash()).await.unwrap();
        match outcome {
            TxOutcome::Pending { note } => assert!(note.contains("2")),
            other => panic!("expected pending, got {:?}", other),
        }
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_malformed_hash_fails_before_any_probe() {
        let source = ScriptedSource::new(vec![Ok(Some(finalized_record()))]);
        let poller = StatusPoller::new(&source, fast_policy(5));

        let result = poller.poll("definitely-not-a-signature").await;

        assert!(matches!(result, Err(StatusError::InvalidSignature(_))));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_idempotent_over_finalized_record() {
        let hash = test_hash();

        let first = {
            let source = ScriptedSource::new(vec![Ok(Some(finalized_record()))]);
            StatusPoller::new(&source, fast_policy(5))
                .poll(&hash)
                .await
                .unwrap()
        };
        let second = {
            let source = ScriptedSource::new(vec![Ok(Some(finalized_record()))]);
            StatusPoller::new(&source, fast_policy(5))
                .poll(&hash)
                .await
                .unwrap()
        };

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_outcome_carries_error_payload() {
        let record = TransactionRecord {
            meta: Some(ExecutionMeta {
                err: Some(serde_json::json!({"InstructionError": [0, {"Custom": 1}]})),
                fee: Some(5000),
                pre_balances: Some(vec![10]),
                post_balances: Some(vec![5]),
            }),
        };
        let source = ScriptedSource::new(vec![Ok(Some(record))]);
        let poller = StatusPoller::new(&source, fast_policy(1));

        match poller.poll(&test_hash()).await.unwrap() {
            TxOutcome::Failed { err, fee, .. } => {
                assert_eq!(fee, Some(5000));
                assert!(err.to_string().contains("InstructionError"));
            }
            other => panic!("expected failed, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_cuts_poll_short() {
        let source = ScriptedSource::new(vec![]);
        let poller = StatusPoller::new(
            &source,
            PollPolicy {
                max_attempts: 5,
                delay: Duration::from_secs(2),
                deadline: Some(Duration::from_secs(3)),
            },
        );

        let outcome = poller.poll(&test_hash()).await.unwrap();

        match outcome {
            TxOutcome::Pending { note } => assert!(note.contains("deadline")),
            other => panic!("expected pending, got {:?}", other),
        }
        // Deadline fired mid-loop: fewer probes than the attempt budget.
        assert!(source.calls() < 5);
    }
}
