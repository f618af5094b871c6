//! Failure alerting
//!
//! Ingestion hands Failure entries to a bounded queue; a dedicated worker
//! drains the queue and delivers each alert through an [`AlertChannel`]
//! with bounded retry. Nothing here can fail the request that triggered
//! the alert: a full queue drops the alert with a warning, and exhausted
//! retries are logged and abandoned.

pub mod webhook;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::domain::log::{InterfaceLog, LogStatus};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::config::AlertConfig;

/// Payload delivered for a Failure entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureAlert {
    pub interface_name: String,
    pub integration_key: String,
    pub status: LogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&InterfaceLog> for FailureAlert {
    fn from(entry: &InterfaceLog) -> Self {
        Self {
            interface_name: entry.interface_name.clone(),
            integration_key: entry.integration_key.clone(),
            status: entry.status,
            message: entry.message.clone(),
            created_at: entry.created_at,
        }
    }
}

/// Delivery failure. Stays inside the notifier boundary; never reaches
/// the ingestion caller.
#[derive(Debug)]
pub enum NotifyError {
    Transport(String),
    Rejected { status: u16 },
}

/// A destination alerts can be delivered to.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    /// Returns the name of this channel, for logging.
    fn name(&self) -> &str;

    /// Delivers a single alert.
    async fn send(&self, alert: &FailureAlert) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone)]
struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

/// Handle for enqueueing failure alerts.
#[derive(Clone)]
pub struct Notifier {
    tx: Option<mpsc::Sender<FailureAlert>>,
}

impl Notifier {
    /// A notifier that skips everything (no destination configured).
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Starts the delivery worker and returns the enqueue handle.
    pub fn spawn(channel: Arc<dyn AlertChannel>, config: &AlertConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let policy = RetryPolicy {
            max_attempts: config.max_attempts,
            backoff: config.retry_backoff,
        };

        tokio::spawn(run_worker(rx, channel, policy));

        Self { tx: Some(tx) }
    }

    /// Enqueues an alert for the entry.
    ///
    /// Never blocks and never fails the caller: with no destination the
    /// alert is skipped, and with a full queue it is dropped with a
    /// warning.
    pub fn dispatch(&self, entry: &InterfaceLog) {
        let Some(tx) = &self.tx else {
            tracing::debug!("No alert destination configured; skipping failure notification");
            return;
        };

        if tx.try_send(FailureAlert::from(entry)).is_err() {
            tracing::warn!(
                "Alert queue full; dropping failure notification for interface: {}",
                entry.interface_name
            );
        }
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<FailureAlert>,
    channel: Arc<dyn AlertChannel>,
    policy: RetryPolicy,
) {
    tracing::info!("Alert worker started (channel: {})", channel.name());

    while let Some(alert) = rx.recv().await {
        deliver(channel.as_ref(), &alert, &policy).await;
    }

    tracing::debug!("Alert queue closed; worker exiting");
}

async fn deliver(channel: &dyn AlertChannel, alert: &FailureAlert, policy: &RetryPolicy) {
    for attempt in 1..=policy.max_attempts {
        match channel.send(alert).await {
            Ok(()) => {
                tracing::info!(
                    "Failure alert sent for interface: {}",
                    alert.interface_name
                );
                return;
            }
            Err(err) => {
                tracing::warn!(
                    "Alert delivery attempt {}/{} failed: {:?}",
                    attempt,
                    policy.max_attempts,
                    err
                );

                if attempt < policy.max_attempts {
                    tokio::time::sleep(policy.backoff).await;
                }
            }
        }
    }

    tracing::error!(
        "Giving up on failure alert for interface {} after {} attempts",
        alert.interface_name,
        policy.max_attempts
    );
}

// =============================================================================
// Test Channels
// =============================================================================

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Forwards every delivered alert to an unbounded channel.
    pub struct RecordingChannel {
        tx: mpsc::UnboundedSender<FailureAlert>,
    }

    impl RecordingChannel {
        pub fn new() -> (Self, mpsc::UnboundedReceiver<FailureAlert>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (Self { tx }, rx)
        }
    }

    #[async_trait]
    impl AlertChannel for RecordingChannel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(&self, alert: &FailureAlert) -> Result<(), NotifyError> {
            let _ = self.tx.send(alert.clone());
            Ok(())
        }
    }

    /// Fails the first `failures` delivery attempts, then succeeds.
    pub struct FlakyChannel {
        failures: u32,
        attempts: AtomicU32,
        tx: mpsc::UnboundedSender<FailureAlert>,
    }

    impl FlakyChannel {
        pub fn new(failures: u32) -> (Arc<Self>, mpsc::UnboundedReceiver<FailureAlert>) {
            let (tx, rx) = mpsc::unbounded_channel();
            (
                Arc::new(Self {
                    failures,
                    attempts: AtomicU32::new(0),
                    tx,
                }),
                rx,
            )
        }

        pub fn attempts(&self) -> u32 {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AlertChannel for FlakyChannel {
        fn name(&self) -> &str {
            "flaky"
        }

        async fn send(&self, alert: &FailureAlert) -> Result<(), NotifyError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.failures {
                return Err(NotifyError::Transport("injected failure".to_string()));
            }
            let _ = self.tx.send(alert.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::timeout;
    use uuid::Uuid;

    use super::testing::{FlakyChannel, RecordingChannel};
    use super::*;

    fn failure_entry() -> InterfaceLog {
        InterfaceLog {
            id: Uuid::new_v4(),
            interface_name: "billing-api".to_string(),
            integration_key: "bill-01".to_string(),
            status: LogStatus::Failure,
            message: Some("timeout after 30s".to_string()),
            created_at: Utc::now(),
        }
    }

    fn alert_config() -> AlertConfig {
        AlertConfig {
            webhook_url: None,
            queue_capacity: 8,
            max_attempts: 3,
            retry_backoff: Duration::from_secs(5),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_delivers_exactly_once() {
        let (channel, mut rx) = RecordingChannel::new();
        let notifier = Notifier::spawn(Arc::new(channel), &alert_config());

        notifier.dispatch(&failure_entry());

        let alert = timeout(Duration::from_secs(30), rx.recv())
            .await
            .expect("alert should be delivered")
            .unwrap();
        assert_eq!(alert.interface_name, "billing-api");
        assert_eq!(alert.status, LogStatus::Failure);

        // No second delivery
        assert!(timeout(Duration::from_millis(100), rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_retries_then_succeeds() {
        let (channel, mut rx) = FlakyChannel::new(2);
        let notifier = Notifier::spawn(channel.clone(), &alert_config());

        notifier.dispatch(&failure_entry());

        timeout(Duration::from_secs(60), rx.recv())
            .await
            .expect("alert should be delivered after retries")
            .unwrap();
        assert_eq!(channel.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivery_gives_up_after_max_attempts() {
        let (channel, mut rx) = FlakyChannel::new(u32::MAX);
        let notifier = Notifier::spawn(channel.clone(), &alert_config());

        notifier.dispatch(&failure_entry());

        assert!(timeout(Duration::from_secs(60), rx.recv()).await.is_err());
        assert_eq!(channel.attempts(), 3);
    }

    #[tokio::test]
    async fn test_disabled_notifier_is_a_no_op() {
        let notifier = Notifier::disabled();
        notifier.dispatch(&failure_entry());
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_blocking() {
        let (tx, mut rx) = mpsc::channel(1);
        let notifier = Notifier { tx: Some(tx) };

        notifier.dispatch(&failure_entry());
        notifier.dispatch(&failure_entry());

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
