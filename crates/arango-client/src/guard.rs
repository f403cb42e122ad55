//! Connection guard: connectivity bootstrap with bounded retry.
//!
//! The guard is an explicit collaborator passed to the dispatcher at
//! construction rather than a mutable flag on the server object, so its
//! retry behavior is directly testable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};
use crate::gateway::ArangoGateway;

/// Ensures the gateway is reachable before each dispatch.
///
/// Holds the only piece of state that outlives a single request: the
/// connectivity flag. Once a probe succeeds, subsequent `ensure` calls
/// return immediately.
#[derive(Debug)]
pub struct ConnectionGuard {
    gateway: Arc<dyn ArangoGateway>,
    connected: AtomicBool,
    max_attempts: u32,
    retry_delay: Duration,
}

impl ConnectionGuard {
    /// Probe attempts per `ensure` call before giving up.
    pub const MAX_CONNECT_ATTEMPTS: u32 = 3;

    /// Delay between failed probes.
    pub const RETRY_DELAY: Duration = Duration::from_millis(500);

    pub fn new(gateway: Arc<dyn ArangoGateway>) -> Self {
        Self::with_retry_policy(gateway, Self::MAX_CONNECT_ATTEMPTS, Self::RETRY_DELAY)
    }

    /// Construct with an explicit retry policy (tests use short delays).
    pub fn with_retry_policy(
        gateway: Arc<dyn ArangoGateway>,
        max_attempts: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            gateway,
            connected: AtomicBool::new(false),
            max_attempts,
            retry_delay,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Ensure the gateway is reachable, bootstrapping the connection with a
    /// bounded retry on first use.
    ///
    /// This is the only automatic retry in the system; operation-level
    /// failures propagate immediately to the caller.
    pub async fn ensure(&self) -> ClientResult<()> {
        if self.connected.load(Ordering::Acquire) {
            return Ok(());
        }

        let mut last_error: Option<ClientError> = None;
        for attempt in 1..=self.max_attempts {
            match self.gateway.ping().await {
                Ok(()) => {
                    self.connected.store(true, Ordering::Release);
                    info!(attempt, "database connection established");
                    return Ok(());
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        "connection probe failed"
                    );
                    last_error = Some(e);
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ClientError::Internal("connection probe never executed".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Map, Value};
    use std::sync::atomic::AtomicU32;

    use crate::types::{CollectionDescriptor, CollectionType, DocumentMeta};

    /// Gateway double whose ping fails a configured number of times before
    /// succeeding. Only `ping` is exercised by the guard.
    #[derive(Debug)]
    struct FlakyGateway {
        ping_calls: AtomicU32,
        failures_before_success: u32,
    }

    impl FlakyGateway {
        fn failing_first(failures: u32) -> Self {
            Self {
                ping_calls: AtomicU32::new(0),
                failures_before_success: failures,
            }
        }

        fn ping_count(&self) -> u32 {
            self.ping_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ArangoGateway for FlakyGateway {
        async fn query(&self, _: &str, _: Map<String, Value>) -> ClientResult<Vec<Value>> {
            unimplemented!("not exercised by guard tests")
        }
        async fn insert(&self, _: &str, _: &Map<String, Value>) -> ClientResult<DocumentMeta> {
            unimplemented!("not exercised by guard tests")
        }
        async fn update(
            &self,
            _: &str,
            _: &str,
            _: &Map<String, Value>,
        ) -> ClientResult<DocumentMeta> {
            unimplemented!("not exercised by guard tests")
        }
        async fn remove(&self, _: &str, _: &str) -> ClientResult<DocumentMeta> {
            unimplemented!("not exercised by guard tests")
        }
        async fn list_collections(&self) -> ClientResult<Vec<CollectionDescriptor>> {
            unimplemented!("not exercised by guard tests")
        }
        async fn create_collection(
            &self,
            _: &str,
            _: CollectionType,
            _: bool,
        ) -> ClientResult<CollectionDescriptor> {
            unimplemented!("not exercised by guard tests")
        }
        async fn list_indexes(&self, _: &str) -> ClientResult<Vec<Value>> {
            unimplemented!("not exercised by guard tests")
        }
        async fn ping(&self) -> ClientResult<()> {
            let call = self.ping_calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                Err(ClientError::ConnectionLost("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    fn guard_over(gateway: Arc<FlakyGateway>) -> ConnectionGuard {
        ConnectionGuard::with_retry_policy(gateway, 3, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_ensure_succeeds_first_probe() {
        let gateway = Arc::new(FlakyGateway::failing_first(0));
        let guard = guard_over(gateway.clone());

        guard.ensure().await.unwrap();
        assert!(guard.is_connected());
        assert_eq!(gateway.ping_count(), 1);
    }

    #[tokio::test]
    async fn test_ensure_is_cached_after_success() {
        let gateway = Arc::new(FlakyGateway::failing_first(0));
        let guard = guard_over(gateway.clone());

        guard.ensure().await.unwrap();
        guard.ensure().await.unwrap();
        assert_eq!(gateway.ping_count(), 1, "connected guard must not re-probe");
    }

    #[tokio::test]
    async fn test_ensure_retries_within_bound() {
        let gateway = Arc::new(FlakyGateway::failing_first(2));
        let guard = guard_over(gateway.clone());

        guard.ensure().await.unwrap();
        assert!(guard.is_connected());
        assert_eq!(gateway.ping_count(), 3);
    }

    #[tokio::test]
    async fn test_ensure_exhausts_retries() {
        let gateway = Arc::new(FlakyGateway::failing_first(u32::MAX));
        let guard = guard_over(gateway.clone());

        let err = guard.ensure().await.unwrap_err();
        assert!(!guard.is_connected());
        assert_eq!(gateway.ping_count(), 3, "must stop at the retry bound");
        assert!(err.to_string().contains("connection refused"));
    }
}
