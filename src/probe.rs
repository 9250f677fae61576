use crate::backend::Backend;
use crate::types::ConnectionConfig;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
}

/// Classify the configured backend within a bounded time budget.
///
/// `Reachable` requires an explicit success acknowledgement; a network
/// error, an elapsed timeout or an explicit failure payload all classify as
/// `Unreachable`. A config without host or username short-circuits to
/// `Unreachable` without a network call. No retries happen here; retrying
/// is the caller's decision.
pub async fn probe<B: Backend>(
    backend: &B,
    config: &ConnectionConfig,
    timeout: Duration,
) -> Reachability {
    if !config.is_complete() {
        debug!("connection config incomplete, skipping probe");
        return Reachability::Unreachable;
    }

    match tokio::time::timeout(timeout, backend.test_connection(config)).await {
        Ok(Ok(ack)) if ack.is_success() => {
            debug!(host = %config.host, "backend reachable");
            Reachability::Reachable
        }
        Ok(Ok(ack)) => {
            debug!(
                host = %config.host,
                message = %ack.message.as_deref().unwrap_or("<none>"),
                "backend refused connection"
            );
            Reachability::Unreachable
        }
        Ok(Err(e)) => {
            warn!(host = %config.host, error = %e, "connection probe failed");
            Reachability::Unreachable
        }
        Err(_) => {
            warn!(host = %config.host, timeout = ?timeout, "connection probe timed out");
            Reachability::Unreachable
        }
    }
}
