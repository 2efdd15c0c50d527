//! Mutual-exclusion gate serializing all mutating store operations.
//!
//! One coarse-grained lock exists per store: all writers serialize against
//! all writers, readers never wait. A caller that cannot acquire the gate
//! within its timeout gets [`GateBusy`] and is free to retry.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// The gate could not be acquired within the timeout. Retryable.
#[derive(Debug, Error)]
#[error("write gate busy")]
pub struct GateBusy;

/// Capability proving exclusive write access.
///
/// Dropping the token releases the gate, so release happens on every exit
/// path - success, error propagation or panic unwind.
pub struct WriteToken {
    _guard: OwnedMutexGuard<()>,
}

/// Process-wide advisory lock bounding the critical section of every
/// mutating operation.
#[derive(Clone)]
pub struct WriteGate {
    inner: Arc<Mutex<()>>,
}

impl WriteGate {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(())),
        }
    }

    /// Wait up to `timeout` for exclusive ownership.
    pub async fn acquire(&self, timeout: Duration) -> Result<WriteToken, GateBusy> {
        match tokio::time::timeout(timeout, self.inner.clone().lock_owned()).await {
            Ok(guard) => Ok(WriteToken { _guard: guard }),
            Err(_) => Err(GateBusy),
        }
    }
}

impl Default for WriteGate {
    fn default() -> Self {
        Self::new()
    }
}
