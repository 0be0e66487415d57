//! Inter-request pacing
//!
//! The upstream asks clients to spread requests out. A fixed delay between
//! consecutive page fetches is enough here; the fetch loop skips the wait on
//! the iteration that terminates it.

use std::time::Duration;
use tokio::time::sleep;

/// Fixed-delay pacer between consecutive page requests
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    /// Create a pacer with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Delay between requests
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the configured delay
    pub async fn wait(&self) {
        sleep(self.delay).await;
    }
}
