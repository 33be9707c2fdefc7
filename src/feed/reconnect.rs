use std::time::Duration;
use tokio::time::{sleep_until, Instant};

pub const RECONNECT_DELAY: Duration = Duration::from_millis(3000);

/// Single pending reconnect deadline.
///
/// Scheduling while a deadline is already pending keeps the existing one,
/// so there is never more than one reconnect outstanding.
#[derive(Debug)]
pub struct ReconnectTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for ReconnectTimer {
    fn default() -> Self {
        Self::new(RECONNECT_DELAY)
    }
}

impl ReconnectTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arms the timer. Returns false if a reconnect was already pending.
    pub fn schedule(&mut self) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(Instant::now() + self.delay);
        true
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Waits for the pending deadline and disarms the timer.
    /// Returns immediately if nothing is pending.
    pub async fn expired(&mut self) {
        if let Some(deadline) = self.deadline {
            sleep_until(deadline).await;
        }
        self.deadline = None;
    }
}
