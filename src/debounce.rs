//! Cancellable delayed execution with a generation counter.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Generation a debounced result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Runs a task only after `delay` passes with no newer call. A result whose
/// call was superseded while the task ran is discarded as well.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: AtomicU64::new(0),
        }
    }

    /// `None` when a later call or `cancel` superseded this one. The ticket
    /// lets the caller re-check with `is_current` before applying the output.
    pub async fn run<F, Fut, T>(&self, task: F) -> Option<(Ticket, T)>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let ticket = self.next_ticket();

        tokio::time::sleep(self.delay).await;
        if !self.is_current(ticket) {
            tracing::debug!("Debounced task {} superseded before start", ticket.0);
            return None;
        }

        let output = task().await;
        if !self.is_current(ticket) {
            tracing::debug!("Debounced task {} superseded while running", ticket.0);
            return None;
        }

        Some((ticket, output))
    }

    /// Invalidates any pending or running task, and any output not yet applied.
    pub fn cancel(&self) -> Ticket {
        self.next_ticket()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    fn next_ticket(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }
}
